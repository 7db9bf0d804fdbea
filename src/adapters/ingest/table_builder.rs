//! Row-major parser output to column-major [`Dataset`].

use crate::domain::dataset::{Column, Dataset, RawCell};

use super::IngestError;

/// Transposes `rows` under `headers` and infers each column's kind.
///
/// Rows shorter than the header are padded with empty cells.
pub(crate) fn build_dataset(
    source_name: &str,
    headers: Vec<String>,
    rows: Vec<Vec<RawCell>>,
) -> Result<Dataset, IngestError> {
    if headers.is_empty() {
        return Err(IngestError::Empty);
    }

    let mut cells: Vec<Vec<RawCell>> = headers
        .iter()
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();
    for row in rows {
        let mut row = row.into_iter();
        for column in cells.iter_mut() {
            column.push(row.next().unwrap_or(RawCell::Empty));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::infer(name.trim(), raw))
        .collect();

    Ok(Dataset::new(source_name, columns)?)
}
