//! DatasetParser port - turns uploaded bytes into a [`Dataset`].

use crate::domain::dataset::Dataset;
use crate::domain::foundation::DomainError;

/// Port for one upload format.
///
/// # Contract
///
/// Implementations must:
/// - Take the first row as headers and reject empty or duplicate names
/// - Infer each column's kind from its non-empty cells
/// - Fail with `ErrorCode::ParseFailed` rather than returning a partial dataset
/// - Leave capacity checks to the caller
pub trait DatasetParser: Send + Sync {
    /// True when this parser handles the file's extension.
    fn supports(&self, filename: &str) -> bool;

    fn parse(&self, bytes: &[u8], filename: &str) -> Result<Dataset, DomainError>;
}

/// Lower-cased extension of `filename`, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("Line.XLSX"), Some("xlsx".to_string()));
        assert_eq!(extension_of("defects.csv"), Some("csv".to_string()));
        assert_eq!(extension_of("README"), None);
    }
}
