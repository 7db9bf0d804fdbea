//! UploadHandler - parses an uploaded file and publishes it to the session.

use std::sync::Arc;

use crate::domain::analysis::AnalysisError;
use crate::domain::dataset::{CapacityLimits, DatasetInfo};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::SessionContext;
use crate::ports::{extension_of, DatasetParser};

/// Command carrying the raw upload.
#[derive(Debug, Clone)]
pub struct UploadCommand {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Handler for dataset uploads.
pub struct UploadHandler {
    parsers: Vec<Arc<dyn DatasetParser>>,
    limits: CapacityLimits,
}

impl UploadHandler {
    pub fn new(parsers: Vec<Arc<dyn DatasetParser>>, limits: CapacityLimits) -> Self {
        Self { parsers, limits }
    }

    /// Parses, checks the caps, then replaces the session's dataset.
    ///
    /// Nothing is published when parsing fails or a cap is exceeded.
    pub fn handle(
        &self,
        session: &mut SessionContext,
        cmd: UploadCommand,
    ) -> Result<DatasetInfo, DomainError> {
        let parser = self
            .parsers
            .iter()
            .find(|p| p.supports(&cmd.filename))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ParseFailed,
                    format!(
                        "Unsupported file type '{}'. Upload a CSV or spreadsheet file",
                        extension_of(&cmd.filename).unwrap_or_default()
                    ),
                )
            })?;

        let dataset = parser.parse(&cmd.bytes, &cmd.filename).map_err(|e| {
            tracing::warn!(filename = %cmd.filename, error = %e, "Upload could not be parsed");
            e
        })?;

        if let Err(e) = self.limits.check(&dataset) {
            tracing::warn!(
                filename = %cmd.filename,
                rows = dataset.row_count(),
                columns = dataset.column_count(),
                "Upload rejected: capacity exceeded"
            );
            return Err(AnalysisError::from(e).into());
        }

        let info = dataset.info();
        session.publish_dataset(dataset);
        tracing::info!(
            filename = %cmd.filename,
            rows = info.rows,
            columns = info.columns,
            session_id = %session.id(),
            "Dataset published"
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ingest::default_parsers;
    use crate::domain::foundation::SessionId;

    fn handler(max_rows: usize) -> UploadHandler {
        UploadHandler::new(default_parsers(), CapacityLimits::new(max_rows, 20))
    }

    fn upload(filename: &str, text: &str) -> UploadCommand {
        UploadCommand {
            filename: filename.to_string(),
            bytes: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn csv_upload_is_published() {
        let mut session = SessionContext::new(SessionId::new());
        let info = handler(100)
            .handle(&mut session, upload("defects.csv", "defect,count\nScratch,3\nDent,1\n"))
            .unwrap();
        assert_eq!(info.rows, 2);
        assert_eq!(info.columns, 2);
        assert_eq!(session.dataset().map(|d| d.row_count()), Some(2));
    }

    #[test]
    fn oversized_upload_is_rejected_and_not_published() {
        let mut session = SessionContext::new(SessionId::new());
        let err = handler(1)
            .handle(&mut session, upload("defects.csv", "defect\nA\nB\n"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);
        assert!(session.dataset().is_none());
    }

    #[test]
    fn rejected_upload_keeps_previous_dataset() {
        let mut session = SessionContext::new(SessionId::new());
        let handler = handler(100);
        handler
            .handle(&mut session, upload("first.csv", "a\n1\n"))
            .unwrap();
        assert!(handler
            .handle(&mut session, upload("second.csv", "a,a\n1,2\n"))
            .is_err());
        assert_eq!(session.dataset().map(|d| d.source_name()), Some("first.csv"));
    }

    #[test]
    fn unknown_extension_is_a_parse_failure() {
        let mut session = SessionContext::new(SessionId::new());
        let err = handler(100)
            .handle(&mut session, upload("notes.txt", "hello"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseFailed);
    }
}
