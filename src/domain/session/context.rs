//! Per-session working state.
//!
//! A `SessionContext` owns everything one analyst builds up while using the
//! tool: who is logged in, the active dataset, the Ishikawa causes graph, the
//! checklist sheet and any exports waiting to be downloaded.
//!
//! # Invariants
//!
//! - `username` is `Some` exactly when `menu` is `Authenticated`
//! - Publishing a dataset replaces the previous one wholesale
//! - Logging out drops the dataset and all derived working state

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::analysis::{CausesGraph, ChecklistSheet};
use crate::domain::dataset::Dataset;
use crate::domain::foundation::{SessionId, StateMachine, Timestamp, ValidationError};
use crate::domain::navigation::MenuState;
use crate::domain::report::ExportFormat;

/// A rendered export held until the user fetches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Download {
    pub filename: String,
    pub format: ExportFormat,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn new(stem: &str, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            filename: format!("{}.{}", stem, format.extension()),
            format,
            bytes,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    id: SessionId,
    menu: MenuState,
    username: Option<String>,
    dataset: Option<Dataset>,
    causes: CausesGraph,
    checklist: Option<ChecklistSheet>,
    downloads: HashMap<String, Download>,
    opened_at: Timestamp,
}

impl SessionContext {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            menu: MenuState::Anonymous,
            username: None,
            dataset: None,
            causes: CausesGraph::default(),
            checklist: None,
            downloads: HashMap::new(),
            opened_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.menu == MenuState::Authenticated
    }

    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// Moves the menu to `Authenticated` for `username`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` on `state_transition` if already logged in.
    pub fn log_in(&mut self, username: impl Into<String>) -> Result<(), ValidationError> {
        self.menu = self.menu.transition_to(MenuState::Authenticated)?;
        self.username = Some(username.into());
        Ok(())
    }

    /// Returns to the anonymous menu, discarding the user's working state.
    pub fn log_out(&mut self) -> Result<(), ValidationError> {
        self.menu = self.menu.transition_to(MenuState::Anonymous)?;
        self.username = None;
        self.dataset = None;
        self.causes = CausesGraph::default();
        self.checklist = None;
        self.downloads.clear();
        Ok(())
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Makes `dataset` the active one, returning the dataset it replaced.
    pub fn publish_dataset(&mut self, dataset: Dataset) -> Option<Dataset> {
        self.dataset.replace(dataset)
    }

    pub fn causes(&self) -> &CausesGraph {
        &self.causes
    }

    pub fn causes_mut(&mut self) -> &mut CausesGraph {
        &mut self.causes
    }

    pub fn checklist(&self) -> Option<&ChecklistSheet> {
        self.checklist.as_ref()
    }

    pub fn checklist_mut(&mut self) -> Option<&mut ChecklistSheet> {
        self.checklist.as_mut()
    }

    pub fn set_checklist(&mut self, sheet: ChecklistSheet) {
        self.checklist = Some(sheet);
    }

    /// Stores an export; a later one with the same filename overwrites it.
    pub fn add_download(&mut self, download: Download) -> String {
        let filename = download.filename.clone();
        self.downloads.insert(filename.clone(), download);
        filename
    }

    pub fn download(&self, filename: &str) -> Option<&Download> {
        self.downloads.get(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{CauseCategory, FieldKind, FieldSpec, SheetKind};
    use crate::domain::dataset::Column;

    fn dataset() -> Dataset {
        Dataset::new(
            "line.csv",
            vec![Column::numeric("width", vec![Some(1.0), Some(2.0)])],
        )
        .unwrap()
    }

    #[test]
    fn new_session_is_anonymous() {
        let session = SessionContext::new(SessionId::new());
        assert_eq!(session.menu(), MenuState::Anonymous);
        assert!(session.username().is_none());
        assert!(session.dataset().is_none());
    }

    #[test]
    fn log_in_sets_username() {
        let mut session = SessionContext::new(SessionId::new());
        session.log_in("ana01").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("ana01"));
    }

    #[test]
    fn double_log_in_is_rejected() {
        let mut session = SessionContext::new(SessionId::new());
        session.log_in("ana01").unwrap();
        assert!(session.log_in("bob01").is_err());
        assert_eq!(session.username(), Some("ana01"));
    }

    #[test]
    fn log_out_clears_working_state() {
        let mut session = SessionContext::new(SessionId::new());
        session.log_in("ana01").unwrap();
        session.publish_dataset(dataset());
        session
            .causes_mut()
            .add_cause(CauseCategory::Methods, "No standard", &[])
            .unwrap();
        session.set_checklist(
            ChecklistSheet::new(
                SheetKind::DefectCount,
                "",
                vec![FieldSpec::new("count", FieldKind::Numeric)],
            )
            .unwrap(),
        );
        session.add_download(Download::new("pareto", ExportFormat::Csv, b"a,b\n".to_vec()));

        session.log_out().unwrap();

        assert_eq!(session.menu(), MenuState::Anonymous);
        assert!(session.username().is_none());
        assert!(session.dataset().is_none());
        assert!(session.causes().is_empty());
        assert!(session.checklist().is_none());
        assert!(session.download("pareto.csv").is_none());
    }

    #[test]
    fn log_out_while_anonymous_fails() {
        let mut session = SessionContext::new(SessionId::new());
        assert!(session.log_out().is_err());
    }

    #[test]
    fn publish_replaces_previous_dataset() {
        let mut session = SessionContext::new(SessionId::new());
        assert!(session.publish_dataset(dataset()).is_none());
        let previous = session.publish_dataset(dataset());
        assert!(previous.is_some());
    }

    #[test]
    fn download_filename_uses_format_extension() {
        let mut session = SessionContext::new(SessionId::new());
        let name = session.add_download(Download::new("dpmo", ExportFormat::Pdf, vec![1, 2]));
        assert_eq!(name, "dpmo.pdf");
        assert_eq!(session.download("dpmo.pdf").map(|d| d.bytes.len()), Some(2));
    }
}
