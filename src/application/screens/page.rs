//! What a screen render hands back to the presentation layer.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::navigation::Screen;
use crate::domain::report::{Chart, Report, Table};
use crate::domain::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Inline message shown above the screen content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

impl From<&DomainError> for Notice {
    fn from(err: &DomainError) -> Self {
        let severity = if err.code.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };
        Notice::new(severity, err.message())
    }
}

/// One rendered screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub screen: Screen,
    pub title: String,
    pub username: Option<String>,
    pub menu: Vec<Screen>,
    pub notices: Vec<Notice>,
    /// Selectable values per input, e.g. the numeric columns for a histogram.
    pub choices: BTreeMap<String, Vec<String>>,
    pub tables: Vec<Table>,
    pub charts: Vec<Chart>,
    pub text: Vec<String>,
    /// Filenames ready under `/downloads/`.
    pub downloads: Vec<String>,
    pub redirect: Option<Screen>,
}

impl Page {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            title: screen.title().to_string(),
            username: None,
            menu: Vec::new(),
            notices: Vec::new(),
            choices: BTreeMap::new(),
            tables: Vec::new(),
            charts: Vec::new(),
            text: Vec::new(),
            downloads: Vec::new(),
            redirect: None,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::new(Severity::Info, message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::new(Severity::Success, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::new(Severity::Warning, message));
    }

    /// Reports a failed step inline. A missing dataset also points to Upload.
    pub fn fail(&mut self, err: &DomainError) {
        self.notices.push(Notice::from(err));
        if err.code == ErrorCode::DataAbsent {
            self.redirect = Some(Screen::Upload);
        }
    }

    pub fn choice(&mut self, input: &str, values: Vec<String>) {
        self.choices.insert(input.to_string(), values);
    }

    /// Moves a report's content onto the page.
    pub fn absorb(&mut self, report: Report) {
        if let Some(description) = report.description {
            self.text.push(description);
        }
        self.charts.extend(report.charts);
        self.tables.extend(report.tables);
        self.text.extend(report.interpretation);
    }

    pub fn has_severity(&self, severity: Severity) -> bool {
        self.notices.iter().any(|n| n.severity == severity)
    }

    pub(super) fn finish(mut self, session: &SessionContext) -> Self {
        self.username = session.username().map(str::to_string);
        self.menu = session.menu().screens().to_vec();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_codes_become_warning_notices() {
        let notice = Notice::from(&DomainError::new(ErrorCode::CapacityExceeded, "Too many rows"));
        assert_eq!(notice.severity, Severity::Warning);
        let notice = Notice::from(&DomainError::new(ErrorCode::ComputationFailed, "Bad column"));
        assert_eq!(notice.severity, Severity::Error);
    }

    #[test]
    fn data_absent_redirects_to_upload() {
        let mut page = Page::new(Screen::Pareto);
        page.fail(&DomainError::new(ErrorCode::DataAbsent, "No dataset loaded"));
        assert_eq!(page.redirect, Some(Screen::Upload));
        assert!(page.has_severity(Severity::Warning));
    }

    #[test]
    fn absorb_moves_report_content() {
        let mut page = Page::new(Screen::Histogram);
        let report = Report::new("Histogram")
            .with_description("Line 3")
            .with_table(Table::new("Summary", &["Metric", "Value"]))
            .with_interpretation(["Centered."]);
        page.absorb(report);
        assert_eq!(page.tables.len(), 1);
        assert_eq!(page.text, vec!["Line 3".to_string(), "Centered.".to_string()]);
    }
}
