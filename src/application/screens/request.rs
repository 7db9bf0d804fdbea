//! Per-screen input, tagged by screen name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::analysis::{CauseCategory, FieldSpec, ParetoMeasure, SheetKind};
use crate::domain::dataset::{Conversion, Remediation};
use crate::domain::navigation::Screen;
use crate::domain::report::ExportFormat;

/// A request to render one screen, with whatever the user entered on it.
///
/// An input left at its default just displays the screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenRequest {
    Home,
    Login(LoginInput),
    Register(RegisterInput),
    Upload(UploadInput),
    Dashboard(DashboardInput),
    DpmoCalculator(DpmoForm),
    ChecklistSheet(ChecklistInput),
    Pareto(ParetoInput),
    Ishikawa(IshikawaInput),
    Histogram(ColumnInput),
    Scatter(ScatterInput),
    ControlChart(ColumnInput),
    Stratification(StratificationInput),
    Logout,
}

impl ScreenRequest {
    pub fn screen(&self) -> Screen {
        match self {
            ScreenRequest::Home => Screen::Home,
            ScreenRequest::Login(_) => Screen::Login,
            ScreenRequest::Register(_) => Screen::Register,
            ScreenRequest::Upload(_) => Screen::Upload,
            ScreenRequest::Dashboard(_) => Screen::Dashboard,
            ScreenRequest::DpmoCalculator(_) => Screen::DpmoCalculator,
            ScreenRequest::ChecklistSheet(_) => Screen::ChecklistSheet,
            ScreenRequest::Pareto(_) => Screen::Pareto,
            ScreenRequest::Ishikawa(_) => Screen::Ishikawa,
            ScreenRequest::Histogram(_) => Screen::Histogram,
            ScreenRequest::Scatter(_) => Screen::Scatter,
            ScreenRequest::ControlChart(_) => Screen::ControlChart,
            ScreenRequest::Stratification(_) => Screen::Stratification,
            ScreenRequest::Logout => Screen::Logout,
        }
    }

    /// Plain view of `screen` with no input.
    pub fn view(screen: Screen) -> Self {
        match screen {
            Screen::Home => ScreenRequest::Home,
            Screen::Login => ScreenRequest::Login(LoginInput::default()),
            Screen::Register => ScreenRequest::Register(RegisterInput::default()),
            Screen::Upload => ScreenRequest::Upload(UploadInput::default()),
            Screen::Dashboard => ScreenRequest::Dashboard(DashboardInput::default()),
            Screen::DpmoCalculator => ScreenRequest::DpmoCalculator(DpmoForm::default()),
            Screen::ChecklistSheet => ScreenRequest::ChecklistSheet(ChecklistInput::default()),
            Screen::Pareto => ScreenRequest::Pareto(ParetoInput::default()),
            Screen::Ishikawa => ScreenRequest::Ishikawa(IshikawaInput::default()),
            Screen::Histogram => ScreenRequest::Histogram(ColumnInput::default()),
            Screen::Scatter => ScreenRequest::Scatter(ScatterInput::default()),
            Screen::ControlChart => ScreenRequest::ControlChart(ColumnInput::default()),
            Screen::Stratification => ScreenRequest::Stratification(StratificationInput::default()),
            Screen::Logout => ScreenRequest::Logout,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn is_blank(&self) -> bool {
        self.username.trim().is_empty() && self.password.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterInput {
    pub fn is_blank(&self) -> bool {
        self.username.trim().is_empty()
            && self.email.trim().is_empty()
            && self.password.is_empty()
            && self.confirm_password.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    pub column: String,
    pub to: Conversion,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadInput {
    pub remediation: Option<Remediation>,
    pub conversion: Option<ConversionInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variables: Vec<String>,
    pub export: Option<ExportFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpmoForm {
    pub defects: Option<u64>,
    pub units: Option<u64>,
    pub opportunities: Option<u64>,
    pub export: Option<ExportFormat>,
}

impl DpmoForm {
    pub fn is_blank(&self) -> bool {
        self.defects.is_none() && self.units.is_none() && self.opportunities.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSheet {
    pub kind: SheetKind,
    #[serde(default)]
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistInput {
    pub create: Option<NewSheet>,
    /// Field name to raw value.
    pub record: Option<HashMap<String, String>>,
    pub analyse: Option<String>,
    pub export: Option<ExportFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParetoInput {
    pub category_column: Option<String>,
    pub measure: Option<ParetoMeasure>,
    pub export: Option<ExportFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCause {
    pub category: CauseCategory,
    pub text: String,
    #[serde(default)]
    pub whys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IshikawaInput {
    pub effect: Option<String>,
    pub cause: Option<NewCause>,
    pub filter: Option<CauseCategory>,
    pub export: Option<ExportFormat>,
}

/// Input for screens that analyse a single numeric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnInput {
    pub column: Option<String>,
    pub export: Option<ExportFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterInput {
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub color_by: Option<String>,
    pub export: Option<ExportFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StratificationInput {
    pub value_column: Option<String>,
    pub group_column: Option<String>,
    pub export: Option<ExportFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_round_trips_screen() {
        for screen in crate::domain::navigation::MenuState::Authenticated.screens() {
            assert_eq!(ScreenRequest::view(*screen).screen(), *screen);
        }
    }

    #[test]
    fn bare_tag_deserializes_to_default_input() {
        let request: ScreenRequest = serde_json::from_str(r#"{"screen":"histogram"}"#).unwrap();
        assert_eq!(request, ScreenRequest::Histogram(ColumnInput::default()));
    }

    #[test]
    fn pareto_request_deserializes_measure() {
        let request: ScreenRequest = serde_json::from_str(
            r#"{"screen":"pareto","category_column":"Defect","measure":{"kind":"sum","value_column":"Cost"},"export":"csv"}"#,
        )
        .unwrap();
        let ScreenRequest::Pareto(input) = request else {
            panic!("expected pareto");
        };
        assert_eq!(input.category_column.as_deref(), Some("Defect"));
        assert_eq!(
            input.measure,
            Some(ParetoMeasure::Sum {
                value_column: "Cost".to_string()
            })
        );
        assert_eq!(input.export, Some(ExportFormat::Csv));
    }
}
