//! Upload overview and the KPI dashboard.

use crate::domain::analysis::{require_dataset, AnalysisError, DashboardBuilder};
use crate::domain::dataset::{Dataset, Remediation};
use crate::domain::foundation::DomainError;
use crate::domain::navigation::Screen;
use crate::domain::report::Table;
use crate::domain::session::SessionContext;

use super::page::Page;
use super::request::ScreenRequest;
use super::router::{mismatch, ScreenRouter};

fn info_table(dataset: &Dataset) -> Table {
    let info = dataset.info();
    let mut table = Table::new("Dataset information", &["Metric", "Value"]);
    table.push_row(vec!["Rows".into(), info.rows.to_string()]);
    table.push_row(vec!["Columns".into(), info.columns.to_string()]);
    table.push_row(vec!["Column types".into(), info.distinct_kinds.to_string()]);
    table
}

fn titled(mut table: Table, title: impl Into<String>) -> Table {
    table.title = title.into();
    table
}

fn remediation_notice(strategy: Remediation) -> &'static str {
    match strategy {
        Remediation::DropRows => "Rows with missing values removed",
        Remediation::MeanFill => "Missing numeric values filled with the column mean",
        Remediation::MedianFill => "Missing numeric values filled with the column median",
    }
}

pub(super) fn upload(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Upload(input) = request else {
        return Err(mismatch(Screen::Upload));
    };
    let Some(dataset) = session.dataset() else {
        page.info(format!(
            "Upload a CSV or Excel file (at most {} rows and {} columns).",
            router.limits.max_rows, router.limits.max_columns
        ));
        return Ok(());
    };

    page.choice("column", dataset.column_names());
    page.tables.push(info_table(dataset));
    page.tables.push(dataset.preview(router.preview_rows));
    page.tables.push(dataset.schema_table());
    page.tables.push(dataset.missing_table());
    page.tables.push(dataset.describe_table());

    if let Some(strategy) = input.remediation {
        let cleaned = dataset.remediate(strategy);
        page.success(format!(
            "{}: {} rows remain",
            remediation_notice(strategy),
            cleaned.row_count()
        ));
        page.tables.push(titled(cleaned.preview(router.preview_rows), "Preview after cleaning"));
        page.tables.push(titled(cleaned.missing_table(), "Missing values after cleaning"));
    }

    if let Some(conversion) = input.conversion {
        let converted = dataset
            .convert(&conversion.column, conversion.to)
            .map_err(AnalysisError::from)?;
        page.success(format!("Column '{}' converted", conversion.column));
        page.tables.push(titled(
            converted.preview(router.preview_rows),
            "Preview after conversion",
        ));
        page.tables.push(titled(converted.schema_table(), "Columns after conversion"));
    }
    Ok(())
}

pub(super) fn dashboard(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Dashboard(input) = request else {
        return Err(mismatch(Screen::Dashboard));
    };
    let dataset = require_dataset(session.dataset(), &router.limits)?;
    page.choice("variables", dataset.numeric_names());

    let dashboard = DashboardBuilder::build(
        dataset,
        input.title.as_deref(),
        input.description.as_deref(),
        &input.variables,
    )?;
    page.title = dashboard.title.clone();
    router.present(session, page, dashboard.to_report(), "dashboard", input.export)
}
