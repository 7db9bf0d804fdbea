//! The analysis tool screens.

use crate::domain::analysis::{
    reference_table, require_dataset, AnalysisError, CauseCategory, ChecklistSheet,
    ControlChartAnalyzer, DpmoCalculator, DpmoInput, HistogramAnalyzer, ParetoAnalyzer,
    ParetoMeasure, ScatterAnalyzer, StratificationAnalyzer,
};
use crate::domain::dataset::ColumnKind;
use crate::domain::foundation::DomainError;
use crate::domain::navigation::Screen;
use crate::domain::report::Report;
use crate::domain::session::SessionContext;

use super::page::Page;
use super::request::ScreenRequest;
use super::router::{mismatch, ScreenRouter};

/// Explicit choice, else the first candidate.
fn pick(chosen: Option<String>, candidates: &[String], missing: &str) -> Result<String, AnalysisError> {
    chosen
        .or_else(|| candidates.first().cloned())
        .ok_or_else(|| AnalysisError::computation(missing))
}

const NO_NUMERIC: &str = "The dataset has no numeric columns";
const NO_CATEGORICAL: &str = "The dataset has no categorical columns";

pub(super) fn dpmo(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::DpmoCalculator(form) = request else {
        return Err(mismatch(Screen::DpmoCalculator));
    };
    if form.is_blank() {
        page.text
            .push("Enter the defects found, units inspected and opportunities per unit.".to_string());
        page.tables.push(reference_table());
        return Ok(());
    }

    let result = DpmoCalculator::calculate(DpmoInput {
        defects: form.defects.unwrap_or(0),
        units: form.units.unwrap_or(0),
        opportunities: form.opportunities.unwrap_or(0),
    })?;
    router.present(session, page, result.to_report(), "dpmo", form.export)
}

pub(super) fn checklist(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::ChecklistSheet(input) = request else {
        return Err(mismatch(Screen::ChecklistSheet));
    };

    if let Some(new) = input.create {
        let sheet = ChecklistSheet::new(new.kind, new.title, new.fields)?;
        page.success(format!("Checklist sheet '{}' created", sheet.title));
        session.set_checklist(sheet);
    }
    if let Some(values) = input.record {
        let sheet = session
            .checklist_mut()
            .ok_or_else(|| DomainError::validation("checklist", "Create a checklist sheet first"))?;
        sheet.add_record(&values)?;
        page.success(format!("Record {} added", sheet.records.len()));
    }

    let Some(sheet) = session.checklist() else {
        page.info("Create a checklist sheet to start collecting data.");
        return Ok(());
    };
    page.title = format!("{} - {}", Screen::ChecklistSheet.title(), sheet.title);
    page.choice("field", sheet.fields.iter().map(|f| f.name.clone()).collect());

    let mut report = Report::new(sheet.title.clone()).with_table(sheet.records_table());
    if let Some(field) = input.analyse {
        match sheet.analyse_field(&field) {
            Ok(analysis) => {
                let analysis = analysis.to_report();
                report.charts.extend(analysis.charts);
                report.tables.extend(analysis.tables);
                report.interpretation.extend(analysis.interpretation);
            }
            Err(e) => page.fail(&DomainError::from(e)),
        }
    }
    router.present(session, page, report, "checklist", input.export)
}

pub(super) fn pareto(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Pareto(input) = request else {
        return Err(mismatch(Screen::Pareto));
    };
    let dataset = require_dataset(session.dataset(), &router.limits)?;
    let categorical = dataset.names_of_kind(ColumnKind::Categorical);
    page.choice("category_column", categorical.clone());
    page.choice("value_column", dataset.numeric_names());

    let column = pick(input.category_column, &categorical, NO_CATEGORICAL)?;
    let measure = input.measure.unwrap_or(ParetoMeasure::Count);
    let report = ParetoAnalyzer::analyze(dataset, &column, measure)?.to_report();
    router.present(session, page, report, "pareto", input.export)
}

pub(super) fn ishikawa(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Ishikawa(input) = request else {
        return Err(mismatch(Screen::Ishikawa));
    };
    page.choice(
        "category",
        CauseCategory::ALL.iter().map(|c| c.label().to_string()).collect(),
    );

    if input.effect.is_some() || input.cause.is_some() {
        let mut causes = session.causes().clone();
        if let Some(effect) = input.effect {
            causes.set_effect(effect)?;
        }
        if let Some(cause) = &input.cause {
            causes.add_cause(cause.category, &cause.text, &cause.whys)?;
        }
        *session.causes_mut() = causes;
        if let Some(cause) = input.cause {
            page.success(format!("Cause added under {}", cause.category.label()));
        }
    }

    let report = session.causes().to_report(input.filter);
    router.present(session, page, report, "ishikawa", input.export)
}

pub(super) fn histogram(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Histogram(input) = request else {
        return Err(mismatch(Screen::Histogram));
    };
    let dataset = require_dataset(session.dataset(), &router.limits)?;
    let numeric = dataset.numeric_names();
    page.choice("column", numeric.clone());

    let column = pick(input.column, &numeric, NO_NUMERIC)?;
    let report = HistogramAnalyzer::analyze(dataset, &column)?.to_report();
    router.present(session, page, report, "histogram", input.export)
}

pub(super) fn scatter(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Scatter(input) = request else {
        return Err(mismatch(Screen::Scatter));
    };
    let dataset = require_dataset(session.dataset(), &router.limits)?;
    let numeric = dataset.numeric_names();
    page.choice("x_column", numeric.clone());
    page.choice("y_column", numeric.clone());
    page.choice("color_by", dataset.names_of_kind(ColumnKind::Categorical));

    let x = input
        .x_column
        .or_else(|| numeric.first().cloned())
        .unwrap_or_default();
    let y = input
        .y_column
        .or_else(|| numeric.iter().find(|name| **name != x).cloned())
        .unwrap_or_default();
    let report = ScatterAnalyzer::analyze(dataset, &x, &y, input.color_by.as_deref())?.to_report();
    router.present(session, page, report, "scatter", input.export)
}

pub(super) fn control_chart(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::ControlChart(input) = request else {
        return Err(mismatch(Screen::ControlChart));
    };
    let dataset = require_dataset(session.dataset(), &router.limits)?;
    let numeric = dataset.numeric_names();
    page.choice("column", numeric.clone());

    let column = pick(input.column, &numeric, NO_NUMERIC)?;
    let chart = ControlChartAnalyzer::analyze(dataset, &column)?;
    if chart.out_of_control_count() > 0 {
        page.warning(format!(
            "{} samples fall outside the control limits",
            chart.out_of_control_count()
        ));
    }
    router.present(session, page, chart.to_report(), "control_chart", input.export)
}

pub(super) fn stratification(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Stratification(input) = request else {
        return Err(mismatch(Screen::Stratification));
    };
    let dataset = require_dataset(session.dataset(), &router.limits)?;
    let numeric = dataset.numeric_names();
    let categorical = dataset.names_of_kind(ColumnKind::Categorical);
    page.choice("value_column", numeric.clone());
    page.choice("group_column", categorical.clone());

    let value = pick(input.value_column, &numeric, NO_NUMERIC)?;
    let group = pick(input.group_column, &categorical, NO_CATEGORICAL)?;
    let report = StratificationAnalyzer::analyze(dataset, &value, &group)?.to_report();
    router.present(session, page, report, "stratification", input.export)
}
