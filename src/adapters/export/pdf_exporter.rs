//! PDF export: title, description, the first plot drawn with vector
//! primitives, every table and the interpretation lines.
//!
//! Uses the built-in Helvetica face, so text is reduced to Latin-1.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::domain::foundation::DomainError;
use crate::domain::report::{
    fmt2, Chart, ExportFormat, PlotSpec, Report, SeriesData, SeriesKind, Table,
};
use crate::domain::stats;
use crate::ports::ReportExporter;

use super::ExportError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const CHART_HEIGHT: f32 = 90.0;
const ROW_HEIGHT: f32 = 5.0;

const PALETTE: [(f32, f32, f32); 5] = [
    (0.12, 0.47, 0.71),
    (1.00, 0.50, 0.05),
    (0.17, 0.63, 0.17),
    (0.84, 0.15, 0.16),
    (0.58, 0.40, 0.74),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReportExporter;

impl PdfReportExporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportExporter for PdfReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>, DomainError> {
        Ok(render_pdf(report)?)
    }
}

fn pdf_error(err: printpdf::Error) -> ExportError {
    ExportError::Pdf(format!("{:?}", err))
}

/// Replaces characters the built-in fonts cannot encode.
fn latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '→' => "->".to_string(),
            'σ' => "sigma".to_string(),
            '≥' => ">=".to_string(),
            '≤' => "<=".to_string(),
            '±' => "+/-".to_string(),
            c if (c as u32) < 0x100 => c.to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        cut.push('.');
        cut
    }
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(y)), false)
}

/// Writes text top-down, starting new pages when the cursor runs out.
struct Canvas {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    layer: PdfLayerReference,
    cursor: f32,
    pages: usize,
}

impl Canvas {
    fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(latin1(title), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            font,
            bold,
            layer,
            cursor: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn reserve(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            self.pages += 1;
            let (page, layer) = self.doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}", self.pages),
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer
            .use_text(latin1(text), size, Mm(x), Mm(y), &self.font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let height = size * 0.5;
        self.reserve(height);
        self.cursor -= height;
        let font = if bold { &self.bold } else { &self.font };
        self.layer
            .use_text(latin1(text), size, Mm(MARGIN), Mm(self.cursor), font);
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn stroke(&self, points: Vec<(Point, bool)>, color: Color, thickness: f32) {
        self.layer.set_outline_color(color);
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
    }

    fn fill_rect(&self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.layer.set_fill_color(color);
        self.layer.add_polygon(Polygon {
            rings: vec![vec![point(x, y), point(x + w, y), point(x + w, y + h), point(x, y + h)]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn table(&mut self, table: &Table) {
        if table.headers.is_empty() {
            return;
        }
        self.reserve(ROW_HEIGHT * 3.0);
        self.gap(2.0);
        self.line(&table.title, 11.0, true);
        self.gap(1.0);

        let width = (PAGE_WIDTH - 2.0 * MARGIN) / table.headers.len() as f32;
        let max_chars = ((width / 1.8) as usize).max(4);
        let draw_row = |canvas: &mut Canvas, cells: &[String], bold: bool| {
            canvas.reserve(ROW_HEIGHT);
            canvas.cursor -= ROW_HEIGHT;
            let font = if bold { &canvas.bold } else { &canvas.font };
            for (i, cell) in cells.iter().enumerate() {
                canvas.layer.use_text(
                    latin1(&truncate(cell, max_chars)),
                    8.0,
                    Mm(MARGIN + width * i as f32),
                    Mm(canvas.cursor),
                    font,
                );
            }
        };
        draw_row(self, &table.headers, true);
        for row in &table.rows {
            draw_row(self, row, false);
        }
    }

    fn plot(&mut self, plot: &PlotSpec) {
        self.reserve(CHART_HEIGHT + 15.0);
        self.gap(2.0);
        self.line(&plot.title, 11.0, true);
        self.gap(4.0);

        let frame = Frame {
            x: MARGIN + 12.0,
            y: self.cursor - CHART_HEIGHT,
            w: PAGE_WIDTH - 2.0 * MARGIN - 24.0,
            h: CHART_HEIGHT,
        };
        self.cursor = frame.y - 10.0;

        let primary = Scale::fit(values_on_axis(plot, false));
        let secondary = Scale::fit(values_on_axis(plot, true));
        let x_scale = Scale::fit(x_values(plot));
        let slots = slot_count(plot).max(1);

        let black = rgb((0.0, 0.0, 0.0));
        self.stroke(
            vec![
                point(frame.x, frame.y + frame.h),
                point(frame.x, frame.y),
                point(frame.x + frame.w, frame.y),
                point(frame.x + frame.w, frame.y + frame.h),
            ],
            black.clone(),
            0.5,
        );
        self.text_at(&fmt2(primary.max), 6.0, MARGIN, frame.y + frame.h - 2.0);
        self.text_at(&fmt2(primary.min), 6.0, MARGIN, frame.y);
        self.text_at(&plot.y_label, 7.0, frame.x, frame.y + frame.h + 2.0);
        self.text_at(&plot.x_label, 7.0, frame.x + frame.w / 2.0, frame.y - 8.0);

        let slot_width = frame.w / slots as f32;
        for (i, series) in plot.series.iter().enumerate() {
            let color = rgb(PALETTE[i % PALETTE.len()]);
            let scale = if series.secondary_axis { &secondary } else { &primary };
            match &series.data {
                SeriesData::Categorical { labels, values } => match series.kind {
                    SeriesKind::Bar => {
                        let base = scale.map(0.0);
                        for (j, value) in values.iter().enumerate() {
                            let top = scale.map(*value);
                            self.fill_rect(
                                frame.x + slot_width * (j as f32 + 0.15),
                                frame.y + frame.h * base,
                                slot_width * 0.7,
                                frame.h * (top - base),
                                color.clone(),
                            );
                        }
                        if labels.len() <= 15 {
                            for (j, label) in labels.iter().enumerate() {
                                self.text_at(
                                    &truncate(label, 10),
                                    5.0,
                                    frame.x + slot_width * j as f32,
                                    frame.y - 4.0,
                                );
                            }
                        }
                    }
                    _ => {
                        let points = values
                            .iter()
                            .enumerate()
                            .map(|(j, v)| {
                                point(
                                    frame.x + slot_width * (j as f32 + 0.5),
                                    frame.y + frame.h * scale.map(*v),
                                )
                            })
                            .collect();
                        self.stroke(points, color.clone(), 0.8);
                    }
                },
                SeriesData::Xy { points } => {
                    let mapped: Vec<(f32, f32)> = points
                        .iter()
                        .map(|(x, y)| {
                            (
                                frame.x + frame.w * x_scale.map(*x),
                                frame.y + frame.h * scale.map(*y),
                            )
                        })
                        .collect();
                    if series.kind == SeriesKind::Scatter {
                        for (x, y) in mapped {
                            self.fill_rect(x - 0.6, y - 0.6, 1.2, 1.2, color.clone());
                        }
                    } else {
                        let points = mapped.into_iter().map(|(x, y)| point(x, y)).collect();
                        self.stroke(points, color.clone(), 0.6);
                    }
                }
                SeriesData::Samples { groups } => {
                    let width = frame.w / groups.len().max(1) as f32;
                    for (j, (label, samples)) in groups.iter().enumerate() {
                        let (Some(low), Some(q1), Some(mid), Some(q3), Some(high)) = (
                            stats::min(samples),
                            stats::quantile(samples, 0.25),
                            stats::median(samples),
                            stats::quantile(samples, 0.75),
                            stats::max(samples),
                        ) else {
                            continue;
                        };
                        let left = frame.x + width * (j as f32 + 0.25);
                        let centre = frame.x + width * (j as f32 + 0.5);
                        let y = |v: f64| frame.y + frame.h * scale.map(v);
                        self.stroke(vec![point(centre, y(low)), point(centre, y(high))], black.clone(), 0.4);
                        self.fill_rect(left, y(q1), width * 0.5, (y(q3) - y(q1)).max(0.3), color.clone());
                        self.stroke(
                            vec![point(left, y(mid)), point(left + width * 0.5, y(mid))],
                            black.clone(),
                            0.6,
                        );
                        self.text_at(&truncate(label, 10), 5.0, left, frame.y - 4.0);
                    }
                }
            }
        }

        let guide_color = rgb((0.8, 0.1, 0.1));
        for guide in &plot.guides {
            let scale = if guide.secondary_axis { &secondary } else { &primary };
            let y = frame.y + frame.h * scale.map(guide.value);
            self.stroke(vec![point(frame.x, y), point(frame.x + frame.w, y)], guide_color.clone(), 0.4);
            self.text_at(&guide.label, 6.0, frame.x + frame.w + 1.0, y);
        }
    }
}

struct Frame {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// Linear map from data space onto `0.0..=1.0`.
struct Scale {
    min: f64,
    max: f64,
}

impl Scale {
    fn fit(values: Vec<f64>) -> Self {
        let finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        // Axes always include zero.
        let min = stats::min(&finite).unwrap_or(0.0).min(0.0);
        let max = stats::max(&finite).unwrap_or(1.0).max(0.0);
        if max - min < f64::EPSILON {
            Self {
                min: min - 1.0,
                max: max + 1.0,
            }
        } else {
            Self { min, max }
        }
    }

    fn map(&self, value: f64) -> f32 {
        if !value.is_finite() {
            return if value > 0.0 { 1.0 } else { 0.0 };
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0) as f32
    }
}

fn values_on_axis(plot: &PlotSpec, secondary: bool) -> Vec<f64> {
    let mut values: Vec<f64> = plot
        .series
        .iter()
        .filter(|s| s.secondary_axis == secondary)
        .flat_map(|s| match &s.data {
            SeriesData::Categorical { values, .. } => values.clone(),
            SeriesData::Xy { points } => points.iter().map(|(_, y)| *y).collect(),
            SeriesData::Samples { groups } => {
                groups.iter().flat_map(|(_, v)| v.iter().copied()).collect()
            }
        })
        .collect();
    values.extend(
        plot.guides
            .iter()
            .filter(|g| g.secondary_axis == secondary)
            .map(|g| g.value),
    );
    values
}

fn x_values(plot: &PlotSpec) -> Vec<f64> {
    plot.series
        .iter()
        .flat_map(|s| match &s.data {
            SeriesData::Xy { points } => points.iter().map(|(x, _)| *x).collect(),
            _ => Vec::new(),
        })
        .collect()
}

fn slot_count(plot: &PlotSpec) -> usize {
    plot.series
        .iter()
        .map(|s| match &s.data {
            SeriesData::Categorical { values, .. } => values.len(),
            SeriesData::Samples { groups } => groups.len(),
            SeriesData::Xy { .. } => 0,
        })
        .max()
        .unwrap_or(0)
}

fn render_pdf(report: &Report) -> Result<Vec<u8>, ExportError> {
    let mut canvas = Canvas::new(&report.title)?;
    canvas.line(&report.title, 16.0, true);
    canvas.gap(2.0);
    if let Some(description) = &report.description {
        canvas.line(description, 10.0, false);
        canvas.gap(2.0);
    }

    if let Some(plot) = report.charts.iter().find_map(|c| match c {
        Chart::Plot(plot) => Some(plot),
        Chart::Graph(_) => None,
    }) {
        canvas.plot(plot);
    }

    for table in &report.tables {
        canvas.table(table);
    }

    if !report.interpretation.is_empty() {
        canvas.gap(3.0);
        canvas.line("Interpretation", 11.0, true);
        for line in &report.interpretation {
            canvas.line(line, 9.0, false);
        }
    }

    canvas.doc.save_to_bytes().map_err(pdf_error)
}
