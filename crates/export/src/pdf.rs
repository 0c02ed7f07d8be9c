//! PDF rendering of a daily report.
//!
//! Text is set in the built-in Helvetica faces, which only cover printable ASCII reliably.
//! Any other character is written as `?`; the printable text and HTML exports keep names intact.

use crate::{ExportError, ExportResult};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use ward_core::{PatientSummary, RenderedReport};

// A4 portrait
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_RIGHT: f32 = 195.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 6.0;

const COLOR_TITLE: (u8, u8, u8) = (31, 41, 55);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);

/// Column x positions (mm) and headers of the patient table.
const COLUMNS: [(f32, &str); 5] = [
    (MARGIN_LEFT, "Name"),
    (75.0, "MRN"),
    (105.0, "Admitted"),
    (145.0, "Specialty"),
    (182.0, "Bed"),
];

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

/// Truncate to at most `max` characters so a value cannot run into the next column.
fn fit(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}

/// Replace characters the built-in fonts cannot draw.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

struct Writer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl Writer {
    fn new(title: &str) -> ExportResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            font,
            font_bold,
            y: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        })
    }

    fn text(&self, text: &str, x: f32, size: f32, bold: bool, color: (u8, u8, u8)) {
        let font = if bold { &self.font_bold } else { &self.font };
        self.layer.set_fill_color(rgb(color));
        self.layer
            .use_text(pdf_safe(text), size, Mm(x), Mm(self.y), font);
    }

    fn rule(&self) {
        self.layer.set_outline_color(rgb(COLOR_GRAY));
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT), Mm(self.y)), false),
                (Point::new(Mm(MARGIN_RIGHT), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    /// Start a new page when fewer than `needed` mm remain.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed >= MARGIN_BOTTOM {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    fn table_header(&mut self) {
        for (x, header) in COLUMNS {
            self.text(header, x, 9.0, true, COLOR_BLACK);
        }
        self.y -= 2.0;
        self.rule();
        self.y -= 4.0;
    }

    fn patient_row(&mut self, patient: &PatientSummary) {
        let cells = [
            fit(&patient.name, 32),
            fit(&patient.mrn, 16),
            patient.admitted.clone(),
            fit(&patient.specialty, 20),
            fit(patient.bed_number.as_deref().unwrap_or("-"), 6),
        ];
        for ((x, _), cell) in COLUMNS.iter().zip(cells.iter()) {
            self.text(cell, *x, 9.0, false, COLOR_BLACK);
        }
        self.y -= ROW_HEIGHT;
    }
}

/// Render `report` as a PDF document.
pub fn render_pdf(report: &RenderedReport) -> ExportResult<Vec<u8>> {
    let mut w = Writer::new(&report.title)?;

    w.text(&report.title, MARGIN_LEFT, 18.0, true, COLOR_TITLE);
    w.y -= 9.0;
    w.text(
        &format!("Date: {}", report.date.format("%Y-%m-%d")),
        MARGIN_LEFT,
        11.0,
        false,
        COLOR_BLACK,
    );
    w.text(report.view_mode.label(), 120.0, 11.0, false, COLOR_BLACK);
    w.y -= 6.0;
    w.text(
        &format!(
            "Patients listed: {}    Admitted on date: {}",
            report.total_patients, report.admitted_on_date
        ),
        MARGIN_LEFT,
        11.0,
        false,
        COLOR_BLACK,
    );
    w.y -= 8.0;
    w.rule();
    w.y -= 8.0;

    if report.sections.is_empty() {
        w.text("No patients for this date.", MARGIN_LEFT, 11.0, false, COLOR_GRAY);
    }

    for section in &report.sections {
        // Heading, table header and at least one row stay together.
        w.ensure_space(7.0 + 6.0 + ROW_HEIGHT);
        w.text(
            &format!("{} ({})", section.heading, section.patients.len()),
            MARGIN_LEFT,
            13.0,
            true,
            COLOR_TITLE,
        );
        w.y -= 7.0;

        if section.patients.is_empty() {
            w.text("No patients", MARGIN_LEFT, 9.0, false, COLOR_GRAY);
            w.y -= ROW_HEIGHT + 2.0;
            continue;
        }

        w.table_header();
        for patient in &section.patients {
            if w.y - ROW_HEIGHT < MARGIN_BOTTOM {
                w.ensure_space(ROW_HEIGHT * 2.0);
                w.table_header();
            }
            w.patient_row(patient);
        }
        w.y -= 4.0;
    }

    tracing::debug!(
        pages = w.pages,
        sections = report.sections.len(),
        "rendered report PDF"
    );
    w.doc
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Render `report` and write it to `path`.
pub fn write_pdf(report: &RenderedReport, path: &Path) -> ExportResult<()> {
    let bytes = render_pdf(report)?;
    let mut writer = BufWriter::new(File::create(path)?);
    std::io::Write::write_all(&mut writer, &bytes)?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}
