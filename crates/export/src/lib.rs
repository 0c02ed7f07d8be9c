//! # Ward Export
//!
//! Turns a [`RenderedReport`](ward_core::RenderedReport) snapshot into something that can leave
//! the screen: a PDF document, a plain-text printout, or a printable HTML page.
//!
//! Every function here borrows the snapshot immutably, so a failed export can never disturb
//! the view that produced it.

pub mod pdf;
pub mod print;

pub use pdf::{render_pdf, write_pdf};
pub use print::{escape_html, render_print_html, render_text};

/// Errors raised while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to build PDF: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Suggested download name for a report, e.g. `daily-report-2026-10-16-specialty.pdf`.
pub fn pdf_file_name(report: &ward_core::RenderedReport) -> String {
    format!(
        "daily-report-{}-{}.pdf",
        report.date.format("%Y-%m-%d"),
        report.view_mode
    )
}
