//! Printable forms of a report: plain text for terminals and line printers, and a standalone
//! HTML page that opens the browser's print dialog.

use std::fmt::Write as _;
use ward_core::RenderedReport;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn render_text(report: &RenderedReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(
        out,
        "Date: {}    {}",
        report.date.format("%Y-%m-%d"),
        report.view_mode.label()
    );
    let _ = writeln!(
        out,
        "Patients listed: {}    Admitted on date: {}",
        report.total_patients, report.admitted_on_date
    );
    let _ = writeln!(out, "{}", "=".repeat(78));

    if report.sections.is_empty() {
        let _ = writeln!(out, "No patients for this date.");
        return out;
    }

    for section in &report.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", section.heading, section.patients.len());
        let _ = writeln!(out, "{}", "-".repeat(78));
        if section.patients.is_empty() {
            let _ = writeln!(out, "  No patients");
            continue;
        }
        let _ = writeln!(
            out,
            "  {:<28} {:<12} {:<17} {:<14} {}",
            "Name", "MRN", "Admitted", "Specialty", "Bed"
        );
        for p in &section.patients {
            let _ = writeln!(
                out,
                "  {:<28} {:<12} {:<17} {:<14} {}",
                p.name,
                p.mrn,
                p.admitted,
                p.specialty,
                p.bed_number.as_deref().unwrap_or("-")
            );
        }
    }
    out
}

/// Standalone HTML page for the report; the browser print dialog opens on load.
pub fn render_print_html(report: &RenderedReport) -> String {
    let mut body = String::new();

    if report.sections.is_empty() {
        body.push_str("<p>No patients for this date.</p>\n");
    }
    for section in &report.sections {
        let _ = writeln!(
            body,
            "<h2>{} ({})</h2>",
            escape_html(&section.heading),
            section.patients.len()
        );
        if section.patients.is_empty() {
            body.push_str("<p class=\"empty\">No patients</p>\n");
            continue;
        }
        body.push_str(
            "<table>\n<thead><tr><th>Name</th><th>MRN</th><th>Admitted</th><th>Specialty</th><th>Bed</th></tr></thead>\n<tbody>\n",
        );
        for p in &section.patients {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&p.name),
                escape_html(&p.mrn),
                escape_html(&p.admitted),
                escape_html(&p.specialty),
                escape_html(p.bed_number.as_deref().unwrap_or("-"))
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} {date}</title>
<style>
body {{ font-family: Helvetica, Arial, sans-serif; margin: 2em; color: #1f2937; }}
table {{ border-collapse: collapse; width: 100%; margin-bottom: 1.5em; }}
th, td {{ border-bottom: 1px solid #d1d5db; padding: 4px 8px; text-align: left; }}
.empty {{ color: #6b7280; }}
</style>
</head>
<body onload="window.print()">
<h1>{title}</h1>
<p>Date: {date} &middot; {mode} &middot; Patients listed: {total} &middot; Admitted on date: {admitted}</p>
{body}</body>
</html>
"#,
        title = escape_html(&report.title),
        date = report.date.format("%Y-%m-%d"),
        mode = report.view_mode.label(),
        total = report.total_patients,
        admitted = report.admitted_on_date,
        body = body,
    )
}
