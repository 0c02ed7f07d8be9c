//! Server-side HTML for the ward views.

use chrono::Local;
use std::fmt::Write as _;
use ward_core::{DischargeView, Patient, PatientSummary, RenderedReport, Route, ViewMode};
use ward_export::escape_html;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: Helvetica, Arial, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }}
nav {{ background: #1f2937; padding: 0.75em 2em; }}
nav a {{ color: #f9fafb; margin-right: 1.5em; text-decoration: none; }}
main {{ padding: 2em; }}
.card {{ background: #fff; border-radius: 8px; padding: 1.5em; box-shadow: 0 1px 3px rgba(0,0,0,0.1); margin-bottom: 1.5em; }}
.error {{ color: #ef4444; }}
.empty {{ color: #6b7280; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border-bottom: 1px solid #e5e7eb; padding: 6px 8px; text-align: left; }}
.actions a {{ margin-left: 1em; }}
</style>
</head>
<body>
<nav><a href="{home}">Home</a><a href="{report}">Daily Report</a><a href="{discharge}">Discharge</a></nav>
<main>
{body}</main>
</body>
</html>
"#,
        title = escape_html(title),
        home = Route::Home.path(),
        report = Route::Report.path(),
        discharge = Route::Discharge.path(),
        body = body,
    )
}

/// A page whose whole body is one error message.
pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!("<div class=\"error\">{}</div>\n", escape_html(message)),
    )
}

fn patient_rows(patients: &[PatientSummary]) -> String {
    let mut out = String::from(
        "<table>\n<thead><tr><th>Name</th><th>MRN</th><th>Admitted</th><th>Specialty</th><th>Bed</th></tr></thead>\n<tbody>\n",
    );
    for p in patients {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&p.name),
            escape_html(&p.mrn),
            escape_html(&p.admitted),
            escape_html(&p.specialty),
            escape_html(p.bed_number.as_deref().unwrap_or("-"))
        );
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn summaries(patients: &[Patient]) -> Vec<PatientSummary> {
    patients
        .iter()
        .map(|p| PatientSummary::from_patient_in(p, &Local))
        .collect()
}

fn active_patients_card(patients: &[Patient]) -> String {
    let mut out = String::from("<div class=\"card\">\n<h3>Active Patients</h3>\n");
    if patients.is_empty() {
        out.push_str("<p class=\"empty\">No active patients.</p>\n");
    } else {
        out.push_str(&patient_rows(&summaries(patients)));
    }
    out.push_str("</div>\n");
    out
}

pub fn home_page(patients: &[Patient]) -> String {
    let body = format!(
        "<h2>Ward Overview</h2>\n<p>{count} active patient(s).</p>\n{list}",
        count = patients.len(),
        list = active_patients_card(patients),
    );
    layout("Ward", &body)
}

fn report_query(report: &RenderedReport) -> String {
    format!(
        "date={}&amp;view={}",
        report.date.format("%Y-%m-%d"),
        report.view_mode
    )
}

pub fn report_page(report: &RenderedReport) -> String {
    let mut body = String::new();
    let query = report_query(report);
    let _ = write!(
        body,
        r#"<h2>{title}</h2>
<p class="actions"><a href="{base}/pdf?{query}">Download PDF</a><a href="{base}/print?{query}" target="_blank">Print</a></p>
<div class="card">
<form method="get" action="{base}">
<input type="date" name="date" value="{date}">
<select name="view">
"#,
        title = escape_html(&report.title),
        base = Route::Report.path(),
        query = query,
        date = report.date.format("%Y-%m-%d"),
    );
    for mode in [ViewMode::Specialty, ViewMode::Day] {
        let selected = if mode == report.view_mode { " selected" } else { "" };
        let _ = writeln!(
            body,
            "<option value=\"{}\"{}>{}</option>",
            mode.as_str(),
            selected,
            mode.label()
        );
    }
    let _ = writeln!(
        body,
        "</select>\n<button type=\"submit\">Show</button>\n</form>\n<p>Patients listed: {} &middot; Admitted on {}: {}</p>",
        report.total_patients,
        report.date.format("%Y-%m-%d"),
        report.admitted_on_date
    );

    if report.sections.is_empty() {
        body.push_str("<p class=\"empty\">No patients for this date.</p>\n");
    }
    for section in &report.sections {
        let _ = writeln!(
            body,
            "<h3>{} ({})</h3>",
            escape_html(&section.heading),
            section.patients.len()
        );
        if section.patients.is_empty() {
            body.push_str("<p class=\"empty\">No patients</p>\n");
        } else {
            body.push_str(&patient_rows(&section.patients));
        }
    }
    body.push_str("</div>\n");

    layout(&report.title, &body)
}

pub fn discharge_page(view: &DischargeView<'_>) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<h2>Discharge Patients</h2>
<form method="get" action="{action}">
<input type="text" name="mrn" value="{key}" placeholder="Enter patient MRN">
<button type="submit">Search</button>
</form>
"#,
        action = Route::Discharge.path(),
        key = escape_html(view.search_key()),
    );

    if let Some(error) = view.error() {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape_html(error));
    }

    if let Some(patient) = view.search_result() {
        let summary = PatientSummary::from_patient_in(patient, &Local);
        let disabled = if view.is_submitting() { " disabled" } else { "" };
        let label = if view.is_submitting() {
            "Discharging..."
        } else {
            "Request Discharge"
        };
        let _ = write!(
            body,
            r#"<div class="card">
<h3>{name}</h3>
<p>MRN: {mrn} &middot; Admitted: {admitted} &middot; Specialty: {specialty} &middot; Bed: {bed}</p>
<form method="post" action="{action}">
<input type="hidden" name="mrn" value="{mrn}">
<textarea name="notes" rows="3" placeholder="Enter discharge notes..." required>{notes}</textarea>
<button type="submit"{disabled}>{label}</button>
</form>
</div>
"#,
            name = escape_html(&summary.name),
            mrn = escape_html(&summary.mrn),
            admitted = escape_html(&summary.admitted),
            specialty = escape_html(&summary.specialty),
            bed = escape_html(summary.bed_number.as_deref().unwrap_or("-")),
            action = Route::Discharge.path(),
            notes = escape_html(view.discharge_notes()),
            disabled = disabled,
            label = label,
        );
    }

    body.push_str(&active_patients_card(view.active_patients()));
    layout("Discharge Patients", &body)
}
