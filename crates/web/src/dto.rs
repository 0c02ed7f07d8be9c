//! JSON bodies served by the web UI's API endpoints.

use serde::Serialize;
use utoipa::ToSchema;
use ward_core::{PatientSummary, RenderedReport, ReportSection};

#[derive(Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct PatientSummaryRes {
    pub id: String,
    pub name: String,
    pub mrn: String,
    /// Admission time in the server's local time zone, `YYYY-MM-DD HH:MM`.
    pub admitted: String,
    pub specialty: String,
    pub bed_number: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ReportSectionRes {
    pub heading: String,
    pub patients: Vec<PatientSummaryRes>,
}

#[derive(Serialize, ToSchema)]
pub struct ReportRes {
    pub title: String,
    /// `specialty` or `day`.
    pub view_mode: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub total_patients: usize,
    pub admitted_on_date: usize,
    pub sections: Vec<ReportSectionRes>,
}

impl From<PatientSummary> for PatientSummaryRes {
    fn from(p: PatientSummary) -> Self {
        Self {
            id: p.id,
            name: p.name,
            mrn: p.mrn,
            admitted: p.admitted,
            specialty: p.specialty,
            bed_number: p.bed_number,
        }
    }
}

impl From<ReportSection> for ReportSectionRes {
    fn from(s: ReportSection) -> Self {
        Self {
            heading: s.heading,
            patients: s.patients.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RenderedReport> for ReportRes {
    fn from(r: RenderedReport) -> Self {
        Self {
            title: r.title,
            view_mode: r.view_mode.as_str().to_string(),
            date: r.date.format("%Y-%m-%d").to_string(),
            total_patients: r.total_patients,
            admitted_on_date: r.admitted_on_date,
            sections: r.sections.into_iter().map(Into::into).collect(),
        }
    }
}
