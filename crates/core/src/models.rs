//! Patient and specialty records as served by the ward backend.
//!
//! These are read-only copies: the backend owns the records and the UI may hold a stale
//! snapshot for the lifetime of a view.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// An active patient on the ward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    /// Medical record number, unique among active patients.
    pub mrn: String,
    pub name: String,
    /// Admission instant. Offsets on the wire are normalised to UTC.
    pub admission_date: DateTime<Utc>,
    /// Name of the specialty the patient is admitted under.
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_number: Option<String>,
}

impl Patient {
    /// Calendar date of admission as seen from `tz`.
    pub fn admission_day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.admission_date.with_timezone(tz).date_naive()
    }
}

/// An entry in the backend's specialty catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: String,
    pub name: String,
}

/// The fields shown for a patient in lists and report tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub mrn: String,
    /// Admission time formatted in the viewer's time zone (`YYYY-MM-DD HH:MM`).
    pub admitted: String,
    pub specialty: String,
    pub bed_number: Option<String>,
}

impl PatientSummary {
    pub fn from_patient_in<Tz>(patient: &Patient, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            mrn: patient.mrn.clone(),
            admitted: patient
                .admission_date
                .with_timezone(tz)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            specialty: patient.specialty.clone(),
            bed_number: patient.bed_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn deserializes_backend_json() {
        let json = r#"{
            "id": "p-1",
            "mrn": "12345",
            "name": "Sarah Williams",
            "admissionDate": "2026-10-16T23:30:00-02:00",
            "specialty": "Cardiology",
            "bedNumber": "4B"
        }"#;

        let patient: Patient = serde_json::from_str(json).expect("parse patient");
        assert_eq!(patient.mrn, "12345");
        assert_eq!(patient.bed_number.as_deref(), Some("4B"));
        assert_eq!(
            patient.admission_date,
            "2026-10-17T01:30:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn bed_number_is_optional() {
        let json = r#"{"id":"p-2","mrn":"9","name":"A","admissionDate":"2026-01-01T00:00:00Z","specialty":"Renal"}"#;
        let patient: Patient = serde_json::from_str(json).expect("parse patient");
        assert_eq!(patient.bed_number, None);
    }

    #[test]
    fn summary_formats_admission_in_viewer_zone() {
        let patient = Patient {
            id: "p-1".into(),
            mrn: "12345".into(),
            name: "Sarah Williams".into(),
            admission_date: "2026-10-16T23:30:00Z".parse().unwrap(),
            specialty: "Cardiology".into(),
            bed_number: None,
        };
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let summary = PatientSummary::from_patient_in(&patient, &plus_two);
        assert_eq!(summary.admitted, "2026-10-17 01:30");
        assert_eq!(
            patient.admission_day_in(&plus_two),
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
        );
    }
}
