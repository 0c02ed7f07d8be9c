//! Daily census report view.
//!
//! A [`ReportView`] is mounted in the `Loading` state, fed the result of one joint fetch of the
//! patient list and the specialty catalog, and then rendered in one of two groupings. Changing
//! the grouping or the selected date only changes how the stored data is rendered.

use crate::api::WardApi;
use crate::constants::{REPORT_LOAD_FAILED_PREFIX, REPORT_TITLE};
use crate::error::ApiError;
use crate::models::{Patient, PatientSummary, Specialty};
use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// How the report body is grouped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Specialty,
    Day,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Specialty => "specialty",
            ViewMode::Day => "day",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Specialty => "View by Specialty",
            ViewMode::Day => "View by Day",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "specialty" => Ok(ViewMode::Specialty),
            "day" => Ok(ViewMode::Day),
            other => Err(format!("unknown view mode `{other}` (expected specialty or day)")),
        }
    }
}

/// Both halves of the report data, stored together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportData {
    pub patients: Vec<Patient>,
    pub specialties: Vec<Specialty>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportState {
    Loading,
    Ready(ReportData),
    /// The message replaces the whole report body.
    Failed(String),
}

/// Fetch patients and specialties concurrently.
///
/// Resolves only once both requests have completed, or as soon as either fails.
pub async fn fetch_report_data<A>(api: &A) -> Result<ReportData, ApiError>
where
    A: WardApi + ?Sized,
{
    let (patients, specialties) = tokio::try_join!(api.get_patients(), api.get_specialties())?;
    Ok(ReportData {
        patients,
        specialties,
    })
}

/// The message shown in place of the report when loading fails.
pub fn load_failed_message(err: &ApiError) -> String {
    format!("{REPORT_LOAD_FAILED_PREFIX}: {}", err.user_message())
}

/// Patients admitted on `date` in the local calendar.
pub fn filter_by_date(patients: &[Patient], date: NaiveDate) -> Vec<&Patient> {
    filter_by_date_in(patients, date, &Local)
}

/// Patients whose admission falls on `date` when seen from `tz`. Time of day is ignored.
pub fn filter_by_date_in<'a, Tz: TimeZone>(
    patients: &'a [Patient],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Patient> {
    patients
        .iter()
        .filter(|p| p.admission_day_in(tz) == date)
        .collect()
}

/// Group patients by specialty.
///
/// Catalog specialties come first in catalog order, including those with no patients. Specialty
/// names missing from the catalog follow in alphabetical order. Patients within a group are
/// ordered by admission time.
pub fn group_by_specialty<'a>(
    patients: &'a [Patient],
    specialties: &[Specialty],
) -> Vec<(String, Vec<&'a Patient>)> {
    let mut groups: Vec<(String, Vec<&'a Patient>)> = specialties
        .iter()
        .map(|s| (s.name.clone(), Vec::new()))
        .collect();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, s) in specialties.iter().enumerate() {
        index.entry(s.name.as_str()).or_insert(i);
    }

    let mut uncatalogued: BTreeMap<String, Vec<&'a Patient>> = BTreeMap::new();
    for patient in patients {
        match index.get(patient.specialty.as_str()) {
            Some(&i) => groups[i].1.push(patient),
            None => uncatalogued
                .entry(patient.specialty.clone())
                .or_default()
                .push(patient),
        }
    }

    groups.extend(uncatalogued);
    for (_, members) in &mut groups {
        members.sort_by_key(|p| p.admission_date);
    }
    groups
}

/// Group patients by calendar day of admission as seen from `tz`, earliest day first.
pub fn group_by_day_in<'a, Tz, I>(patients: I, tz: &Tz) -> BTreeMap<NaiveDate, Vec<&'a Patient>>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a Patient>,
{
    let mut days: BTreeMap<NaiveDate, Vec<&'a Patient>> = BTreeMap::new();
    for patient in patients {
        days.entry(patient.admission_day_in(tz))
            .or_default()
            .push(patient);
    }
    for members in days.values_mut() {
        members.sort_by_key(|p| p.admission_date);
    }
    days
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub heading: String,
    pub patients: Vec<PatientSummary>,
}

/// A snapshot of what the report view currently shows. Export works from this.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    pub title: String,
    pub view_mode: ViewMode,
    pub date: NaiveDate,
    pub sections: Vec<ReportSection>,
    /// Patients listed across all sections.
    pub total_patients: usize,
    /// Patients in the census admitted on `date`.
    pub admitted_on_date: usize,
}

impl RenderedReport {
    pub fn is_empty(&self) -> bool {
        self.total_patients == 0
    }
}

pub struct ReportView {
    state: ReportState,
    view_mode: ViewMode,
    selected_date: NaiveDate,
}

impl ReportView {
    /// Mount a view in the loading state, with `today` selected.
    pub fn mount(today: NaiveDate) -> Self {
        Self {
            state: ReportState::Loading,
            view_mode: ViewMode::default(),
            selected_date: today,
        }
    }

    /// Mount with today's local date selected.
    pub fn mount_local() -> Self {
        Self::mount(Local::now().date_naive())
    }

    /// Initial selection supplied by the container, e.g. from a URL. `None` keeps the default.
    pub fn with_selection(mut self, date: Option<NaiveDate>, view_mode: Option<ViewMode>) -> Self {
        if let Some(date) = date {
            self.selected_date = date;
        }
        if let Some(view_mode) = view_mode {
            self.view_mode = view_mode;
        }
        self
    }

    /// Fetch the report data and apply the outcome.
    pub async fn load<A>(&mut self, api: &A) -> &ReportState
    where
        A: WardApi + ?Sized,
    {
        self.state = ReportState::Loading;
        let result = fetch_report_data(api).await;
        self.apply(result);
        &self.state
    }

    /// Move out of the loading phase with the outcome of the joint fetch.
    pub fn apply(&mut self, result: Result<ReportData, ApiError>) {
        self.state = match result {
            Ok(data) => {
                tracing::debug!(
                    patients = data.patients.len(),
                    specialties = data.specialties.len(),
                    "report data loaded"
                );
                ReportState::Ready(data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load report data");
                ReportState::Failed(load_failed_message(&err))
            }
        };
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ReportState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ReportState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&ReportData> {
        match &self.state {
            ReportState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Switch grouping. Ignored unless the report is showing; returns whether it was applied.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) -> bool {
        if self.data().is_none() {
            return false;
        }
        self.view_mode = view_mode;
        true
    }

    /// Change the report date. Ignored unless the report is showing.
    pub fn set_selected_date(&mut self, date: NaiveDate) -> bool {
        if self.data().is_none() {
            return false;
        }
        self.selected_date = date;
        true
    }

    /// Render in the local time zone. `None` while loading or after a failure.
    pub fn render(&self) -> Option<RenderedReport> {
        self.render_in(&Local)
    }

    pub fn render_in<Tz>(&self, tz: &Tz) -> Option<RenderedReport>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let data = self.data()?;
        let on_date = filter_by_date_in(&data.patients, self.selected_date, tz);
        let admitted_on_date = on_date.len();

        let summarise = |members: Vec<&Patient>| -> Vec<PatientSummary> {
            members
                .into_iter()
                .map(|p| PatientSummary::from_patient_in(p, tz))
                .collect()
        };

        let sections: Vec<ReportSection> = match self.view_mode {
            ViewMode::Specialty => group_by_specialty(&data.patients, &data.specialties)
                .into_iter()
                .map(|(heading, members)| ReportSection {
                    heading,
                    patients: summarise(members),
                })
                .collect(),
            ViewMode::Day => group_by_day_in(on_date, tz)
                .into_iter()
                .map(|(day, members)| ReportSection {
                    heading: day.format("%A %-d %B %Y").to_string(),
                    patients: summarise(members),
                })
                .collect(),
        };

        Some(RenderedReport {
            title: REPORT_TITLE.to_string(),
            view_mode: self.view_mode,
            date: self.selected_date,
            total_patients: sections.iter().map(|s| s.patients.len()).sum(),
            sections,
            admitted_on_date,
        })
    }
}
