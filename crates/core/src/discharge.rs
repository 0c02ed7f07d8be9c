//! Discharge view: find an active patient by MRN and request their discharge.
//!
//! The patient list and the discharge capability both belong to the container that mounts
//! the view. The view itself only keeps what the user typed, the current match and the
//! outcome of the last action.

use crate::api::DischargeHandler;
use crate::constants::{DISCHARGE_FAILED_PREFIX, MRN_NOT_FOUND_MESSAGE};
use crate::error::ApiError;
use crate::models::Patient;
use crate::navigation::{Navigator, Route};
use ward_types::{Mrn, NonEmptyText};

/// Everything the backend needs to discharge one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DischargeRequest {
    pub patient_id: String,
    pub notes: NonEmptyText,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DischargeOutcome {
    /// No match, blank notes, or a submission already in flight. Nothing was sent.
    NotReady,
    Discharged(Patient),
    Failed(String),
    /// A result arrived for a submission the view no longer tracks.
    Ignored,
}

pub struct DischargeView<'a> {
    patients: &'a [Patient],
    search_key: String,
    search_result: Option<&'a Patient>,
    discharge_notes: String,
    error: Option<String>,
    is_submitting: bool,
}

impl<'a> DischargeView<'a> {
    pub fn new(patients: &'a [Patient]) -> Self {
        Self {
            patients,
            search_key: String::new(),
            search_result: None,
            discharge_notes: String::new(),
            error: None,
            is_submitting: false,
        }
    }

    /// The list shown under "Active Patients".
    pub fn active_patients(&self) -> &'a [Patient] {
        self.patients
    }

    /// The container refreshed its list. A current match is re-pointed at the fresh record
    /// when it is still present.
    pub fn replace_patients(&mut self, patients: &'a [Patient]) {
        self.patients = patients;
        if let Some(current) = self.search_result {
            if let Some(fresh) = patients.iter().find(|p| p.id == current.id) {
                self.search_result = Some(fresh);
            }
        }
    }

    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    pub fn set_search_key(&mut self, key: impl Into<String>) {
        self.search_key = key.into();
    }

    /// Look `key` up by exact MRN. Sets the match, or the not-found message on a miss.
    pub fn search(&mut self, key: &str) -> Option<&'a Patient> {
        self.search_key = key.to_string();

        let found = Mrn::parse(key)
            .ok()
            .and_then(|mrn| self.patients.iter().find(|p| mrn.matches(&p.mrn)));

        self.search_result = found;
        self.error = match found {
            Some(_) => None,
            None => Some(MRN_NOT_FOUND_MESSAGE.to_string()),
        };
        found
    }

    pub fn search_result(&self) -> Option<&'a Patient> {
        self.search_result
    }

    pub fn discharge_notes(&self) -> &str {
        &self.discharge_notes
    }

    pub fn set_discharge_notes(&mut self, notes: impl Into<String>) {
        self.discharge_notes = notes.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Whether the "Request Discharge" action is enabled.
    pub fn can_request_discharge(&self) -> bool {
        !self.is_submitting
            && self.search_result.is_some()
            && !self.discharge_notes.trim().is_empty()
    }

    /// Start a submission. Returns `None`, and changes nothing, when the action is disabled.
    pub fn begin_discharge(&mut self) -> Option<DischargeRequest> {
        if self.is_submitting {
            return None;
        }
        let patient = self.search_result?;
        let notes = NonEmptyText::new(&self.discharge_notes).ok()?;

        self.is_submitting = true;
        self.error = None;
        Some(DischargeRequest {
            patient_id: patient.id.clone(),
            notes,
        })
    }

    /// Deliver the outcome of the submission started by [`begin_discharge`](Self::begin_discharge).
    ///
    /// On success the key, match and notes are cleared together and the navigator is sent
    /// home. On failure the search state is kept so the user can retry straight away.
    pub fn finish_discharge<N>(
        &mut self,
        result: Result<Patient, ApiError>,
        navigator: &mut N,
    ) -> DischargeOutcome
    where
        N: Navigator + ?Sized,
    {
        if !self.is_submitting {
            tracing::debug!("discarding discharge result for a view with nothing in flight");
            return DischargeOutcome::Ignored;
        }
        self.is_submitting = false;

        match result {
            Ok(patient) => {
                tracing::info!(patient_id = %patient.id, "discharge requested");
                self.search_key.clear();
                self.search_result = None;
                self.discharge_notes.clear();
                navigator.navigate(Route::Home);
                DischargeOutcome::Discharged(patient)
            }
            Err(err) => {
                tracing::warn!(error = %err, "discharge request failed");
                let message = format!("{DISCHARGE_FAILED_PREFIX}: {}", err.user_message());
                self.error = Some(message.clone());
                DischargeOutcome::Failed(message)
            }
        }
    }

    /// Submit through the injected handler and apply the outcome.
    pub async fn request_discharge<H, N>(
        &mut self,
        handler: &H,
        navigator: &mut N,
    ) -> DischargeOutcome
    where
        H: DischargeHandler + ?Sized,
        N: Navigator + ?Sized,
    {
        let Some(request) = self.begin_discharge() else {
            return DischargeOutcome::NotReady;
        };
        let result = handler.discharge(&request.patient_id, &request.notes).await;
        self.finish_discharge(result, navigator)
    }

    /// Drop all local state, including any submission in flight.
    pub fn reset(&mut self) {
        self.search_key.clear();
        self.search_result = None;
        self.discharge_notes.clear();
        self.error = None;
        self.is_submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn patient(id: &str, mrn: &str) -> Patient {
        Patient {
            id: id.into(),
            mrn: mrn.into(),
            name: format!("Patient {id}"),
            admission_date: "2026-10-16T08:00:00Z".parse().unwrap(),
            specialty: "General Medicine".into(),
            bed_number: Some("12".into()),
        }
    }

    fn ward() -> Vec<Patient> {
        vec![patient("p-1", "12345"), patient("p-2", "67890")]
    }

    #[derive(Default)]
    struct FakeHandler {
        calls: Mutex<Vec<(String, String)>>,
        reject_with: Option<String>,
    }

    impl FakeHandler {
        fn rejecting(payload: &str) -> Self {
            Self {
                reject_with: Some(payload.into()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DischargeHandler for FakeHandler {
        async fn discharge(
            &self,
            patient_id: &str,
            notes: &NonEmptyText,
        ) -> Result<Patient, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((patient_id.to_string(), notes.to_string()));
            match &self.reject_with {
                Some(payload) => Err(ApiError::Status {
                    status: 409,
                    payload: Some(payload.clone()),
                }),
                None => Ok(patient(patient_id, "discharged")),
            }
        }
    }

    #[test]
    fn search_finds_exact_mrn_and_clears_error() {
        let patients = ward();
        let mut view = DischargeView::new(&patients);

        assert!(view.search("99999").is_none());
        assert_eq!(view.error(), Some(MRN_NOT_FOUND_MESSAGE));

        let found = view.search("12345").expect("patient should be found");
        assert_eq!(found.id, "p-1");
        assert_eq!(view.search_result().map(|p| p.id.as_str()), Some("p-1"));
        assert_eq!(view.error(), None);
    }

    #[test]
    fn search_matches_mrn_containing_spaces() {
        let patients = vec![patient("p-1", "AB 123"), patient("p-2", "AB123")];
        let mut view = DischargeView::new(&patients);

        let found = view.search("AB 123").expect("exact MRN should be found");
        assert_eq!(found.id, "p-1");
        assert_eq!(view.error(), None);

        assert_eq!(view.search(" AB123 ").map(|p| p.id.as_str()), Some("p-2"));
        assert!(view.search("AB  123").is_none());
    }

    #[test]
    fn search_miss_clears_previous_match() {
        let patients = ward();
        let mut view = DischargeView::new(&patients);
        view.search("12345");

        assert!(view.search("1234").is_none());
        assert!(view.search_result().is_none());
        assert_eq!(view.error(), Some(MRN_NOT_FOUND_MESSAGE));

        assert!(view.search("   ").is_none());
        assert_eq!(view.error(), Some(MRN_NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn blank_notes_never_reach_the_handler() {
        let patients = ward();
        let handler = FakeHandler::default();
        let mut nav = RecordingNavigator::new();
        let mut view = DischargeView::new(&patients);
        view.search("12345");

        for notes in ["", "   ", "\n\t"] {
            view.set_discharge_notes(notes);
            assert!(!view.can_request_discharge());
            let outcome = view.request_discharge(&handler, &mut nav).await;
            assert_eq!(outcome, DischargeOutcome::NotReady);
        }

        assert!(handler.calls().is_empty());
        assert!(nav.visited().is_empty());
    }

    #[tokio::test]
    async fn no_match_means_no_submission() {
        let patients = ward();
        let handler = FakeHandler::default();
        let mut nav = RecordingNavigator::new();
        let mut view = DischargeView::new(&patients);
        view.set_discharge_notes("stable");

        assert_eq!(
            view.request_discharge(&handler, &mut nav).await,
            DischargeOutcome::NotReady
        );
        assert!(handler.calls().is_empty());
    }

    #[tokio::test]
    async fn success_resets_state_and_navigates_home_once() {
        let patients = ward();
        let handler = FakeHandler::default();
        let mut nav = RecordingNavigator::new();
        let mut view = DischargeView::new(&patients);
        view.search("67890");
        view.set_discharge_notes("  Home with district nurse follow-up  ");

        let outcome = view.request_discharge(&handler, &mut nav).await;

        assert!(matches!(outcome, DischargeOutcome::Discharged(ref p) if p.id == "p-2"));
        assert_eq!(
            handler.calls(),
            vec![("p-2".to_string(), "Home with district nurse follow-up".to_string())]
        );
        assert_eq!(view.search_key(), "");
        assert!(view.search_result().is_none());
        assert_eq!(view.discharge_notes(), "");
        assert!(!view.is_submitting());
        assert_eq!(nav.visited(), &[Route::Home]);
    }

    #[tokio::test]
    async fn failure_keeps_search_state_for_retry() {
        let patients = ward();
        let handler = FakeHandler::rejecting("Patient has outstanding medications");
        let mut nav = RecordingNavigator::new();
        let mut view = DischargeView::new(&patients);
        view.search("12345");
        view.set_discharge_notes("Discharge to home");

        let outcome = view.request_discharge(&handler, &mut nav).await;

        let expected = "An error occurred while requesting discharge: Patient has outstanding medications";
        assert_eq!(outcome, DischargeOutcome::Failed(expected.to_string()));
        assert_eq!(view.error(), Some(expected));
        assert_eq!(view.search_key(), "12345");
        assert_eq!(view.search_result().map(|p| p.id.as_str()), Some("p-1"));
        assert_eq!(view.discharge_notes(), "Discharge to home");
        assert!(view.can_request_discharge(), "user may retry without searching again");
        assert!(nav.visited().is_empty());
    }

    #[test]
    fn only_one_submission_in_flight() {
        let patients = ward();
        let mut view = DischargeView::new(&patients);
        view.search("12345");
        view.set_discharge_notes("ok");

        let request = view.begin_discharge().expect("first submission starts");
        assert_eq!(request.patient_id, "p-1");
        assert!(view.is_submitting());
        assert!(!view.can_request_discharge());
        assert!(view.begin_discharge().is_none());
    }

    #[test]
    fn late_result_after_reset_is_ignored() {
        let patients = ward();
        let mut nav = RecordingNavigator::new();
        let mut view = DischargeView::new(&patients);
        view.search("12345");
        view.set_discharge_notes("ok");
        view.begin_discharge().expect("submission starts");

        view.reset();
        let outcome = view.finish_discharge(Ok(patient("p-1", "12345")), &mut nav);

        assert_eq!(outcome, DischargeOutcome::Ignored);
        assert!(nav.visited().is_empty());
    }

    #[test]
    fn replacing_the_list_keeps_the_current_match() {
        let first = ward();
        let mut refreshed = ward();
        refreshed[0].bed_number = Some("7A".into());
        refreshed.push(patient("p-3", "55555"));

        let mut view = DischargeView::new(&first);
        view.search("12345");
        view.replace_patients(&refreshed);

        assert_eq!(view.active_patients().len(), 3);
        assert_eq!(
            view.search_result().and_then(|p| p.bed_number.as_deref()),
            Some("7A")
        );
    }
}
