//! Request handlers. Every page request mounts a fresh view over freshly fetched data.

use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use ward_core::{
    DischargeOutcome, DischargeView, Navigator, RenderedReport, ReportView, Route, ViewMode,
};

use crate::dto::{ErrorRes, HealthRes, ReportRes};
use crate::pages;
use crate::AppState;

/// Query string shared by the report page, its exports and the JSON report.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportParams {
    /// Report date, `YYYY-MM-DD`. Defaults to today.
    pub date: Option<String>,
    /// `specialty` (default) or `day`.
    pub view: Option<String>,
}

impl ReportParams {
    fn selection(&self) -> Result<(Option<NaiveDate>, Option<ViewMode>), String> {
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => Some(
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| format!("invalid date `{d}` (expected YYYY-MM-DD)"))?,
            ),
            None => None,
        };
        let view = match self.view.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Some(v.parse::<ViewMode>()?),
            None => None,
        };
        Ok((date, view))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DischargeQuery {
    pub mrn: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DischargeForm {
    pub mrn: String,
    #[serde(default)]
    pub notes: String,
}

/// Turns a view's navigation request into the redirect the handler responds with.
#[derive(Debug, Default)]
struct RedirectNavigator {
    target: Option<Route>,
}

impl Navigator for RedirectNavigator {
    fn navigate(&mut self, route: Route) {
        self.target = Some(route);
    }
}

/// Why a report could not be produced.
enum ReportFailure {
    BadRequest(String),
    Load(String),
}

impl ReportFailure {
    fn status(&self) -> StatusCode {
        match self {
            ReportFailure::BadRequest(_) => StatusCode::BAD_REQUEST,
            ReportFailure::Load(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> &str {
        match self {
            ReportFailure::BadRequest(m) | ReportFailure::Load(m) => m,
        }
    }

    fn into_page(self) -> Response {
        let page = pages::error_page("Daily Report", self.message());
        (self.status(), Html(page)).into_response()
    }
}

async fn load_report(
    state: &AppState,
    params: &ReportParams,
) -> Result<RenderedReport, ReportFailure> {
    let (date, view_mode) = params.selection().map_err(ReportFailure::BadRequest)?;
    let mut view = ReportView::mount_local().with_selection(date, view_mode);
    view.load(state.api.as_ref()).await;

    if let Some(message) = view.error() {
        return Err(ReportFailure::Load(message.to_string()));
    }
    view.render()
        .ok_or_else(|| ReportFailure::Load("report data is not available".into()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Ward UI is alive".into(),
    })
}

/// Home view: the active patient list.
#[axum::debug_handler]
pub async fn home(State(state): State<AppState>) -> Response {
    match state.api.get_patients().await {
        Ok(patients) => Html(pages::home_page(&patients)).into_response(),
        Err(e) => patients_unavailable("Ward", e),
    }
}

#[axum::debug_handler]
pub async fn report_page(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    match load_report(&state, &params).await {
        Ok(report) => Html(pages::report_page(&report)).into_response(),
        Err(failure) => failure.into_page(),
    }
}

/// Download the currently selected report as a PDF.
#[axum::debug_handler]
pub async fn report_pdf(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    let report = match load_report(&state, &params).await {
        Ok(report) => report,
        Err(failure) => return failure.into_page(),
    };

    match ward_export::render_pdf(&report) {
        Ok(bytes) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                ward_export::pdf_file_name(&report)
            );
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("PDF export error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::error_page(
                    "Daily Report",
                    &format!("Failed to export report: {e}"),
                )),
            )
                .into_response()
        }
    }
}

/// Printable page; the browser print dialog opens on load.
#[axum::debug_handler]
pub async fn report_print(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Response {
    match load_report(&state, &params).await {
        Ok(report) => Html(ward_export::render_print_html(&report)).into_response(),
        Err(failure) => failure.into_page(),
    }
}

#[utoipa::path(
    get,
    path = "/api/report",
    params(ReportParams),
    responses(
        (status = 200, description = "Rendered daily report", body = ReportRes),
        (status = 400, description = "Invalid date or view", body = ErrorRes),
        (status = 502, description = "Backend data could not be loaded", body = ErrorRes)
    )
)]
/// The daily report as JSON, grouped the same way as the report page.
#[axum::debug_handler]
pub async fn api_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<ReportRes>, (StatusCode, Json<ErrorRes>)> {
    load_report(&state, &params)
        .await
        .map(|report| Json(report.into()))
        .map_err(|failure| {
            (
                failure.status(),
                Json(ErrorRes {
                    error: failure.message().to_string(),
                }),
            )
        })
}

#[axum::debug_handler]
pub async fn discharge_page(
    State(state): State<AppState>,
    Query(query): Query<DischargeQuery>,
) -> Response {
    let patients = match state.api.get_patients().await {
        Ok(patients) => patients,
        Err(e) => return patients_unavailable("Discharge Patients", e),
    };

    let mut view = DischargeView::new(&patients);
    if let Some(mrn) = query.mrn.as_deref().filter(|m| !m.trim().is_empty()) {
        view.search(mrn);
    }
    Html(pages::discharge_page(&view)).into_response()
}

/// Search for the posted MRN, then submit the discharge. Success redirects home.
#[axum::debug_handler]
pub async fn discharge_submit(
    State(state): State<AppState>,
    Form(form): Form<DischargeForm>,
) -> Response {
    let patients = match state.api.get_patients().await {
        Ok(patients) => patients,
        Err(e) => return patients_unavailable("Discharge Patients", e),
    };

    let mut view = DischargeView::new(&patients);
    view.search(&form.mrn);
    view.set_discharge_notes(form.notes);

    let mut navigator = RedirectNavigator::default();
    let outcome = view
        .request_discharge(state.api.as_ref(), &mut navigator)
        .await;

    match (outcome, navigator.target) {
        (DischargeOutcome::Discharged(_), Some(route)) => Redirect::to(route.path()).into_response(),
        (DischargeOutcome::Failed(_), _) => (
            StatusCode::BAD_GATEWAY,
            Html(pages::discharge_page(&view)),
        )
            .into_response(),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::discharge_page(&view)),
        )
            .into_response(),
    }
}

fn patients_unavailable(title: &str, e: ward_core::ApiError) -> Response {
    tracing::error!("list patients error: {e}");
    let message = format!("Failed to load patients: {}", e.user_message());
    (StatusCode::BAD_GATEWAY, Html(pages::error_page(title, &message))).into_response()
}
