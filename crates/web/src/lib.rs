//! # Ward Web
//!
//! Server-rendered web UI for the ward views.
//!
//! Handles:
//! - HTML pages for the home list, the daily report and the discharge view
//! - PDF download and printable report pages
//! - a JSON report endpoint with OpenAPI/Swagger documentation
//!
//! View state and backend access live in `ward-core`; this crate only maps HTTP onto them.
//! Navigation requested by a view becomes a `303 See Other` redirect.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod handlers;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use ward_core::{WardApi, WardConfig};

/// Application state shared across handlers.
///
/// The backend capability is injected here once and handed to each mounted view.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<WardConfig>,
    pub api: Arc<dyn WardApi>,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::api_report),
    components(schemas(
        dto::HealthRes,
        dto::ErrorRes,
        dto::ReportRes,
        dto::ReportSectionRes,
        dto::PatientSummaryRes,
    ))
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::home))
        .route("/report", get(handlers::report_page))
        .route("/report/pdf", get(handlers::report_pdf))
        .route("/report/print", get(handlers::report_print))
        .route("/api/report", get(handlers::api_report))
        .route(
            "/discharge",
            get(handlers::discharge_page).post(handlers::discharge_submit),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve the UI until the server stops.
///
/// # Errors
/// Returns an error if:
/// - the listen address cannot be bound, or
/// - the HTTP server fails while running.
pub async fn serve(cfg: Arc<WardConfig>, api: Arc<dyn WardApi>) -> anyhow::Result<()> {
    let addr = cfg.listen_addr().to_string();
    tracing::info!("-- Starting ward UI on {} (backend {})", addr, cfg.api_base_url());

    let app = router(AppState { cfg, api });
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;
    use ward_core::{ApiError, NonEmptyText, Patient, Specialty};

    #[derive(Default)]
    struct FakeApi {
        patients: Vec<Patient>,
        specialties: Vec<Specialty>,
        fail_patients: bool,
        fail_specialties: bool,
        reject_discharge: Option<String>,
        discharges: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl WardApi for FakeApi {
        async fn get_patients(&self) -> Result<Vec<Patient>, ApiError> {
            if self.fail_patients {
                return Err(ApiError::Transport("connection refused".into()));
            }
            Ok(self.patients.clone())
        }

        async fn get_specialties(&self) -> Result<Vec<Specialty>, ApiError> {
            if self.fail_specialties {
                return Err(ApiError::Status {
                    status: 500,
                    payload: Some("catalog unavailable".into()),
                });
            }
            Ok(self.specialties.clone())
        }

        async fn request_discharge(
            &self,
            patient_id: &str,
            notes: &NonEmptyText,
        ) -> Result<Patient, ApiError> {
            self.discharges
                .lock()
                .unwrap()
                .push((patient_id.to_string(), notes.to_string()));
            if let Some(payload) = &self.reject_discharge {
                return Err(ApiError::Status {
                    status: 409,
                    payload: Some(payload.clone()),
                });
            }
            self.patients
                .iter()
                .find(|p| p.id == patient_id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    payload: None,
                })
        }
    }

    fn ward_api() -> FakeApi {
        // Midday UTC keeps admissions on the 16th in every local zone the tests may run in.
        let patient = |id: &str, mrn: &str, name: &str, specialty: &str| Patient {
            id: id.into(),
            mrn: mrn.into(),
            name: name.into(),
            admission_date: "2026-10-16T12:00:00Z".parse().unwrap(),
            specialty: specialty.into(),
            bed_number: Some("3".into()),
        };
        FakeApi {
            patients: vec![
                patient("p-1", "12345", "Sarah Williams", "Cardiology"),
                patient("p-2", "67890", "Tom Brown", "Renal"),
            ],
            specialties: vec![
                Specialty {
                    id: "card".into(),
                    name: "Cardiology".into(),
                },
                Specialty {
                    id: "renal".into(),
                    name: "Renal".into(),
                },
            ],
            ..FakeApi::default()
        }
    }

    fn app(api: Arc<FakeApi>) -> Router {
        let cfg = WardConfig::new("http://backend.test/api", "127.0.0.1:0", Duration::from_secs(1))
            .expect("config");
        router(AppState {
            cfg: Arc::new(cfg),
            api,
        })
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, form: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(Arc::new(ward_api())).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("\"ok\":true"));
    }

    #[tokio::test]
    async fn report_page_groups_by_day() {
        let response = app(Arc::new(ward_api()))
            .oneshot(get("/report?date=2026-10-16&view=day"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<h3>Friday 16 October 2026 (2)</h3>"));
        assert!(html.contains("<option value=\"day\" selected>View by Day</option>"));
    }

    #[tokio::test]
    async fn report_fetch_failure_shows_only_the_error() {
        let api = FakeApi {
            fail_specialties: true,
            ..ward_api()
        };
        let response = app(Arc::new(api)).oneshot(get("/report")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let html = body_text(response).await;
        assert!(html.contains("Failed to load report data: catalog unavailable"));
        assert!(!html.contains("<table"));
    }

    #[tokio::test]
    async fn report_patients_failure_shows_only_the_error() {
        let api = FakeApi {
            fail_patients: true,
            ..ward_api()
        };
        let response = app(Arc::new(api))
            .oneshot(get("/report?view=day"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let html = body_text(response).await;
        assert!(html.contains("Failed to load report data: request failed: connection refused"));
        assert!(!html.contains("<table"));
    }

    #[tokio::test]
    async fn report_rejects_bad_date() {
        let response = app(Arc::new(ward_api()))
            .oneshot(get("/report?date=16/10/2026"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pdf_download_is_attachment() {
        let response = app(Arc::new(ward_api()))
            .oneshot(get("/report/pdf?date=2026-10-16&view=specialty"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"daily-report-2026-10-16-specialty.pdf\""
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn json_report_lists_specialty_sections() {
        let response = app(Arc::new(ward_api()))
            .oneshot(get("/api/report?date=2026-10-16"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["view_mode"], "specialty");
        assert_eq!(json["total_patients"], 2);
        assert_eq!(json["sections"][0]["heading"], "Cardiology");
        assert_eq!(json["sections"][1]["patients"][0]["mrn"], "67890");
    }

    #[tokio::test]
    async fn discharge_search_miss_shows_message() {
        let response = app(Arc::new(ward_api()))
            .oneshot(get("/discharge?mrn=99999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("No active patient found with the given MRN."));
    }

    #[tokio::test]
    async fn discharge_success_redirects_home() {
        let api = Arc::new(ward_api());
        let response = app(api.clone())
            .oneshot(post_form("/discharge", "mrn=12345&notes=Home+with+GP+follow-up"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(
            api.discharges.lock().unwrap().as_slice(),
            &[("p-1".to_string(), "Home with GP follow-up".to_string())]
        );
    }

    #[tokio::test]
    async fn discharge_failure_keeps_the_form() {
        let api = Arc::new(FakeApi {
            reject_discharge: Some("Pending pharmacy review".into()),
            ..ward_api()
        });
        let response = app(api)
            .oneshot(post_form("/discharge", "mrn=12345&notes=Home+today"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains(
            "An error occurred while requesting discharge: Pending pharmacy review"
        ));
        assert!(html.contains(">Home today</textarea>"));
        assert!(html.contains("value=\"12345\""));
    }

    #[tokio::test]
    async fn discharge_with_blank_notes_is_not_sent() {
        let api = Arc::new(ward_api());
        let response = app(api.clone())
            .oneshot(post_form("/discharge", "mrn=12345&notes=+++"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(api.discharges.lock().unwrap().is_empty());
    }
}
