//! HTTP implementation of [`WardApi`] on top of `reqwest`.

use crate::api::WardApi;
use crate::config::WardConfig;
use crate::error::ApiError;
use crate::models::{Patient, Specialty};
use crate::{WardError, WardResult};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ward_types::NonEmptyText;

/// Error body the backend sends alongside non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DischargeBody<'a> {
    discharge_notes: &'a str,
}

/// Ward backend client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpWardApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpWardApi {
    pub fn new(cfg: &WardConfig) -> WardResult<Self> {
        let base_url = Url::parse(cfg.api_base_url())
            .map_err(|e| WardError::InvalidConfig(format!("WARD_API_URL is not a URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(WardError::InvalidConfig(
                "WARD_API_URL cannot be used as a base URL".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(cfg.api_timeout())
            .build()
            .map_err(WardError::HttpClient)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let payload = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        tracing::warn!(status = status.as_u16(), ?payload, "ward backend rejected request");

        Err(ApiError::Status {
            status: status.as_u16(),
            payload,
        })
    }
}

#[async_trait]
impl WardApi for HttpWardApi {
    async fn get_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let url = self.endpoint(&["patients"]);
        tracing::debug!(%url, "fetching patients");
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn get_specialties(&self) -> Result<Vec<Specialty>, ApiError> {
        let url = self.endpoint(&["specialties"]);
        tracing::debug!(%url, "fetching specialties");
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn request_discharge(
        &self,
        patient_id: &str,
        notes: &NonEmptyText,
    ) -> Result<Patient, ApiError> {
        let url = self.endpoint(&["patients", patient_id, "discharge"]);
        tracing::debug!(%url, "requesting discharge");
        let response = self
            .client
            .post(url)
            .json(&DischargeBody {
                discharge_notes: notes.as_str(),
            })
            .send()
            .await?;
        Self::read_json(response).await
    }
}
