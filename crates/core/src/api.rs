//! Capabilities the views need from the ward backend.
//!
//! Views never reach for a global client: the report view is handed a [`WardApi`] and the
//! discharge view is handed a [`DischargeHandler`] by whatever container mounts it.

use crate::error::ApiError;
use crate::models::{Patient, Specialty};
use async_trait::async_trait;
use ward_types::NonEmptyText;

/// Read and write operations offered by the ward backend.
#[async_trait]
pub trait WardApi: Send + Sync {
    /// All currently active patients.
    async fn get_patients(&self) -> Result<Vec<Patient>, ApiError>;

    /// The specialty catalog.
    async fn get_specialties(&self) -> Result<Vec<Specialty>, ApiError>;

    /// Ask the backend to discharge `patient_id`. Returns the updated record.
    async fn request_discharge(
        &self,
        patient_id: &str,
        notes: &NonEmptyText,
    ) -> Result<Patient, ApiError>;
}

/// The single capability the discharge view is given.
#[async_trait]
pub trait DischargeHandler: Send + Sync {
    async fn discharge(&self, patient_id: &str, notes: &NonEmptyText) -> Result<Patient, ApiError>;
}

#[async_trait]
impl<T> DischargeHandler for T
where
    T: WardApi + ?Sized,
{
    async fn discharge(&self, patient_id: &str, notes: &NonEmptyText) -> Result<Patient, ApiError> {
        self.request_discharge(patient_id, notes).await
    }
}
