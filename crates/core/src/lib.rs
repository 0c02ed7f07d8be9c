//! # Ward Core
//!
//! View models and backend capabilities for the ward patient-management UI.
//!
//! This crate contains:
//! - the daily report view (joint fetch, date filter, specialty/day grouping)
//! - the discharge view (MRN search, guarded discharge submission)
//! - the [`WardApi`] / [`DischargeHandler`] capabilities and an HTTP client for them
//! - startup configuration
//!
//! **No presentation concerns**: HTML, PDF and terminal output belong in `ward-web`,
//! `ward-export` and `ward-cli`.

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod discharge;
pub mod error;
pub mod models;
pub mod navigation;
pub mod report;

pub use api::{DischargeHandler, WardApi};
pub use client::HttpWardApi;
pub use config::WardConfig;
pub use discharge::{DischargeOutcome, DischargeRequest, DischargeView};
pub use error::{ApiError, WardError, WardResult};
pub use models::{Patient, PatientSummary, Specialty};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use report::{
    fetch_report_data, filter_by_date, filter_by_date_in, RenderedReport, ReportData,
    ReportSection, ReportState, ReportView, ViewMode,
};
pub use ward_types::{Mrn, NonEmptyText, TextError};
