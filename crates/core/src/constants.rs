//! Constants used throughout the ward core crate.
//!
//! User-facing messages and configuration defaults live here so that the web and terminal
//! front-ends show identical text.

/// Default base URL of the ward backend API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default listen address for the web UI.
pub const DEFAULT_WEB_ADDR: &str = "0.0.0.0:3000";

/// Default timeout for a single backend request, in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Prefix of the message shown when the report data cannot be loaded.
pub const REPORT_LOAD_FAILED_PREFIX: &str = "Failed to load report data";

/// Shown when an MRN search finds no active patient.
pub const MRN_NOT_FOUND_MESSAGE: &str = "No active patient found with the given MRN.";

/// Prefix of the message shown when the backend rejects a discharge.
pub const DISCHARGE_FAILED_PREFIX: &str = "An error occurred while requesting discharge";

/// Title printed at the top of every rendered report.
pub const REPORT_TITLE: &str = "Daily Report";
