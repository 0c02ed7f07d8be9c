/// Failure reported by the ward backend or by the transport in front of it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend returned status {status}")]
    Status {
        status: u16,
        /// The `error` field of the response body, when the backend sent one.
        payload: Option<String>,
    },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The text shown to a user: the backend's own message when it sent one, otherwise the
    /// display form of the error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                payload: Some(payload),
                ..
            } if !payload.trim().is_empty() => payload.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WardError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
}

pub type WardResult<T> = std::result::Result<T, WardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_payload() {
        let err = ApiError::Status {
            status: 409,
            payload: Some("Patient already discharged".into()),
        };
        assert_eq!(err.user_message(), "Patient already discharged");
    }

    #[test]
    fn config_errors_name_the_setting() {
        let err = WardError::InvalidConfig("WARD_ADDR cannot be empty".into());
        assert_eq!(err.to_string(), "invalid configuration: WARD_ADDR cannot be empty");
    }

    #[test]
    fn user_message_falls_back_to_display() {
        let err = ApiError::Status {
            status: 503,
            payload: None,
        };
        assert_eq!(err.user_message(), "backend returned status 503");

        let blank = ApiError::Status {
            status: 500,
            payload: Some("  ".into()),
        };
        assert_eq!(blank.user_message(), "backend returned status 500");

        let transport = ApiError::Transport("connection refused".into());
        assert_eq!(transport.user_message(), "request failed: connection refused");
    }
}
