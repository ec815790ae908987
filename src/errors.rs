use std::collections::BTreeMap;

/// Field name to the first error message reported for it.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("no time slot selected")]
    NoSlotSelected,

    #[error("slot {0:02}:00 is not available")]
    SlotUnavailable(u32),

    #[error("no provider selected")]
    NoProviderSelected,

    #[error("selected time does not exist in the local timezone")]
    InvalidTime,

    #[error("session expired")]
    SessionExpired,

    #[error("not signed in")]
    NotSignedIn,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Api(ApiError::Network(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(AppError::SlotUnavailable(9).to_string(), "slot 09:00 is not available");
        assert_eq!(
            AppError::Api(ApiError::Status {
                status: 400,
                message: "bad".to_string()
            })
            .to_string(),
            "API error (400): bad"
        );
    }

    #[test]
    fn test_is_network() {
        assert!(AppError::Api(ApiError::Network("down".to_string())).is_network());
        assert!(!AppError::Api(ApiError::Unauthorized).is_network());
        assert!(!AppError::NoSlotSelected.is_network());
    }
}
