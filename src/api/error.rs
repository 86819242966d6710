use reqwest::StatusCode;
use thiserror::Error;

use crate::{
    auth::AuthError,
    model::{ResourceType, ValidationErrors},
};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("NetworkError: {0}")]
    Network(#[from] reqwest::Error),

    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),

    #[error("InvalidPayload: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("ResourceNotFound: {resource_type:?}")]
    NotFound { resource_type: ResourceType },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("ResourceForbidden: {resource_type:?}")]
    Forbidden { resource_type: ResourceType },

    #[error("UnexpectedStatus {status}: {resource_type:?}. Message: {message}")]
    Status {
        status: StatusCode,
        resource_type: ResourceType,
        message: String,
    },

    #[error("DecodeError: {resource_type:?}. Error: {error}")]
    Decode {
        resource_type: ResourceType,
        error: serde_json::Error,
    },
}

impl ApiError {
    pub fn from_status(status: StatusCode, resource_type: ResourceType, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound { resource_type },
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden { resource_type },
            status => Self::Status {
                status,
                resource_type,
                message,
            },
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Network(e) => e.status(),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            Self::Status { status, .. } => Some(*status),
            Self::Auth(_) | Self::Invalid(_) | Self::Decode { .. } => None,
        }
    }

    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => {
                status.is_server_error()
                    || *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    /// Whether the call needs a fresh sign-in before it can succeed.
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::Auth(AuthError::SessionExpired { .. } | AuthError::AuthenticationRequired)
        )
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::Network(_) => String::from("Network error, please check your connection and retry."),
            Self::Auth(e) => e.client_display(),
            Self::Invalid(e) => format!("Please fix the highlighted fields: {e}"),
            Self::NotFound { .. } => String::from("Resource error, resource not found."),
            Self::Unauthorized => String::from("Authentication required."),
            Self::Forbidden { .. } => String::from("Resource error, resource forbidden."),
            Self::Status { message, .. } if !message.is_empty() => {
                format!("Server error: {message}")
            }
            Self::Status { status, .. } if status.is_server_error() => {
                String::from("Server error, please retry later.")
            }
            Self::Status { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                String::from("Too many requests, please retry in a moment.")
            }
            Self::Status { status, .. } if *status == StatusCode::REQUEST_TIMEOUT => {
                String::from("The server timed out, please retry.")
            }
            Self::Status { .. } => String::from("Request rejected by the server."),
            Self::Decode { .. } => String::from("Unexpected response from the server."),
        }
    }
}
