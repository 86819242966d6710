use chrono::{DateTime, Utc};
use thiserror::Error;

pub type AuthResult<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("jwt error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
    #[error("session expired at {expired_at}")]
    SessionExpired { expired_at: DateTime<Utc> },
    #[error("authentication required")]
    AuthenticationRequired,
}

impl AuthError {
    pub fn client_display(&self) -> String {
        match self {
            Self::JwtError(_) => String::from("Authentication error, token is malformed."),
            Self::SessionExpired { .. } => {
                String::from("Your session has expired, please sign in again.")
            }
            Self::AuthenticationRequired => String::from("Authentication required."),
        }
    }
}
