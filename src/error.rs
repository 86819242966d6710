use thiserror::Error;
use tracing::error;
use tracing_error::SpanTrace;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
    #[error("auth error: {0}")]
    AuthError(#[from] crate::auth::AuthError),
    #[error("api error: {0}")]
    ApiError(#[from] crate::api::ApiError),
    #[error("quiz error: {0}")]
    QuizError(#[from] crate::quiz::QuizError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Message suitable for showing to the person at the terminal.
    pub fn client_display(&self) -> String {
        match self {
            Self::IoError(e) => format!("I/O failure: {e}"),
            Self::ConfigError(e) => format!("Configuration error: {e}"),
            Self::AuthError(e) => e.client_display(),
            Self::ApiError(e) => e.client_display(),
            Self::QuizError(e) => e.client_display(),
        }
    }
}

pub async fn run_with_error_handler<F, T>(run: F) -> T
where
    F: AsyncFn() -> AppResult<T>,
    T: Send + Sync,
{
    match run().await {
        Ok(value) => value,
        Err(e) => {
            default_error_handler(e);
            std::process::exit(1);
        }
    }
}

fn default_error_handler(error: AppError) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
    eprintln!("{}", error.client_display());
}

pub fn log_error<E: std::error::Error + std::fmt::Display>(error: &E) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
}
