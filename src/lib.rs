use crate::api::ApiClient;
use crate::auth::Session;
use crate::error::AppResult;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod auth;
pub mod certificate;
pub mod error;
pub mod model;
pub mod quiz;
pub mod utils;

static APPLICATION_NAME: &str = "learnup";

/// Environment variable holding the bearer token of the current user.
pub static TOKEN_ENV: &str = "LEARNUP_TOKEN";

/// Builds a client from the config file, signed in when `LEARNUP_TOKEN` is
/// set.
#[tracing::instrument]
pub async fn build_client() -> AppResult<ApiClient> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local).await;

    let client = ApiClient::new(config.api())?;
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => {
            let session = Session::from_token(token.trim())?;
            tracing::debug!(user_id = ?session.user_id(), "using session from environment");
            Ok(client.with_session(session))
        }
        _ => Ok(client),
    }
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}
