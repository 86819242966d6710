mod backend;
pub use backend::QuizBackend;

mod client;
pub use client::ApiClient;

mod error;
pub use error::{ApiError, ApiResult};
