pub mod entity;

mod error;
pub use error::{ValidationErrors, ValidationResult};

mod repo;
pub use repo::{ResourceType, ResourceTyped, RestResource};

mod validate;
pub use validate::Validate;
