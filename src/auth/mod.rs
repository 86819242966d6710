mod jwt;
pub use jwt::{UserClaims, inspect_token};
mod error;
pub use error::{AuthError, AuthResult};
mod session;
pub use session::Session;
