//! Explicit session context: bearer token, its claims and the signed-in
//! user. Passed to [`crate::api::ApiClient`] instead of living in global
//! storage.

use chrono::{DateTime, Utc};

use crate::{
    auth::{AuthError, AuthResult, UserClaims, inspect_token},
    model::entity::{User, UserRole},
};

#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    claims: UserClaims,
    user: Option<User>,
}

impl Session {
    pub fn from_token<S: Into<String>>(token: S) -> AuthResult<Self> {
        let token = token.into();
        let claims = inspect_token(&token)?;
        Ok(Self {
            token,
            claims,
            user: None,
        })
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Numeric user id, taken from the user record or the `sub` claim.
    pub fn user_id(&self) -> Option<i64> {
        self.user
            .as_ref()
            .map(|u| u.id())
            .or_else(|| self.claims.sub.parse().ok())
    }

    pub fn role(&self) -> UserRole {
        match (&self.user, &self.claims.role) {
            (Some(user), _) => user.role(),
            (None, Some(role)) => UserRole::from(role.as_str()),
            (None, None) => UserRole::Student,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.claims.exp, 0)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_none_or(|exp| exp <= now)
    }

    /// Token for the `Authorization` header, refused once expired.
    pub fn bearer(&self) -> AuthResult<&str> {
        if self.is_expired_at(Utc::now()) {
            return Err(AuthError::SessionExpired {
                expired_at: self.expires_at().unwrap_or(DateTime::UNIX_EPOCH),
            });
        }
        Ok(&self.token)
    }
}
