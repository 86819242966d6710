use serde::{Deserialize, Serialize};

use crate::impl_rest_resource;
use crate::model::error::{ValidationErrors, ValidationResult};
use crate::model::validate::{Validate, check_present};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    #[serde(other)]
    Student,
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "teacher" => Self::Teacher,
            _ => Self::Student,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Teacher => write!(f, "teacher"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: i64,
    name: String,
    email: String,
    #[serde(default = "default_role")]
    role: UserRole,
    #[serde(default)]
    group_id: Option<i64>,
}

fn default_role() -> UserRole {
    UserRole::Student
}

impl_rest_resource!(User, UserCreate, "/users", User);

impl User {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn group_id(&self) -> Option<i64> {
        self.group_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl Validate for UserCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_present(&mut errors, "name", &self.name);
        if !self.email.contains('@') {
            errors.add("email", "must be a valid email address");
        }
        if self.password.chars().count() < 8 {
            errors.add("password", "must be at least 8 characters");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_role_falls_back_to_student() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Ann",
            "email": "ann@learnup.io",
            "role": "guest",
        }))
        .unwrap();
        assert_eq!(user.role(), UserRole::Student);
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Admin, UserRole::Teacher, UserRole::Student] {
            assert_eq!(UserRole::from(role.to_string().as_str()), role);
        }
    }

    #[test]
    fn create_validation() {
        let errors = UserCreate {
            name: String::from("Ann"),
            email: String::from("ann"),
            password: String::from("short"),
            role: UserRole::Student,
            group_id: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.field("email").len(), 1);
        assert_eq!(errors.field("password").len(), 1);
        assert!(errors.field("name").is_empty());
    }
}
