use crate::model::error::{ValidationErrors, ValidationResult};

/// Local presence/length checks run before a payload reaches the API.
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

pub(crate) fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.add(field, "is required");
    } else if len < min {
        errors.add(field, format!("must be at least {min} characters"));
    } else if len > max {
        errors.add(field, format!("must be at most {max} characters"));
    }
}

pub(crate) fn check_present(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "is required");
    }
}

pub(crate) fn check_id(errors: &mut ValidationErrors, field: &'static str, id: i64) {
    if id <= 0 {
        errors.add(field, "must reference an existing record");
    }
}

pub(crate) fn check_score(errors: &mut ValidationErrors, field: &'static str, score: u32) {
    if score > 100 {
        errors.add(field, "must be within 0..=100");
    }
}
