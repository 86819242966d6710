use serde::{Deserialize, Serialize};

use crate::impl_rest_resource;
use crate::model::error::{ValidationErrors, ValidationResult};
use crate::model::validate::{Validate, check_id, check_length, check_present, check_score};

/// Short exam reference nested in a course response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRef {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    id: i64,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    specialty_id: Option<i64>,
    #[serde(default)]
    user_id: Option<i64>,
    #[serde(default)]
    exam: Option<ExamRef>,
    #[serde(default)]
    required_score: Option<u32>,
    #[serde(default)]
    image: Option<String>,
}

impl_rest_resource!(Course, CourseCreate, "/courses", Course);

impl Course {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn specialty_id(&self) -> Option<i64> {
        self.specialty_id
    }

    /// Author (teacher) of the course.
    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn exam(&self) -> Option<&ExamRef> {
        self.exam.as_ref()
    }

    pub fn required_score(&self) -> Option<u32> {
        self.required_score
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCreate {
    pub title: String,
    pub description: String,
    pub specialty_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Validate for CourseCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "title", &self.title, 3, 255);
        check_present(&mut errors, "description", &self.description);
        check_id(&mut errors, "specialty_id", self.specialty_id);
        if let Some(score) = self.required_score {
            check_score(&mut errors, "required_score", score);
        }
        errors.into_result()
    }
}
