use serde::{Deserialize, Serialize};

use crate::impl_rest_resource;
use crate::model::error::{ValidationErrors, ValidationResult};
use crate::model::validate::{Validate, check_id, check_length, check_present};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    id: i64,
    course_id: i64,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    position: Option<i32>,
}

impl_rest_resource!(Lesson, LessonCreate, "/lessons", Lesson);

impl Lesson {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn course_id(&self) -> i64 {
        self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Option<i32> {
        self.position
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonCreate {
    pub course_id: i64,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl Validate for LessonCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, "course_id", self.course_id);
        check_length(&mut errors, "title", &self.title, 3, 255);
        check_present(&mut errors, "content", &self.content);
        errors.into_result()
    }
}
