use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_rest_resource;
use crate::model::error::{ValidationErrors, ValidationResult};
use crate::model::validate::{Validate, check_id, check_score};

/// One persisted exam attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassedExam {
    id: i64,
    exam_id: i64,
    #[serde(default)]
    user_id: Option<i64>,
    score: u32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl_rest_resource!(PassedExam, PassedExamCreate, "/passed-exams", PassedExam);

impl PassedExam {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn exam_id(&self) -> i64 {
        self.exam_id
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassedExamCreate {
    pub exam_id: i64,
    pub score: u32,
}

impl Validate for PassedExamCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, "exam_id", self.exam_id);
        check_score(&mut errors, "score", self.score);
        errors.into_result()
    }
}

/// A single answer selection belonging to a [`PassedExam`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAnswer {
    id: i64,
    question_id: i64,
    answer_id: i64,
    passed_exam_id: i64,
}

impl_rest_resource!(UserAnswer, UserAnswerCreate, "/user-answers", UserAnswer);

impl UserAnswer {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn question_id(&self) -> i64 {
        self.question_id
    }

    pub fn answer_id(&self) -> i64 {
        self.answer_id
    }

    pub fn passed_exam_id(&self) -> i64 {
        self.passed_exam_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswerCreate {
    pub question_id: i64,
    pub answer_id: i64,
    pub passed_exam_id: i64,
}

impl Validate for UserAnswerCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, "question_id", self.question_id);
        check_id(&mut errors, "answer_id", self.answer_id);
        check_id(&mut errors, "passed_exam_id", self.passed_exam_id);
        errors.into_result()
    }
}
