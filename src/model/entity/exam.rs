use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::impl_rest_resource;
use crate::model::error::{ValidationErrors, ValidationResult};
use crate::model::validate::{Validate, check_id, check_length, check_present};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    id: i64,
    #[serde(default)]
    course_id: Option<i64>,
    #[serde(default)]
    title: String,
    #[serde(default, alias = "duration")]
    duration_minutes: Option<u32>,
    #[serde(default)]
    questions: Vec<Question>,
}

impl_rest_resource!(Exam, ExamCreate, "/exams", Exam);

impl Exam {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn course_id(&self) -> Option<i64> {
        self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    /// Questions in the order they are administered.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamCreate {
    pub course_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl Validate for ExamCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, "course_id", self.course_id);
        check_length(&mut errors, "title", &self.title, 3, 255);
        if self.duration_minutes == Some(0) {
            errors.add("duration_minutes", "must be positive");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[serde(alias = "single_choice")]
    Single,
    #[serde(alias = "multiple_choice")]
    Multiple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    id: i64,
    text: String,
    #[serde(default, rename = "type")]
    kind: Option<QuestionKind>,
    #[serde(default)]
    answers: Vec<Answer>,
}

impl_rest_resource!(Question, QuestionCreate, "/questions", Question);

impl Question {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Declared kind, or inferred from the number of correct answers.
    pub fn kind(&self) -> QuestionKind {
        match self.kind {
            Some(kind) => kind,
            None if self.answers.iter().filter(|a| a.is_correct).count() > 1 => {
                QuestionKind::Multiple
            }
            None => QuestionKind::Single,
        }
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn answer(&self, id: i64) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    pub fn correct_answer_ids(&self) -> BTreeSet<i64> {
        self.answers
            .iter()
            .filter(|a| a.is_correct)
            .map(|a| a.id)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    id: i64,
    text: String,
    #[serde(default)]
    is_correct: bool,
}

impl Answer {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCreate {
    pub exam_id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub answers: Vec<AnswerCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerCreate {
    pub text: String,
    pub is_correct: bool,
}

impl Validate for QuestionCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, "exam_id", self.exam_id);
        check_present(&mut errors, "text", &self.text);

        if self.answers.len() < 2 {
            errors.add("answers", "at least two answers are required");
        }
        if self.answers.iter().any(|a| a.text.trim().is_empty()) {
            errors.add("answers", "answer text is required");
        }

        let correct = self.answers.iter().filter(|a| a.is_correct).count();
        match (self.kind, correct) {
            (_, 0) => errors.add("answers", "at least one answer must be correct"),
            (QuestionKind::Single, n) if n > 1 => {
                errors.add("answers", "single-choice questions take exactly one correct answer")
            }
            _ => {}
        }
        errors.into_result()
    }
}
