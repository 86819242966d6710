//! In-memory [`QuizBackend`] used by the unit tests.

use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicI64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    api::{ApiError, ApiResult, QuizBackend},
    model::{
        ResourceType,
        entity::{Course, Exam, PassedExam, PassedExamCreate, UserAnswer, UserAnswerCreate},
    },
};

/// Course 1 pointing at exam 100.
pub fn sample_course(required_score: Option<u32>) -> Course {
    serde_json::from_value(json!({
        "id": 1,
        "title": "Rust basics",
        "description": "ownership",
        "exam": { "id": 100 },
        "required_score": required_score,
    }))
    .unwrap()
}

/// Exam 100: two single-choice questions (correct 11 and 21) and one
/// multiple-choice question (correct {31, 32}).
pub fn sample_exam() -> Exam {
    serde_json::from_value(sample_exam_json()).unwrap()
}

/// [`sample_exam`] detached from any course.
pub fn standalone_exam() -> Exam {
    let mut value = sample_exam_json();
    value["course_id"] = Value::Null;
    serde_json::from_value(value).unwrap()
}

fn sample_exam_json() -> Value {
    json!({
        "id": 100,
        "course_id": 1,
        "title": "Rust basics exam",
        "questions": [
            { "id": 1, "text": "Who owns a moved value?", "answers": [
                { "id": 11, "text": "the receiver", "is_correct": true },
                { "id": 12, "text": "the sender" },
                { "id": 13, "text": "both" },
            ]},
            { "id": 2, "text": "Is `&mut` aliasable?", "answers": [
                { "id": 21, "text": "no", "is_correct": true },
                { "id": 22, "text": "yes" },
            ]},
            { "id": 3, "text": "Which are Copy?", "type": "multiple", "answers": [
                { "id": 31, "text": "i32", "is_correct": true },
                { "id": 32, "text": "bool", "is_correct": true },
                { "id": 33, "text": "String" },
            ]},
        ],
    })
}

pub struct MockBackend {
    course: Course,
    exam: Exam,
    next_id: AtomicI64,
    fail_answers: AtomicBool,
    save_delay: Mutex<Duration>,
    passed_exams: Mutex<Vec<PassedExamCreate>>,
    user_answers: Mutex<Vec<UserAnswerCreate>>,
    deleted: Mutex<Vec<i64>>,
}

impl MockBackend {
    pub fn new(course: Course, exam: Exam) -> Self {
        Self {
            course,
            exam,
            next_id: AtomicI64::new(1),
            fail_answers: AtomicBool::new(false),
            save_delay: Mutex::new(Duration::ZERO),
            passed_exams: Mutex::new(vec![]),
            user_answers: Mutex::new(vec![]),
            deleted: Mutex::new(vec![]),
        }
    }

    pub fn fail_user_answers(&self, fail: bool) {
        self.fail_answers.store(fail, Ordering::SeqCst);
    }

    /// Delays every `create_passed_exam` call by `delay`.
    pub fn slow_saves(&self, delay: Duration) {
        *self.save_delay.lock().unwrap() = delay;
    }

    pub fn passed_exams(&self) -> Vec<PassedExamCreate> {
        self.passed_exams.lock().unwrap().clone()
    }

    pub fn user_answers(&self) -> Vec<UserAnswerCreate> {
        self.user_answers.lock().unwrap().clone()
    }

    pub fn deleted_passed_exams(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }

    fn not_found(resource_type: ResourceType) -> ApiError {
        ApiError::NotFound { resource_type }
    }
}

#[async_trait]
impl QuizBackend for MockBackend {
    async fn fetch_course(&self, course_id: i64) -> ApiResult<Course> {
        if course_id != self.course.id() {
            return Err(Self::not_found(ResourceType::Course));
        }
        Ok(self.course.clone())
    }

    async fn fetch_exam(&self, exam_id: i64) -> ApiResult<Exam> {
        if exam_id != self.exam.id() {
            return Err(Self::not_found(ResourceType::Exam));
        }
        Ok(self.exam.clone())
    }

    async fn create_passed_exam(&self, data: &PassedExamCreate) -> ApiResult<PassedExam> {
        let delay = *self.save_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.passed_exams.lock().unwrap().push(data.clone());
        Ok(serde_json::from_value(json!({
            "id": id,
            "exam_id": data.exam_id,
            "score": data.score,
            "created_at": "2026-10-19T10:00:00Z",
        }))
        .unwrap())
    }

    async fn create_user_answer(&self, data: &UserAnswerCreate) -> ApiResult<UserAnswer> {
        if self.fail_answers.load(Ordering::SeqCst) {
            return Err(ApiError::from_status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ResourceType::UserAnswer,
                String::from("boom"),
            ));
        }
        let mut answers = self.user_answers.lock().unwrap();
        answers.push(data.clone());
        Ok(serde_json::from_value(json!({
            "id": answers.len(),
            "question_id": data.question_id,
            "answer_id": data.answer_id,
            "passed_exam_id": data.passed_exam_id,
        }))
        .unwrap())
    }

    async fn delete_passed_exam(&self, passed_exam_id: i64) -> ApiResult<()> {
        self.deleted.lock().unwrap().push(passed_exam_id);
        Ok(())
    }

    async fn fetch_passed_exam(&self, passed_exam_id: i64) -> ApiResult<PassedExam> {
        let stored = self.passed_exams.lock().unwrap();
        let index = usize::try_from(passed_exam_id - 1)
            .ok()
            .filter(|i| *i < stored.len())
            .ok_or(Self::not_found(ResourceType::PassedExam))?;
        let data = &stored[index];
        Ok(serde_json::from_value(json!({
            "id": passed_exam_id,
            "exam_id": data.exam_id,
            "score": data.score,
        }))
        .unwrap())
    }

    async fn fetch_user_answers(&self, passed_exam_id: i64) -> ApiResult<Vec<UserAnswer>> {
        Ok(self
            .user_answers
            .lock()
            .unwrap()
            .iter()
            .enumerate()
            .filter(|(_, a)| a.passed_exam_id == passed_exam_id)
            .map(|(i, a)| {
                serde_json::from_value(json!({
                    "id": i + 1,
                    "question_id": a.question_id,
                    "answer_id": a.answer_id,
                    "passed_exam_id": a.passed_exam_id,
                }))
                .unwrap()
            })
            .collect())
    }
}
