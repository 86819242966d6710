use async_trait::async_trait;

use crate::{
    api::{ApiClient, ApiResult},
    model::entity::{Course, Exam, PassedExam, PassedExamCreate, UserAnswer, UserAnswerCreate},
};

/// The calls a quiz attempt makes against the API, from loading the exam
/// to reviewing the stored result.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn fetch_course(&self, course_id: i64) -> ApiResult<Course>;
    async fn fetch_exam(&self, exam_id: i64) -> ApiResult<Exam>;
    async fn create_passed_exam(&self, data: &PassedExamCreate) -> ApiResult<PassedExam>;
    async fn create_user_answer(&self, data: &UserAnswerCreate) -> ApiResult<UserAnswer>;
    async fn delete_passed_exam(&self, passed_exam_id: i64) -> ApiResult<()>;
    async fn fetch_passed_exam(&self, passed_exam_id: i64) -> ApiResult<PassedExam>;
    async fn fetch_user_answers(&self, passed_exam_id: i64) -> ApiResult<Vec<UserAnswer>>;
}

#[async_trait]
impl QuizBackend for ApiClient {
    async fn fetch_course(&self, course_id: i64) -> ApiResult<Course> {
        self.find_by_id(course_id).await
    }

    async fn fetch_exam(&self, exam_id: i64) -> ApiResult<Exam> {
        self.find_by_id(exam_id).await
    }

    async fn create_passed_exam(&self, data: &PassedExamCreate) -> ApiResult<PassedExam> {
        self.create::<PassedExam>(data).await
    }

    async fn create_user_answer(&self, data: &UserAnswerCreate) -> ApiResult<UserAnswer> {
        self.create::<UserAnswer>(data).await
    }

    async fn delete_passed_exam(&self, passed_exam_id: i64) -> ApiResult<()> {
        self.delete::<PassedExam>(passed_exam_id).await
    }

    async fn fetch_passed_exam(&self, passed_exam_id: i64) -> ApiResult<PassedExam> {
        self.find_by_id(passed_exam_id).await
    }

    async fn fetch_user_answers(&self, passed_exam_id: i64) -> ApiResult<Vec<UserAnswer>> {
        self.passed_exam_answers(passed_exam_id).await
    }
}
