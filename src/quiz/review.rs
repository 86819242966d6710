use std::collections::BTreeSet;

use crate::{
    api::QuizBackend,
    model::entity::{PassedExam, QuestionKind, UserAnswer},
    quiz::{
        error::QuizResult,
        scoring::{Selection, is_passed, percentage, question_score},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub question_id: i64,
    pub question: String,
    /// Texts of the answers picked in the attempt.
    pub chosen: Vec<String>,
    pub correct: Vec<String>,
    pub is_correct: bool,
}

/// Results-review screen for one stored attempt.
#[derive(Debug, Clone)]
pub struct ResultReview {
    passed_exam: PassedExam,
    exam_title: String,
    course_id: Option<i64>,
    required_score: u32,
    rows: Vec<ReviewRow>,
}

impl ResultReview {
    #[tracing::instrument(skip(backend))]
    pub async fn load<B: QuizBackend + ?Sized>(
        backend: &B,
        passed_exam_id: i64,
        default_required_score: u32,
    ) -> QuizResult<Self> {
        let passed_exam = backend.fetch_passed_exam(passed_exam_id).await?;
        let user_answers = backend.fetch_user_answers(passed_exam_id).await?;
        let exam = backend.fetch_exam(passed_exam.exam_id()).await?;

        let required_score = match exam.course_id() {
            Some(course_id) => backend
                .fetch_course(course_id)
                .await?
                .required_score()
                .unwrap_or(default_required_score),
            None => default_required_score,
        };

        let rows = exam
            .questions()
            .iter()
            .map(|question| {
                let picked: BTreeSet<i64> = user_answers
                    .iter()
                    .filter(|a| a.question_id() == question.id())
                    .map(UserAnswer::answer_id)
                    .collect();

                let selection = match question.kind() {
                    _ if picked.is_empty() => None,
                    QuestionKind::Single if picked.len() == 1 => {
                        picked.first().copied().map(Selection::Single)
                    }
                    // several stored picks on a single-choice question never score
                    _ => Some(Selection::Multiple(picked.clone())),
                };

                let text_of = |id: i64| {
                    question
                        .answer(id)
                        .map(|a| a.text().to_string())
                        .unwrap_or_else(|| format!("(removed answer #{id})"))
                };

                ReviewRow {
                    question_id: question.id(),
                    question: question.text().to_string(),
                    chosen: picked.iter().copied().map(text_of).collect(),
                    correct: question
                        .correct_answer_ids()
                        .into_iter()
                        .map(text_of)
                        .collect(),
                    is_correct: question_score(question, selection.as_ref()) == 1,
                }
            })
            .collect();

        Ok(Self {
            course_id: exam.course_id(),
            exam_title: exam.title().to_string(),
            passed_exam,
            required_score,
            rows,
        })
    }

    pub fn passed_exam(&self) -> &PassedExam {
        &self.passed_exam
    }

    pub fn exam_title(&self) -> &str {
        &self.exam_title
    }

    pub fn course_id(&self) -> Option<i64> {
        self.course_id
    }

    pub fn required_score(&self) -> u32 {
        self.required_score
    }

    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    /// Score as stored by the API.
    pub fn score(&self) -> u32 {
        self.passed_exam.score()
    }

    pub fn passed(&self) -> bool {
        is_passed(self.score(), self.required_score)
    }

    /// Score recomputed from the stored answers; differs from [`Self::score`]
    /// when answers were lost or the exam changed since the attempt.
    pub fn recomputed_score(&self) -> u32 {
        let correct = self.rows.iter().filter(|r| r.is_correct).count();
        percentage(correct, self.rows.len())
    }
}
