//! Quiz session controller: which question is shown, what has been picked,
//! how much time is left, and whether the attempt is over.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    api::QuizBackend,
    config,
    error::log_error,
    model::entity::{Exam, PassedExam, PassedExamCreate, Question, QuestionKind, UserAnswerCreate},
    quiz::{
        error::{QuizError, QuizResult},
        scoring::{QuizOutcome, Selection, evaluate},
    },
};

/// Session shared between the foreground and [`crate::quiz::QuizTimer`].
pub type SharedSession = Arc<Mutex<QuizSession>>;

#[derive(Debug, Clone)]
enum Persistence {
    Idle,
    InFlight,
    Persisted(PassedExam),
}

/// Payloads of one submission: the aggregate result, then one record per
/// selected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub exam_id: i64,
    pub score: u32,
    /// `(question_id, answer_id)` in question order.
    pub answers: Vec<(i64, i64)>,
}

pub(crate) enum PersistStep {
    Send(Submission),
    Done(PassedExam),
}

#[derive(Debug)]
pub struct QuizSession {
    exam: Exam,
    required_score: u32,
    current_question_index: usize,
    answers: HashMap<i64, Selection>,
    time_remaining_seconds: u64,
    outcome: Option<QuizOutcome>,
    persistence: Persistence,
}

impl QuizSession {
    pub fn new(exam: Exam, required_score: u32, duration_minutes: u32) -> QuizResult<Self> {
        if exam.questions().is_empty() {
            return Err(QuizError::EmptyExam { exam_id: exam.id() });
        }

        Ok(Self {
            exam,
            required_score,
            current_question_index: 0,
            answers: HashMap::new(),
            time_remaining_seconds: u64::from(duration_minutes) * 60,
            outcome: None,
            persistence: Persistence::Idle,
        })
    }

    /// Loads the course and its exam, then opens a session on it.
    #[tracing::instrument(skip(backend, defaults))]
    pub async fn start<B: QuizBackend + ?Sized>(
        backend: &B,
        course_id: i64,
        defaults: config::Quiz,
    ) -> QuizResult<Self> {
        let course = backend.fetch_course(course_id).await?;
        let exam_id = course
            .exam()
            .map(|e| e.id)
            .ok_or(QuizError::CourseWithoutExam { course_id })?;

        let exam = backend.fetch_exam(exam_id).await?;
        let required_score = course
            .required_score()
            .unwrap_or(defaults.required_score());
        let duration = exam
            .duration_minutes()
            .unwrap_or(defaults.duration_minutes());

        tracing::info!(
            exam_id,
            questions = exam.questions().len(),
            required_score,
            duration,
            "quiz started"
        );
        Self::new(exam, required_score, duration)
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    pub fn required_score(&self) -> u32 {
        self.required_score
    }

    pub fn question_count(&self) -> usize {
        self.exam.questions().len()
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question(&self) -> &Question {
        &self.exam.questions()[self.current_question_index]
    }

    pub fn selection(&self, question_id: i64) -> Option<&Selection> {
        self.answers.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|s| !s.is_empty()).count()
    }

    pub fn time_remaining_seconds(&self) -> u64 {
        self.time_remaining_seconds
    }

    pub fn is_submitted(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_persisting(&self) -> bool {
        matches!(self.persistence, Persistence::InFlight)
    }

    pub fn passed_exam(&self) -> Option<&PassedExam> {
        match &self.persistence {
            Persistence::Persisted(p) => Some(p),
            _ => None,
        }
    }

    /// Single-choice questions keep the latest pick; multiple-choice
    /// questions toggle the picked id in and out of the set.
    pub fn select_answer(&mut self, question_id: i64, answer_id: i64) -> QuizResult<()> {
        if self.is_submitted() {
            return Err(QuizError::AlreadySubmitted);
        }

        let question = self
            .exam
            .question(question_id)
            .ok_or(QuizError::UnknownQuestion { question_id })?;
        if question.answer(answer_id).is_none() {
            return Err(QuizError::UnknownAnswer {
                question_id,
                answer_id,
            });
        }

        match question.kind() {
            QuestionKind::Single => {
                self.answers.insert(question_id, Selection::Single(answer_id));
            }
            QuestionKind::Multiple => {
                let entry = self
                    .answers
                    .entry(question_id)
                    .or_insert_with(|| Selection::Multiple(Default::default()));
                if let Selection::Multiple(ids) = entry {
                    if !ids.remove(&answer_id) {
                        ids.insert(answer_id);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn next(&mut self) -> usize {
        if self.current_question_index + 1 < self.question_count() {
            self.current_question_index += 1;
        }
        self.current_question_index
    }

    pub fn previous(&mut self) -> usize {
        self.current_question_index = self.current_question_index.saturating_sub(1);
        self.current_question_index
    }

    /// One second elapsed. Returns the outcome when this tick ran the clock
    /// out and submitted the attempt.
    pub fn tick(&mut self) -> Option<QuizOutcome> {
        if self.is_submitted() {
            return None;
        }

        self.time_remaining_seconds = self.time_remaining_seconds.saturating_sub(1);
        if self.time_remaining_seconds == 0 {
            tracing::info!(exam_id = self.exam.id(), "time is up");
            return self.submit();
        }
        None
    }

    /// Locks the answers and scores them. Only the first call yields an
    /// outcome.
    pub fn submit(&mut self) -> Option<QuizOutcome> {
        if self.is_submitted() {
            return None;
        }

        let outcome = evaluate(&self.exam, &self.answers, self.required_score);
        tracing::info!(
            exam_id = self.exam.id(),
            score = outcome.score(),
            passed = outcome.passed(),
            "quiz submitted"
        );
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }

    pub fn submission(&self) -> QuizResult<Submission> {
        let outcome = self.outcome.as_ref().ok_or(QuizError::NotSubmitted)?;

        let answers = self
            .exam
            .questions()
            .iter()
            .filter_map(|q| self.answers.get(&q.id()).map(|s| (q.id(), s)))
            .flat_map(|(qid, s)| s.answer_ids().into_iter().map(move |aid| (qid, aid)))
            .collect();

        Ok(Submission {
            exam_id: self.exam.id(),
            score: outcome.score(),
            answers,
        })
    }

    pub(crate) fn begin_persist(&mut self) -> QuizResult<PersistStep> {
        match &self.persistence {
            Persistence::InFlight => Err(QuizError::SubmissionInFlight),
            Persistence::Persisted(p) => Ok(PersistStep::Done(p.clone())),
            Persistence::Idle => {
                let submission = self.submission()?;
                self.persistence = Persistence::InFlight;
                Ok(PersistStep::Send(submission))
            }
        }
    }

    pub(crate) fn finish_persist(&mut self, result: &QuizResult<PassedExam>) {
        self.persistence = match result {
            Ok(passed) => Persistence::Persisted(passed.clone()),
            Err(_) => Persistence::Idle,
        };
    }

    /// Stores the submitted attempt. Failures leave the session retryable;
    /// once stored, later calls return the same record without new requests.
    pub async fn persist<B: QuizBackend + ?Sized>(&mut self, backend: &B) -> QuizResult<PassedExam> {
        let submission = match self.begin_persist()? {
            PersistStep::Done(passed) => return Ok(passed),
            PersistStep::Send(submission) => submission,
        };

        let result = send_submission(backend, &submission).await;
        self.finish_persist(&result);
        result
    }
}

/// Same as [`QuizSession::persist`], without holding the lock across the
/// network calls.
pub async fn persist_shared<B: QuizBackend + ?Sized>(
    session: &SharedSession,
    backend: &B,
) -> QuizResult<PassedExam> {
    let submission = match session.lock().await.begin_persist()? {
        PersistStep::Done(passed) => return Ok(passed),
        PersistStep::Send(submission) => submission,
    };

    let result = send_submission(backend, &submission).await;
    session.lock().await.finish_persist(&result);
    result
}

/// Creates the result record, then one record per answer. If an answer
/// fails, the result record is deleted again so no half-written attempt is
/// left behind.
#[tracing::instrument(skip_all, fields(exam_id = submission.exam_id, score = submission.score))]
pub async fn send_submission<B: QuizBackend + ?Sized>(
    backend: &B,
    submission: &Submission,
) -> QuizResult<PassedExam> {
    let passed = backend
        .create_passed_exam(&PassedExamCreate {
            exam_id: submission.exam_id,
            score: submission.score,
        })
        .await
        .map_err(QuizError::SaveFailed)?;

    for &(question_id, answer_id) in &submission.answers {
        let created = backend
            .create_user_answer(&UserAnswerCreate {
                question_id,
                answer_id,
                passed_exam_id: passed.id(),
            })
            .await;

        if let Err(e) = created {
            tracing::warn!(passed_exam_id = passed.id(), "answer not stored, rolling back result");
            if let Err(cleanup) = backend.delete_passed_exam(passed.id()).await {
                tracing::error!(passed_exam_id = passed.id(), "orphaned result record left behind");
                log_error(&cleanup);
            }
            return Err(QuizError::SaveFailed(e));
        }
    }

    tracing::info!(passed_exam_id = passed.id(), answers = submission.answers.len(), "result stored");
    Ok(passed)
}
