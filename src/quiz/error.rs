use thiserror::Error;

use crate::{
    api::ApiError,
    model::ResourceType,
};

pub type QuizResult<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("CourseWithoutExam: course {course_id}")]
    CourseWithoutExam { course_id: i64 },

    #[error("EmptyExam: exam {exam_id}")]
    EmptyExam { exam_id: i64 },

    #[error("UnknownQuestion: {question_id}")]
    UnknownQuestion { question_id: i64 },

    #[error("UnknownAnswer: answer {answer_id} is not part of question {question_id}")]
    UnknownAnswer { question_id: i64, answer_id: i64 },

    #[error("AlreadySubmitted")]
    AlreadySubmitted,

    #[error("NotSubmitted")]
    NotSubmitted,

    #[error("SubmissionInFlight")]
    SubmissionInFlight,

    #[error("TimerFailed: {0}")]
    TimerFailed(#[from] tokio::task::JoinError),

    /// Storing a submitted attempt failed. The session keeps the attempt,
    /// so saving can always be repeated.
    #[error("SaveFailed - {0}")]
    SaveFailed(ApiError),

    #[error("ApiError - {0}")]
    Api(#[from] ApiError),
}

/// Screen the front end falls back to when a quiz cannot go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    CourseList,
    Course { course_id: i64 },
}

/// How the front end should surface a [`QuizError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// Transient notice; the session stays in memory.
    Banner { message: String, retryable: bool },
    /// Leave the quiz screen with an explanation.
    Redirect { to: Screen, message: String },
    /// The session is kept; the user has to sign in again before retrying.
    SignIn { message: String },
}

impl QuizError {
    pub fn recovery(&self) -> Recovery {
        let message = self.client_display();
        match self {
            Self::CourseWithoutExam { course_id } => Recovery::Redirect {
                to: Screen::Course {
                    course_id: *course_id,
                },
                message,
            },
            Self::EmptyExam { .. } => Recovery::Redirect {
                to: Screen::CourseList,
                message,
            },
            Self::Api(ApiError::NotFound {
                resource_type: ResourceType::Course | ResourceType::Exam,
            }) => Recovery::Redirect {
                to: Screen::CourseList,
                message,
            },
            Self::SaveFailed(e) if e.requires_sign_in() => Recovery::SignIn { message },
            Self::SaveFailed(_) => Recovery::Banner {
                message,
                retryable: true,
            },
            Self::Api(e) if e.requires_sign_in() => Recovery::SignIn { message },
            Self::Api(e) => Recovery::Banner {
                message,
                retryable: e.is_retryable(),
            },
            Self::SubmissionInFlight | Self::TimerFailed(_) => Recovery::Banner {
                message,
                retryable: true,
            },
            Self::UnknownQuestion { .. }
            | Self::UnknownAnswer { .. }
            | Self::AlreadySubmitted
            | Self::NotSubmitted => Recovery::Banner {
                message,
                retryable: false,
            },
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::CourseWithoutExam { .. } => {
                String::from("This course does not have an exam yet.")
            }
            Self::EmptyExam { .. } => String::from("This exam has no questions yet."),
            Self::UnknownQuestion { .. } => String::from("That question is not part of this exam."),
            Self::UnknownAnswer { .. } => {
                String::from("That answer does not belong to the current question.")
            }
            Self::AlreadySubmitted => String::from("The quiz has already been submitted."),
            Self::NotSubmitted => String::from("Submit the quiz before saving the result."),
            Self::SubmissionInFlight => String::from("Your answers are being saved, please wait."),
            Self::TimerFailed(_) => String::from("The quiz timer stopped unexpectedly."),
            Self::SaveFailed(e) if e.requires_sign_in() => {
                String::from("Your session has expired, sign in again to save your result.")
            }
            Self::SaveFailed(e) => format!("Result not saved. {}", e.client_display()),
            Self::Api(e) => e.client_display(),
        }
    }
}
