mod error;
pub use error::{QuizError, QuizResult, Recovery, Screen};

mod review;
pub use review::{ResultReview, ReviewRow};

pub mod scoring;
pub use scoring::{QuizOutcome, Selection};

mod session;
pub use session::{QuizSession, SharedSession, Submission, persist_shared, send_submission};

mod timer;
pub use timer::{Finished, QuizTimer, TimerExit};

#[cfg(test)]
pub(crate) mod testing;
