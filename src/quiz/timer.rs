use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    api::QuizBackend,
    model::entity::PassedExam,
    quiz::{
        error::{QuizError, QuizResult},
        scoring::QuizOutcome,
        session::{SharedSession, persist_shared},
    },
};

pub const TICK: Duration = Duration::from_secs(1);

/// How the countdown task ended.
#[derive(Debug)]
pub enum TimerExit {
    /// Stopped from outside, e.g. the quiz screen went away.
    Cancelled,
    /// The session was submitted by hand before the clock ran out.
    SubmittedManually,
    /// The clock ran out; the attempt was submitted and a save attempted.
    Expired {
        outcome: QuizOutcome,
        persisted: QuizResult<PassedExam>,
    },
}

/// A submitted attempt and the result of storing it.
#[derive(Debug)]
pub struct Finished {
    pub outcome: QuizOutcome,
    pub persisted: QuizResult<PassedExam>,
}

/// One-second countdown driving [`crate::quiz::QuizSession::tick`].
///
/// Dropping the timer cancels the task.
pub struct QuizTimer {
    cancel: CancellationToken,
    handle: Option<JoinHandle<TimerExit>>,
    _guard: DropGuard,
}

impl QuizTimer {
    pub fn spawn<B>(session: SharedSession, backend: Arc<B>) -> Self
    where
        B: QuizBackend + ?Sized + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("quiz timer cancelled");
                        return TimerExit::Cancelled;
                    }
                    _ = interval.tick() => {
                        let expired = {
                            let mut s = session.lock().await;
                            if s.is_submitted() {
                                return TimerExit::SubmittedManually;
                            }
                            s.tick()
                        };

                        if let Some(outcome) = expired {
                            let persisted = persist_shared(&session, backend.as_ref()).await;
                            if let Err(e) = &persisted {
                                tracing::warn!("auto-submitted result not stored: {e}");
                            }
                            return TimerExit::Expired { outcome, persisted };
                        }
                    }
                }
            }
        });

        Self {
            _guard: cancel.clone().drop_guard(),
            cancel,
            handle: Some(handle),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Submits the session by hand. When the clock already ran out, the
    /// countdown task owns the attempt and its save is awaited instead, so
    /// the attempt is scored and stored exactly once either way.
    pub async fn submit<B: QuizBackend + ?Sized>(
        &mut self,
        session: &SharedSession,
        backend: &B,
    ) -> QuizResult<Finished> {
        let manual = session.lock().await.submit();
        if let Some(outcome) = manual {
            self.cancel();
            let persisted = persist_shared(session, backend).await;
            return Ok(Finished { outcome, persisted });
        }

        match self.wait().await? {
            TimerExit::Expired { outcome, persisted } => Ok(Finished { outcome, persisted }),
            TimerExit::Cancelled | TimerExit::SubmittedManually => {
                let outcome = session
                    .lock()
                    .await
                    .outcome()
                    .cloned()
                    .ok_or(QuizError::NotSubmitted)?;
                let persisted = persist_shared(session, backend).await;
                Ok(Finished { outcome, persisted })
            }
        }
    }

    /// Waits for the countdown task to end. Safe to use inside
    /// `tokio::select!`; once the exit was observed, later calls report
    /// [`TimerExit::Cancelled`].
    pub async fn wait(&mut self) -> QuizResult<TimerExit> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(TimerExit::Cancelled);
        };
        let exit = handle.await;
        self.handle = None;
        Ok(exit?)
    }
}
