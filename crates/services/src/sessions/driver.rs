use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use quiz_core::model::{QuestionId, TopicName};
use quiz_core::timer::TimerEpoch;

use super::controller::QuizSession;
use super::results::ResultsHandoff;
use super::state::{Navigation, SessionSnapshot, SubmitOutcome, TickEffect, View};
use crate::error::SessionError;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drives a [`QuizSession`] in real time.
///
/// Serializes user actions and timer ticks through one lock, keeps exactly one
/// ticker task alive per running countdown and publishes a [`SessionSnapshot`]
/// after every change.
#[derive(Clone)]
pub struct SessionDriver {
    inner: Arc<Inner>,
}

struct Inner {
    shared: Mutex<Shared>,
    snapshots: watch::Sender<SessionSnapshot>,
    runtime: Handle,
    tick_interval: Duration,
}

struct Shared {
    session: QuizSession,
    ticker: Option<Ticker>,
}

struct Ticker {
    epoch: TimerEpoch,
    handle: JoinHandle<()>,
}

impl SessionDriver {
    #[must_use]
    pub fn new(session: QuizSession, runtime: Handle) -> Self {
        Self::with_tick_interval(session, runtime, DEFAULT_TICK_INTERVAL)
    }

    /// Like [`SessionDriver::new`], with one countdown second lasting `tick_interval`.
    #[must_use]
    pub fn with_tick_interval(
        session: QuizSession,
        runtime: Handle,
        tick_interval: Duration,
    ) -> Self {
        let (snapshots, _) = watch::channel(session.snapshot());
        let driver = Self {
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared {
                    session,
                    ticker: None,
                }),
                snapshots,
                runtime,
                tick_interval,
            }),
        };
        // The session may already be mid-section.
        driver.inner.sync_ticker(&mut driver.inner.lock());
        driver
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshots.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    /// Run `f` against the session without changing it.
    pub fn read<R>(&self, f: impl FnOnce(&QuizSession) -> R) -> R {
        f(&self.inner.lock().session)
    }

    //
    // ─── ACTIONS ───────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// See [`QuizSession::start_topic`].
    pub fn start_topic(&self, name: &TopicName) -> Result<(), SessionError> {
        self.apply("start section", |s| s.start_topic(name))
    }

    /// # Errors
    ///
    /// See [`QuizSession::start_next_topic`].
    pub fn start_next_topic(&self) -> Result<View, SessionError> {
        self.apply("start next section", QuizSession::start_next_topic)
    }

    /// # Errors
    ///
    /// See [`QuizSession::select_answer`].
    pub fn select_answer(&self, id: QuestionId, option: &str) -> Result<(), SessionError> {
        self.apply("select answer", |s| s.select_answer(id, option).map(|_| ()))
    }

    /// # Errors
    ///
    /// See [`QuizSession::next_question`].
    pub fn next_question(&self) -> Result<Navigation, SessionError> {
        self.apply("next question", QuizSession::next_question)
    }

    /// # Errors
    ///
    /// See [`QuizSession::prev_question`].
    pub fn prev_question(&self) -> Result<Navigation, SessionError> {
        self.apply("previous question", QuizSession::prev_question)
    }

    /// # Errors
    ///
    /// See [`QuizSession::request_submit`].
    pub fn request_submit(&self) -> Result<(), SessionError> {
        self.apply("request submit", QuizSession::request_submit)
    }

    /// # Errors
    ///
    /// See [`QuizSession::cancel_submit`].
    pub fn cancel_submit(&self) -> Result<(), SessionError> {
        self.apply("cancel submit", QuizSession::cancel_submit)
    }

    /// # Errors
    ///
    /// See [`QuizSession::confirm_submit`].
    pub fn confirm_submit(&self) -> Result<SubmitOutcome, SessionError> {
        self.apply("confirm submit", QuizSession::confirm_submit)
    }

    pub fn reset(&self) {
        let _ = self.apply("reset", |s| {
            s.reset();
            Ok(())
        });
    }

    /// # Errors
    ///
    /// See [`QuizSession::handoff`].
    pub fn handoff(&self) -> Result<ResultsHandoff, SessionError> {
        self.read(QuizSession::handoff)
    }

    /// Cancel the running ticker, if any. The session itself is left as is.
    pub fn shutdown(&self) {
        if let Some(ticker) = self.inner.lock().ticker.take() {
            ticker.handle.abort();
            debug!("ticker {:?} shut down", ticker.epoch);
        }
    }

    fn apply<T>(
        &self,
        action: &'static str,
        f: impl FnOnce(&mut QuizSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut shared = self.inner.lock();
        let result = f(&mut shared.session);
        if let Err(err) = &result {
            warn!("{action} rejected: {err}");
        }
        self.inner.sync_ticker(&mut shared);
        self.inner.publish(&shared);
        result
    }
}

// Two handles are equal when they drive the same session.
impl PartialEq for SessionDriver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for SessionDriver {}

impl std::fmt::Debug for SessionDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDriver")
            .field("tick_interval", &self.inner.tick_interval)
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, shared: &Shared) {
        self.snapshots.send_replace(shared.session.snapshot());
    }

    /// Make the ticker match the session's countdown: none when idle, one task for
    /// the current epoch otherwise.
    fn sync_ticker(self: &Arc<Self>, shared: &mut Shared) {
        if !shared.session.timer_running() {
            if let Some(ticker) = shared.ticker.take() {
                ticker.handle.abort();
            }
            return;
        }

        let epoch = shared.session.timer_epoch();
        if shared.ticker.as_ref().is_some_and(|t| t.epoch == epoch) {
            return;
        }
        if let Some(old) = shared.ticker.take() {
            old.handle.abort();
        }
        let handle = self
            .runtime
            .spawn(run_ticker(Arc::downgrade(self), epoch, self.tick_interval));
        debug!("ticker spawned for {epoch:?}");
        shared.ticker = Some(Ticker { epoch, handle });
    }
}

//
// ─── TICKER ────────────────────────────────────────────────────────────────────
//

async fn run_ticker(inner: Weak<Inner>, mut epoch: TimerEpoch, period: Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let Some(strong) = inner.upgrade() else {
            break;
        };
        let mut shared = strong.lock();

        let effect = shared.session.tick(epoch);
        if effect == TickEffect::Ignored {
            break;
        }

        let mut keep_running = true;
        if effect.is_transition() {
            match &effect {
                TickEffect::SectionTimedOut(outcome) => {
                    info!("time is up for {}", outcome.topic);
                }
                TickEffect::BreakElapsed { next_view } => {
                    info!("break over, moving to {next_view}");
                }
                _ => {}
            }

            // A transition restarts or stops the countdown; follow it from this task.
            let previous = epoch;
            let owns_slot = shared.ticker.as_ref().is_some_and(|t| t.epoch == previous);
            if shared.session.timer_running() {
                epoch = shared.session.timer_epoch();
                if owns_slot {
                    if let Some(ticker) = shared.ticker.as_mut() {
                        ticker.epoch = epoch;
                    }
                }
            } else {
                if owns_slot {
                    shared.ticker = None;
                }
                keep_running = false;
            }
        }

        strong.publish(&shared);
        if !keep_running {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{
        Branch, ParticipantDraft, Question, QuestionBank, QuizSettings,
    };
    use quiz_core::time::fixed_clock;

    fn session(secs: u32, break_secs: u32) -> QuizSession {
        let questions = ["Maths", "English"]
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                Question::new(
                    QuestionId::new(i as u32 + 1),
                    TopicName::new(*topic).unwrap(),
                    "Pick A",
                    vec!["A".into(), "B".into()],
                    Some("A".into()),
                )
                .unwrap()
            })
            .collect();
        let participant = ParticipantDraft {
            name: "Ravi".into(),
            roll_no: "42".into(),
            branch: Some(Branch::Electronics),
        }
        .validate()
        .unwrap();
        QuizSession::new(
            Arc::new(QuestionBank::new(questions).unwrap()),
            QuizSettings::new(secs, break_secs).unwrap(),
            participant,
            fixed_clock(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_action_still_publishes_unchanged_snapshot() {
        let driver = SessionDriver::new(session(60, 5), Handle::current());
        let before = driver.snapshot();

        let err = driver.next_question().unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(driver.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_counts_down_after_start() {
        let driver = SessionDriver::new(session(60, 5), Handle::current());
        let mut rx = driver.subscribe();
        driver.start_next_topic().unwrap();
        assert_eq!(rx.borrow_and_update().remaining_secs, 60);

        time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(driver.snapshot().remaining_secs, 58);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_ticking() {
        let driver = SessionDriver::new(session(60, 5), Handle::current());
        driver.start_next_topic().unwrap();
        time::sleep(Duration::from_millis(1_500)).await;
        driver.shutdown();
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(driver.snapshot().remaining_secs, 59);
    }
}
