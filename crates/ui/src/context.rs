use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;
use tokio::runtime::Handle;

use quiz_core::model::{Participant, QuestionBank, QuizSettings};
use services::{QuizSession, ResultsHandoff, SessionDriver};

pub trait UiApp: Send + Sync {
    fn question_bank(&self) -> Arc<QuestionBank>;
    fn settings(&self) -> QuizSettings;
    fn new_session(&self, participant: Participant) -> QuizSession;
    /// Runtime the section timers are spawned on.
    fn runtime(&self) -> Handle;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    runtime: Handle,

    active: Arc<Mutex<Option<SessionDriver>>>,
    results: Arc<Mutex<Option<ResultsHandoff>>>,
}

fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
            bank: app.question_bank(),
            settings: app.settings(),
            runtime: app.runtime(),
            active: Arc::new(Mutex::new(None)),
            results: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Open a new quiz for `participant`, replacing any session in progress.
    #[must_use]
    pub fn begin_session(&self, participant: Participant) -> SessionDriver {
        let session = self.app.new_session(participant);
        let driver = SessionDriver::new(session, self.runtime.clone());
        if let Some(previous) = lock(&self.active).replace(driver.clone()) {
            previous.shutdown();
        }
        lock(&self.results).take();
        driver
    }

    #[must_use]
    pub fn active_session(&self) -> Option<SessionDriver> {
        lock(&self.active).clone()
    }

    /// Close the active session and keep its results for the analysis view.
    pub fn finish_session(&self, handoff: ResultsHandoff) {
        if let Some(driver) = lock(&self.active).take() {
            driver.shutdown();
        }
        info!(
            "results handed off for {} ({} answered)",
            handoff.participant.roll_no(),
            handoff.answered
        );
        *lock(&self.results) = Some(handoff);
    }

    #[must_use]
    pub fn results(&self) -> Option<ResultsHandoff> {
        lock(&self.results).clone()
    }

    /// Forget the session and any results.
    pub fn clear(&self) {
        if let Some(driver) = lock(&self.active).take() {
            driver.shutdown();
        }
        lock(&self.results).take();
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
