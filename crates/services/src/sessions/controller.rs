use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use quiz_core::Clock;
use quiz_core::model::{
    AnswerSheet, Participant, Question, QuestionBank, QuestionId, QuizSettings, ScoreSheet,
    TopicLedger, TopicName,
};
use quiz_core::timer::{CountdownKind, SectionTimer, Tick, TimerEpoch};

use super::results::ResultsHandoff;
use super::state::{
    Navigation, QuestionSnapshot, SessionSnapshot, SubmitOutcome, TickEffect, View,
};
use crate::error::{SessionError, TransitionRejection};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one participant's run through the quiz.
///
/// Owns all session state; every change goes through one of the named transitions
/// below. Countdowns advance only through [`QuizSession::tick`], which ignores ticks
/// from superseded timer epochs.
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    clock: Clock,
    participant: Participant,
    ledger: TopicLedger,
    view: View,
    active_topic: Option<TopicName>,
    active_questions: Vec<Question>,
    current_index: usize,
    answers: AnswerSheet,
    timer: SectionTimer,
    confirm_pending: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        settings: QuizSettings,
        participant: Participant,
        clock: Clock,
    ) -> Self {
        let ledger = TopicLedger::build(&bank, settings.section_allowance_secs());
        info!(
            "quiz session for {} ({} sections)",
            participant.roll_no(),
            ledger.len()
        );
        Self {
            bank,
            settings,
            clock,
            participant,
            ledger,
            view: View::Topics,
            active_topic: None,
            active_questions: Vec::new(),
            current_index: 0,
            answers: AnswerSheet::new(),
            timer: SectionTimer::new(),
            confirm_pending: false,
            started_at: clock.now(),
            completed_at: None,
        }
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn ledger(&self) -> &TopicLedger {
        &self.ledger
    }

    #[must_use]
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn active_topic(&self) -> Option<&TopicName> {
        self.active_topic.as_ref()
    }

    #[must_use]
    pub fn active_questions(&self) -> &[Question] {
        &self.active_questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.active_questions.get(self.current_index)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Seconds left in the active section; zero outside a section.
    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.timer.remaining(CountdownKind::Section).unwrap_or(0)
    }

    /// Seconds left in the break. Outside a break this is the full break length.
    #[must_use]
    pub fn break_remaining_secs(&self) -> u32 {
        self.timer
            .remaining(CountdownKind::Break)
            .unwrap_or(self.settings.break_secs())
    }

    #[must_use]
    pub fn is_confirm_pending(&self) -> bool {
        self.confirm_pending
    }

    #[must_use]
    pub fn timer_epoch(&self) -> TimerEpoch {
        self.timer.epoch()
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let question = self.current_question().map(|q| QuestionSnapshot {
            id: q.id(),
            prompt: q.prompt().to_string(),
            options: q.options().to_vec(),
            selected: self.answers.get(q.id()).map(ToString::to_string),
            index: self.current_index,
            total: self.active_questions.len(),
        });
        let scores = (self.view == View::Results).then(|| {
            ScoreSheet::grade(&self.bank, &self.answers)
                .iter()
                .map(|(name, score)| (name.clone(), score))
                .collect()
        });

        SessionSnapshot {
            view: self.view,
            ledger: self.ledger.clone(),
            active_topic: self.active_topic.clone(),
            question,
            remaining_secs: self.remaining_secs(),
            break_remaining_secs: self.break_remaining_secs(),
            confirm_pending: self.confirm_pending,
            unanswered_in_section: self.answers.unanswered_in(&self.active_questions),
            answered_total: self.answers.len(),
            scores,
        }
    }

    //
    // ─── SECTION SEQUENCING ────────────────────────────────────────────────────
    //

    /// Begin the section for `name`.
    ///
    /// Only the ledger's next pending topic may be started, from the topics or break view.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` if the view is wrong, the topic is
    /// unknown or completed, or another topic is next. Nothing changes on error.
    pub fn start_topic(&mut self, name: &TopicName) -> Result<(), SessionError> {
        self.require_view(&[View::Topics, View::Break], "start a section")?;

        let entry = self
            .ledger
            .entry(name)
            .ok_or_else(|| TransitionRejection::UnknownTopic(name.clone()))?;
        if entry.is_completed() {
            return Err(TransitionRejection::AlreadyCompleted(name.clone()).into());
        }
        let expected = self.ledger.next_pending();
        if expected != Some(name) {
            return Err(TransitionRejection::NotNextPending {
                requested: name.clone(),
                expected: expected.cloned(),
            }
            .into());
        }

        self.enter_section(name.clone());
        Ok(())
    }

    /// Start whatever section is next, or finish if none remain.
    ///
    /// Used by the "start next now" action and when the break runs out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the topics and break views.
    pub fn start_next_topic(&mut self) -> Result<View, SessionError> {
        self.require_view(&[View::Topics, View::Break], "start the next section")?;
        Ok(self.advance())
    }

    fn advance(&mut self) -> View {
        match self.ledger.next_pending().cloned() {
            Some(next) => self.enter_section(next),
            None => self.finish(),
        }
        self.view
    }

    fn enter_section(&mut self, name: TopicName) {
        let allowance = self
            .ledger
            .entry(&name)
            .map_or(self.settings.section_allowance_secs(), |e| e.allowance_secs());
        self.active_questions = self.bank.questions_for(&name);
        self.current_index = 0;
        self.confirm_pending = false;
        let epoch = self.timer.start(CountdownKind::Section, allowance);
        info!(
            "section {name} started: {} questions, {allowance}s ({epoch:?})",
            self.active_questions.len()
        );
        self.active_topic = Some(name);
        self.view = View::Quiz;
    }

    fn finish(&mut self) {
        self.timer.stop();
        self.active_topic = None;
        self.active_questions.clear();
        self.current_index = 0;
        self.confirm_pending = false;
        self.completed_at = Some(self.clock.now());
        self.view = View::Results;
        info!(
            "quiz finished for {}: {} answers recorded",
            self.participant.roll_no(),
            self.answers.len()
        );
    }

    //
    // ─── WITHIN A SECTION ──────────────────────────────────────────────────────
    //

    /// Record `option` for question `id`, replacing any earlier selection.
    ///
    /// # Errors
    ///
    /// Returns an error outside the quiz view, for questions outside the active
    /// section, or for options the question does not offer.
    pub fn select_answer(
        &mut self,
        id: QuestionId,
        option: &str,
    ) -> Result<Option<String>, SessionError> {
        self.require_view(&[View::Quiz], "answer a question")?;
        let question = self
            .active_questions
            .iter()
            .find(|q| q.id() == id)
            .ok_or(SessionError::UnknownQuestion(id))?;
        if !question.has_option(option) {
            return Err(SessionError::InvalidOption {
                id,
                option: option.to_string(),
            });
        }
        Ok(self.answers.record(id, option))
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz view.
    pub fn next_question(&mut self) -> Result<Navigation, SessionError> {
        self.require_view(&[View::Quiz], "move to the next question")?;
        if self.current_index + 1 < self.active_questions.len() {
            self.current_index += 1;
            Ok(Navigation::Moved(self.current_index))
        } else {
            Ok(Navigation::Clamped(self.current_index))
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz view.
    pub fn prev_question(&mut self) -> Result<Navigation, SessionError> {
        self.require_view(&[View::Quiz], "move to the previous question")?;
        if self.current_index > 0 {
            self.current_index -= 1;
            Ok(Navigation::Moved(self.current_index))
        } else {
            Ok(Navigation::Clamped(self.current_index))
        }
    }

    //
    // ─── SUBMISSION ────────────────────────────────────────────────────────────
    //

    /// Open the confirmation gate for submitting the section.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz view.
    pub fn request_submit(&mut self) -> Result<(), SessionError> {
        self.require_view(&[View::Quiz], "submit a section")?;
        self.confirm_pending = true;
        Ok(())
    }

    /// Close the confirmation gate without submitting.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz view.
    pub fn cancel_submit(&mut self) -> Result<(), SessionError> {
        self.require_view(&[View::Quiz], "cancel a submission")?;
        self.confirm_pending = false;
        Ok(())
    }

    /// Submit the active section after the participant confirmed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz view or when the
    /// confirmation gate is closed.
    pub fn confirm_submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        self.require_view(&[View::Quiz], "submit a section")?;
        if !self.confirm_pending {
            return Err(TransitionRejection::ConfirmationNotRequested.into());
        }
        self.submit_section(false)
    }

    fn submit_section(&mut self, forced: bool) -> Result<SubmitOutcome, SessionError> {
        let topic = self
            .active_topic
            .clone()
            .ok_or(TransitionRejection::WrongView {
                action: "submit a section",
                view: self.view,
            })?;

        self.ledger.complete(&topic)?;
        let unanswered = self.answers.unanswered_in(&self.active_questions);
        self.active_topic = None;
        self.active_questions.clear();
        self.current_index = 0;
        self.confirm_pending = false;

        // Read the ledger after the completion above, so the last section goes
        // straight to results.
        if self.ledger.all_completed() {
            self.finish();
        } else {
            let epoch = self
                .timer
                .start(CountdownKind::Break, self.settings.break_secs());
            self.view = View::Break;
            debug!("break started ({epoch:?})");
        }

        info!(
            "section {topic} submitted (forced: {forced}, unanswered: {unanswered}) -> {}",
            self.view
        );
        Ok(SubmitOutcome {
            topic,
            next_view: self.view,
            unanswered,
            forced,
        })
    }

    //
    // ─── TIMERS ────────────────────────────────────────────────────────────────
    //

    /// Deliver one elapsed second to the countdown scheduled under `epoch`.
    ///
    /// Never fails: a section that runs out is submitted without confirmation, and a
    /// break that runs out starts the next section (or finishes the quiz).
    pub fn tick(&mut self, epoch: TimerEpoch) -> TickEffect {
        match self.timer.tick(epoch) {
            Tick::Stale => {
                debug!("stale tick {epoch:?} ignored (current {:?})", self.timer.epoch());
                TickEffect::Ignored
            }
            Tick::Running {
                kind,
                remaining_secs,
            } => TickEffect::Counted {
                kind,
                remaining_secs,
            },
            Tick::Expired(CountdownKind::Section) => {
                if self.view != View::Quiz {
                    warn!("section countdown expired outside the quiz view");
                    self.timer.stop();
                    return TickEffect::Ignored;
                }
                match self.submit_section(true) {
                    Ok(outcome) => TickEffect::SectionTimedOut(outcome),
                    Err(err) => {
                        warn!("forced submission failed: {err}");
                        self.timer.stop();
                        TickEffect::Ignored
                    }
                }
            }
            Tick::Expired(CountdownKind::Break) => {
                if self.view != View::Break {
                    warn!("break countdown expired outside the break view");
                    self.timer.stop();
                    return TickEffect::Ignored;
                }
                TickEffect::BreakElapsed {
                    next_view: self.advance(),
                }
            }
        }
    }

    //
    // ─── RESULTS & RESET ───────────────────────────────────────────────────────
    //

    /// Package scores and identity for the analysis view.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before the quiz is finished.
    pub fn handoff(&self) -> Result<ResultsHandoff, SessionError> {
        self.require_view(&[View::Results], "analyse results")?;
        let completed_at = self.completed_at.unwrap_or_else(|| self.clock.now());
        Ok(ResultsHandoff {
            participant: self.participant.clone(),
            scores: ScoreSheet::grade(&self.bank, &self.answers),
            answered: self.answers.len(),
            started_at: self.started_at,
            completed_at,
        })
    }

    /// Start over: fresh ledger, no answers, no countdown.
    pub fn reset(&mut self) {
        self.timer.stop();
        self.ledger = TopicLedger::build(&self.bank, self.settings.section_allowance_secs());
        self.view = View::Topics;
        self.active_topic = None;
        self.active_questions.clear();
        self.current_index = 0;
        self.answers.clear();
        self.confirm_pending = false;
        self.started_at = self.clock.now();
        self.completed_at = None;
        info!("quiz session reset for {}", self.participant.roll_no());
    }

    fn require_view(&self, allowed: &[View], action: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.view) {
            Ok(())
        } else {
            Err(TransitionRejection::WrongView {
                action,
                view: self.view,
            }
            .into())
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("view", &self.view)
            .field("active_topic", &self.active_topic)
            .field("current_index", &self.current_index)
            .field("answers_len", &self.answers.len())
            .field("timer", &self.timer.active())
            .field("confirm_pending", &self.confirm_pending)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
