use std::fmt;

use quiz_core::model::{QuestionId, TopicLedger, TopicName, TopicScore};
use quiz_core::timer::CountdownKind;

/// Screen the session is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Topics,
    Quiz,
    Break,
    Results,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::Topics => "topics",
            View::Quiz => "quiz",
            View::Break => "break",
            View::Results => "results",
        })
    }
}

/// Outcome of a question navigation request.
///
/// Moving past either end is not an error; the index just stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(usize),
    Clamped(usize),
}

impl Navigation {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Navigation::Moved(index) | Navigation::Clamped(index) => index,
        }
    }
}

/// What a section submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub topic: TopicName,
    pub next_view: View,
    /// Questions in the section left without a selection.
    pub unanswered: usize,
    /// True when the section countdown ran out.
    pub forced: bool,
}

/// What delivering a timer tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEffect {
    /// The tick belonged to a superseded countdown.
    Ignored,
    Counted {
        kind: CountdownKind,
        remaining_secs: u32,
    },
    SectionTimedOut(SubmitOutcome),
    BreakElapsed { next_view: View },
}

impl TickEffect {
    /// True if the tick moved the session to another view.
    #[must_use]
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            TickEffect::SectionTimedOut(_) | TickEffect::BreakElapsed { .. }
        )
    }
}

/// The question on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSnapshot {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub index: usize,
    pub total: usize,
}

/// Immutable copy of everything a view needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub view: View,
    pub ledger: TopicLedger,
    pub active_topic: Option<TopicName>,
    pub question: Option<QuestionSnapshot>,
    pub remaining_secs: u32,
    pub break_remaining_secs: u32,
    pub confirm_pending: bool,
    pub unanswered_in_section: usize,
    pub answered_total: usize,
    /// Filled once the session reaches the results view.
    pub scores: Option<Vec<(TopicName, TopicScore)>>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn next_pending(&self) -> Option<&TopicName> {
        self.ledger.next_pending()
    }
}
