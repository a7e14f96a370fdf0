use chrono::{DateTime, Utc};

use quiz_core::model::{Participant, ScoreSheet};

/// Everything the external analysis view receives once all sections are in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsHandoff {
    pub participant: Participant,
    pub scores: ScoreSheet,
    /// Number of questions with a selected option, across all sections.
    pub answered: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl ResultsHandoff {
    /// Wall-clock time between session start and the last submission.
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}
