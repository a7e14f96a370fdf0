use thiserror::Error;

use crate::model::bank::QuestionBank;
use crate::model::topic::TopicName;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("topic {0} is not in the ledger")]
    NotFound(TopicName),

    #[error("topic {0} is already completed")]
    AlreadyCompleted(TopicName),
}

//
// ─── ENTRIES ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    Pending,
    Completed,
}

/// One topic's place in the quiz: its status and fixed time allowance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    name: TopicName,
    status: TopicStatus,
    allowance_secs: u32,
}

impl LedgerEntry {
    #[must_use]
    pub fn name(&self) -> &TopicName {
        &self.name
    }

    #[must_use]
    pub fn status(&self) -> TopicStatus {
        self.status
    }

    #[must_use]
    pub fn allowance_secs(&self) -> u32 {
        self.allowance_secs
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TopicStatus::Completed
    }
}

//
// ─── LEDGER ────────────────────────────────────────────────────────────────────
//

/// Ordered list of topics for one session.
///
/// Entries only move `Pending -> Completed`, one per call to [`TopicLedger::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicLedger {
    entries: Vec<LedgerEntry>,
}

impl TopicLedger {
    /// One pending entry per distinct topic, in the bank's first-seen order.
    #[must_use]
    pub fn build(bank: &QuestionBank, allowance_secs: u32) -> Self {
        let entries = bank
            .topics()
            .into_iter()
            .map(|name| LedgerEntry {
                name,
                status: TopicStatus::Pending,
                allowance_secs,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, name: &TopicName) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| &e.name == name)
    }

    /// First pending topic in ledger order.
    #[must_use]
    pub fn next_pending(&self) -> Option<&TopicName> {
        self.entries
            .iter()
            .find(|e| e.status == TopicStatus::Pending)
            .map(|e| &e.name)
    }

    /// Mark `name` completed. Other entries are untouched.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` for unknown topics and
    /// `LedgerError::AlreadyCompleted` if the entry was already completed.
    pub fn complete(&mut self, name: &TopicName) -> Result<(), LedgerError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.name == name)
            .ok_or_else(|| LedgerError::NotFound(name.clone()))?;
        if entry.status == TopicStatus::Completed {
            return Err(LedgerError::AlreadyCompleted(name.clone()));
        }
        entry.status = TopicStatus::Completed;
        Ok(())
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.entries.iter().all(LedgerEntry::is_completed)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_completed()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
