//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{
    BankError, LedgerError, QuestionError, QuestionId, SettingsError, TopicError, TopicName,
};

use crate::sessions::View;

/// Why a requested transition was refused. The session is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionRejection {
    #[error("cannot {action} from the {view} view")]
    WrongView { action: &'static str, view: View },

    #[error("{requested} is not the next section")]
    NotNextPending {
        requested: TopicName,
        expected: Option<TopicName>,
    },

    #[error("{0} has already been submitted")]
    AlreadyCompleted(TopicName),

    #[error("{0} is not a section of this quiz")]
    UnknownTopic(TopicName),

    #[error("submission was not requested")]
    ConfirmationNotRequested,
}

/// Errors emitted by the quiz session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("invalid transition: {0}")]
    InvalidTransition(#[from] TransitionRejection),
    #[error("question {0} is not part of the active section")]
    UnknownQuestion(QuestionId),
    #[error("{option:?} is not an option of question {id}")]
    InvalidOption { id: QuestionId, option: String },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl SessionError {
    #[must_use]
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, SessionError::InvalidTransition(_))
    }
}

/// Errors emitted while loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed question bank: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record {index}: {source}")]
    Topic {
        index: usize,
        #[source]
        source: TopicError,
    },
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Errors emitted while assembling app services at startup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Bank(#[from] BankLoadError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
