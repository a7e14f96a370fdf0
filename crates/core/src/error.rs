use thiserror::Error;

use crate::model::{
    BankError, LedgerError, ParticipantError, QuestionError, SettingsError, TopicError,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Participant(#[from] ParticipantError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
