mod answers;
mod bank;
mod ids;
mod ledger;
mod participant;
mod question;
mod score;
mod settings;
mod topic;

pub use ids::QuestionId;
pub use topic::{TopicError, TopicName};

pub use answers::AnswerSheet;
pub use bank::{BankError, QuestionBank};
pub use ledger::{LedgerEntry, LedgerError, TopicLedger, TopicStatus};
pub use participant::{Branch, Participant, ParticipantDraft, ParticipantError, UnknownBranch};
pub use question::{Question, QuestionError};
pub use score::{ScoreSheet, TopicScore};
pub use settings::{QuizSettings, SettingsError};
