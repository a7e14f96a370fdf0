#![forbid(unsafe_code)]

pub mod app_services;
pub mod bank_source;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use app_services::{AppConfig, AppServices};
pub use bank_source::{builtin_bank, load_bank_file, parse_bank};
pub use error::{AppServicesError, BankLoadError, SessionError, TransitionRejection};

pub use sessions::{
    Navigation, QuestionSnapshot, QuizSession, ResultsHandoff, SessionDriver, SessionSnapshot,
    SubmitOutcome, TickEffect, View,
};
