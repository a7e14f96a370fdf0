mod controller;
mod driver;
mod results;
mod state;

// Public API of the session subsystem.
pub use crate::error::{SessionError, TransitionRejection};
pub use controller::QuizSession;
pub use driver::{DEFAULT_TICK_INTERVAL, SessionDriver};
pub use results::ResultsHandoff;
pub use state::{
    Navigation, QuestionSnapshot, SessionSnapshot, SubmitOutcome, TickEffect, View,
};
