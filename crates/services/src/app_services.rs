use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use quiz_core::model::{Participant, QuestionBank, QuizSettings};

use crate::Clock;
use crate::bank_source::{builtin_bank, load_bank_file};
use crate::error::AppServicesError;
use crate::sessions::QuizSession;

/// Raw launch configuration, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` selects the bank compiled into the binary.
    pub bank_path: Option<PathBuf>,
    pub section_allowance_secs: u32,
    pub break_secs: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = QuizSettings::default();
        Self {
            bank_path: None,
            section_allowance_secs: settings.section_allowance_secs(),
            break_secs: settings.break_secs(),
        }
    }
}

/// Assembles the question bank and settings every quiz session is built from.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    clock: Clock,
}

impl AppServices {
    /// # Errors
    ///
    /// Returns `AppServicesError` if the settings are invalid or the bank cannot be loaded.
    pub fn from_config(config: &AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let settings = QuizSettings::new(config.section_allowance_secs, config.break_secs)?;
        let bank = match &config.bank_path {
            Some(path) => load_bank_file(path)?,
            None => builtin_bank()?,
        };
        info!(
            "{} questions in {} sections; {}s per section, {}s breaks",
            bank.len(),
            bank.topics().len(),
            settings.section_allowance_secs(),
            settings.break_secs()
        );
        Ok(Self {
            bank: Arc::new(bank),
            settings,
            clock,
        })
    }

    #[must_use]
    pub fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn new_session(&self, participant: Participant) -> QuizSession {
        QuizSession::new(Arc::clone(&self.bank), self.settings, participant, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::SettingsError;
    use quiz_core::time::fixed_clock;

    #[test]
    fn default_config_uses_builtin_bank() {
        let services = AppServices::from_config(&AppConfig::default(), fixed_clock()).unwrap();
        assert_eq!(services.question_bank().len(), 8);
        assert_eq!(services.settings(), QuizSettings::default());
    }

    #[test]
    fn zero_break_is_rejected() {
        let config = AppConfig {
            break_secs: 0,
            ..AppConfig::default()
        };
        assert!(matches!(
            AppServices::from_config(&config, fixed_clock()),
            Err(AppServicesError::Settings(SettingsError::InvalidBreakLength))
        ));
    }

    #[test]
    fn missing_bank_file_is_reported() {
        let config = AppConfig {
            bank_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..AppConfig::default()
        };
        assert!(matches!(
            AppServices::from_config(&config, fixed_clock()),
            Err(AppServicesError::Bank(_))
        ));
    }
}
