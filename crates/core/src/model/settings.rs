use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("section allowance must be > 0 seconds")]
    InvalidSectionAllowance,

    #[error("break length must be > 0 seconds")]
    InvalidBreakLength,
}

/// Timing configuration for a quiz session.
///
/// Every section gets the same allowance; breaks between sections have a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    section_allowance_secs: u32,
    break_secs: u32,
}

impl QuizSettings {
    /// 30 minutes per section.
    pub const DEFAULT_SECTION_ALLOWANCE_SECS: u32 = 30 * 60;
    /// 30 second break between sections.
    pub const DEFAULT_BREAK_SECS: u32 = 30;

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns error if either duration is zero.
    pub fn new(section_allowance_secs: u32, break_secs: u32) -> Result<Self, SettingsError> {
        if section_allowance_secs == 0 {
            return Err(SettingsError::InvalidSectionAllowance);
        }
        if break_secs == 0 {
            return Err(SettingsError::InvalidBreakLength);
        }
        Ok(Self {
            section_allowance_secs,
            break_secs,
        })
    }

    #[must_use]
    pub fn section_allowance_secs(&self) -> u32 {
        self.section_allowance_secs
    }

    #[must_use]
    pub fn break_secs(&self) -> u32 {
        self.break_secs
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            section_allowance_secs: Self::DEFAULT_SECTION_ALLOWANCE_SECS,
            break_secs: Self::DEFAULT_BREAK_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_durations() {
        let settings = QuizSettings::default();
        assert_eq!(settings.section_allowance_secs(), 1800);
        assert_eq!(settings.break_secs(), 30);
    }

    #[test]
    fn zero_durations_are_rejected() {
        assert_eq!(
            QuizSettings::new(0, 30),
            Err(SettingsError::InvalidSectionAllowance)
        );
        assert_eq!(QuizSettings::new(60, 0), Err(SettingsError::InvalidBreakLength));
        assert!(QuizSettings::new(60, 5).is_ok());
    }
}
