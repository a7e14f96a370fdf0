use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::topic::TopicName;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} needs at least 2 options, got {count}")]
    TooFewOptions { id: QuestionId, count: usize },

    #[error("question {id} has an empty option")]
    EmptyOption { id: QuestionId },

    #[error("question {id} lists option {option:?} more than once")]
    DuplicateOption { id: QuestionId, option: String },

    #[error("correct answer {answer:?} of question {id} is not one of its options")]
    AnswerNotAnOption { id: QuestionId, answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question belonging to one topic.
///
/// Immutable once built. A question without a correct answer (for example a
/// personality statement) is not auto-gradable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    topic: TopicName,
    prompt: String,
    options: Vec<String>,
    correct_answer: Option<String>,
}

impl Question {
    /// Build a validated question.
    ///
    /// An empty or blank `correct_answer` is normalised to `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are fewer than two
    /// options, an option is blank or repeated, or the correct answer is not one
    /// of the options.
    pub fn new(
        id: QuestionId,
        topic: TopicName,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                count: options.len(),
            });
        }
        for (i, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { id });
            }
            if options[..i].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    id,
                    option: option.clone(),
                });
            }
        }

        let correct_answer = correct_answer.filter(|answer| !answer.trim().is_empty());
        if let Some(answer) = correct_answer.as_ref() {
            if !options.contains(answer) {
                return Err(QuestionError::AnswerNotAnOption {
                    id,
                    answer: answer.clone(),
                });
            }
        }

        Ok(Self {
            id,
            topic,
            prompt,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &TopicName {
        &self.topic
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether the question can be scored automatically.
    #[must_use]
    pub fn is_gradable(&self) -> bool {
        self.correct_answer.is_some()
    }

    /// Returns `Some(true/false)` for gradable questions, `None` otherwise.
    #[must_use]
    pub fn grade(&self, selected: &str) -> Option<bool> {
        self.correct_answer.as_deref().map(|answer| answer == selected)
    }
}
