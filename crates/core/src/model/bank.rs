use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;
use crate::model::topic::TopicName;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question id {0} appears more than once")]
    DuplicateId(QuestionId),
}

/// Immutable, ordered collection of questions loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from questions in their presentation order.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Empty` for an empty list and `BankError::DuplicateId`
    /// if two questions share a sequence number.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id()));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Distinct topics in first-seen order.
    #[must_use]
    pub fn topics(&self) -> Vec<TopicName> {
        let mut topics: Vec<TopicName> = Vec::new();
        for question in &self.questions {
            if !topics.contains(question.topic()) {
                topics.push(question.topic().clone());
            }
        }
        topics
    }

    /// Questions for `topic`, in bank order.
    #[must_use]
    pub fn questions_for(&self, topic: &TopicName) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.topic() == topic)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a bank with `per_topic` questions for each topic, ids counting from 1.
    pub(crate) fn bank(topics: &[&str], per_topic: u32) -> QuestionBank {
        let mut questions = Vec::new();
        let mut next_id = 1;
        for topic in topics {
            for n in 0..per_topic {
                questions.push(
                    Question::new(
                        QuestionId::new(next_id),
                        TopicName::new(*topic).unwrap(),
                        format!("{topic} question {n}"),
                        vec!["A".into(), "B".into(), "C".into()],
                        Some("A".into()),
                    )
                    .unwrap(),
                );
                next_id += 1;
            }
        }
        QuestionBank::new(questions).unwrap()
    }
}
