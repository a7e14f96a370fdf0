use std::collections::BTreeMap;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Selected option per question for a whole session.
///
/// Keys accumulate across sections; re-answering overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: BTreeMap<QuestionId, String>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` for `id`, returning the previous selection if any.
    pub fn record(&mut self, id: QuestionId, option: impl Into<String>) -> Option<String> {
        self.selections.insert(id, option.into())
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.selections.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.selections.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &str)> {
        self.selections.iter().map(|(id, option)| (*id, option.as_str()))
    }

    /// How many of `questions` have no selection yet.
    #[must_use]
    pub fn unanswered_in(&self, questions: &[Question]) -> usize {
        questions.iter().filter(|q| !self.contains(q.id())).count()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_overwrites_without_duplicates() {
        let mut sheet = AnswerSheet::new();
        let id = QuestionId::new(7);

        assert_eq!(sheet.record(id, "A"), None);
        assert_eq!(sheet.record(id, "B"), Some("A".to_string()));
        assert_eq!(sheet.get(id), Some("B"));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn counts_unanswered_questions() {
        let bank = crate::model::bank::fixtures::bank(&["Maths"], 3);
        let questions: Vec<_> = bank.iter().cloned().collect();
        let mut sheet = AnswerSheet::new();
        sheet.record(questions[1].id(), "A");

        assert_eq!(sheet.unanswered_in(&questions), 2);
    }
}
