use crate::model::answers::AnswerSheet;
use crate::model::bank::QuestionBank;
use crate::model::topic::TopicName;

/// Correct answers out of gradable questions for one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicScore {
    pub score: u32,
    pub total: u32,
}

impl TopicScore {
    /// Topics made only of ungradable questions have nothing to score.
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.total > 0
    }

    /// Whole-number percentage, `None` for unscored topics.
    #[must_use]
    pub fn percent(&self) -> Option<u32> {
        (self.total > 0).then(|| self.score * 100 / self.total)
    }
}

/// Per-topic scores in ledger (first-seen) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSheet {
    topics: Vec<(TopicName, TopicScore)>,
}

impl ScoreSheet {
    /// Grade `answers` against the bank's correct answers.
    ///
    /// Unanswered gradable questions count towards `total` but never `score`.
    #[must_use]
    pub fn grade(bank: &QuestionBank, answers: &AnswerSheet) -> Self {
        let topics = bank
            .topics()
            .into_iter()
            .map(|topic| {
                let mut score = TopicScore::default();
                for question in bank.iter().filter(|q| q.topic() == &topic) {
                    if !question.is_gradable() {
                        continue;
                    }
                    score.total += 1;
                    let correct = answers
                        .get(question.id())
                        .and_then(|selected| question.grade(selected))
                        .unwrap_or(false);
                    if correct {
                        score.score += 1;
                    }
                }
                (topic, score)
            })
            .collect();
        Self { topics }
    }

    #[must_use]
    pub fn get(&self, topic: &TopicName) -> Option<TopicScore> {
        self.topics
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TopicName, TopicScore)> {
        self.topics.iter().map(|(name, score)| (name, *score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Sum over scored topics.
    #[must_use]
    pub fn overall(&self) -> TopicScore {
        self.topics
            .iter()
            .fold(TopicScore::default(), |acc, (_, s)| TopicScore {
                score: acc.score + s.score,
                total: acc.total + s.total,
            })
    }
}
