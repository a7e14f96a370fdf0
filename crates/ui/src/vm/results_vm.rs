use services::ResultsHandoff;

use crate::vm::time_fmt::{format_datetime, format_elapsed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRowVm {
    pub topic: String,
    pub score_label: String,
    pub percent_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub participant_label: String,
    pub branch_label: String,
    pub rows: Vec<ScoreRowVm>,
    pub overall_label: String,
    pub answered_label: String,
    pub elapsed_label: String,
    pub completed_at_str: String,
}

#[must_use]
pub fn map_results(handoff: &ResultsHandoff) -> ResultsVm {
    let rows = handoff
        .scores
        .iter()
        .map(|(topic, score)| {
            let (score_label, percent_label) = match score.percent() {
                Some(percent) => (
                    format!("{} / {}", score.score, score.total),
                    format!("{percent}%"),
                ),
                None => ("Not scored".to_string(), "-".to_string()),
            };
            ScoreRowVm {
                topic: topic.to_string(),
                score_label,
                percent_label,
            }
        })
        .collect();

    let overall = handoff.scores.overall();
    let overall_label = match overall.percent() {
        Some(percent) => format!("{} / {} ({percent}%)", overall.score, overall.total),
        None => "Not scored".to_string(),
    };

    ResultsVm {
        participant_label: format!(
            "{} ({})",
            handoff.participant.name(),
            handoff.participant.roll_no()
        ),
        branch_label: handoff.participant.branch().label().to_string(),
        rows,
        overall_label,
        answered_label: format!("{} questions answered", handoff.answered),
        elapsed_label: format_elapsed(handoff.elapsed()),
        completed_at_str: format_datetime(handoff.completed_at),
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::model::{AnswerSheet, Branch, ParticipantDraft, QuestionId, ScoreSheet};
    use quiz_core::time::fixed_now;
    use services::builtin_bank;

    use super::*;

    #[test]
    fn ungradable_sections_read_not_scored() {
        let bank = builtin_bank().unwrap();
        let mut answers = AnswerSheet::new();
        answers.record(QuestionId::new(1), "75");
        answers.record(QuestionId::new(21), "Agree");

        let handoff = ResultsHandoff {
            participant: ParticipantDraft {
                name: "Asha".into(),
                roll_no: "7".into(),
                branch: Some(Branch::Electronics),
            }
            .validate()
            .unwrap(),
            scores: ScoreSheet::grade(&bank, &answers),
            answered: answers.len(),
            started_at: fixed_now(),
            completed_at: fixed_now() + chrono::Duration::seconds(65),
        };

        let vm = map_results(&handoff);
        assert_eq!(vm.participant_label, "Asha (7)");
        assert_eq!(vm.rows[0].topic, "Maths");
        assert_eq!(vm.rows[0].score_label, "1 / 2");
        assert_eq!(vm.rows[0].percent_label, "50%");
        let personality = vm.rows.iter().find(|r| r.topic == "Personality").unwrap();
        assert_eq!(personality.score_label, "Not scored");
        assert_eq!(vm.overall_label, "1 / 6 (16%)");
        assert_eq!(vm.elapsed_label, "1m 05s");
        assert_eq!(vm.answered_label, "2 questions answered");
    }
}
