use quiz_core::model::{Branch, Participant, ParticipantDraft};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchOptionVm {
    pub value: &'static str,
    pub selected: bool,
}

#[must_use]
pub fn branch_options(selected: Option<Branch>) -> Vec<BranchOptionVm> {
    Branch::ALL
        .into_iter()
        .map(|branch| BranchOptionVm {
            value: branch.label(),
            selected: selected == Some(branch),
        })
        .collect()
}

/// Messages for every missing field, in form order.
#[must_use]
pub fn problem_messages(draft: &ParticipantDraft) -> Vec<String> {
    draft.problems().iter().map(ToString::to_string).collect()
}

/// Label/value pairs shown on the confirmation step.
#[must_use]
pub fn review_lines(participant: &Participant) -> Vec<(&'static str, String)> {
    vec![
        ("Name", participant.name().to_string()),
        ("Roll No.", participant.roll_no().to_string()),
        ("Branch", participant.branch().label().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_mark_selection() {
        let options = branch_options(Some(Branch::AiMl));
        assert_eq!(options.len(), 5);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert_eq!(options[4].value, "AI & ML");
        assert!(options[4].selected);
    }

    #[test]
    fn problems_read_like_form_hints() {
        let draft = ParticipantDraft {
            name: "Asha".into(),
            ..ParticipantDraft::default()
        };
        assert_eq!(
            problem_messages(&draft),
            vec!["Roll No. is required", "Please select a branch"]
        );
    }
}
