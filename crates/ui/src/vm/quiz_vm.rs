use quiz_core::model::{QuestionId, TopicStatus};
use quiz_core::time::format_countdown;
use services::{QuestionSnapshot, SessionSnapshot, View};

// Countdowns at or below this many seconds are flagged.
const URGENT_SECS: u32 = 60;

//
// ─── TOPIC STEPPER ─────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicRowState {
    Completed,
    Active,
    Next,
    Locked,
}

impl TopicRowState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            TopicRowState::Completed => "topic-row topic-row--done",
            TopicRowState::Active => "topic-row topic-row--active",
            TopicRowState::Next => "topic-row topic-row--next",
            TopicRowState::Locked => "topic-row topic-row--locked",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TopicRowState::Completed => "Submitted",
            TopicRowState::Active => "In progress",
            TopicRowState::Next => "Up next",
            TopicRowState::Locked => "Locked",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicRowVm {
    pub step: usize,
    pub name: String,
    pub state: TopicRowState,
    pub allowance_label: String,
}

#[must_use]
pub fn map_topic_rows(snapshot: &SessionSnapshot) -> Vec<TopicRowVm> {
    let next = snapshot.next_pending();
    snapshot
        .ledger
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let state = if entry.status() == TopicStatus::Completed {
                TopicRowState::Completed
            } else if snapshot.active_topic.as_ref() == Some(entry.name()) {
                TopicRowState::Active
            } else if snapshot.active_topic.is_none() && next == Some(entry.name()) {
                TopicRowState::Next
            } else {
                TopicRowState::Locked
            };
            TopicRowVm {
                step: i + 1,
                name: entry.name().to_string(),
                state,
                allowance_label: format!("{} min", entry.allowance_secs().div_ceil(60)),
            }
        })
        .collect()
}

/// "2 of 4 sections submitted".
#[must_use]
pub fn completion_label(snapshot: &SessionSnapshot) -> String {
    format!(
        "{} of {} sections submitted",
        snapshot.ledger.completed_count(),
        snapshot.ledger.len()
    )
}

//
// ─── QUESTION PANEL ────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub progress_label: String,
    pub is_first: bool,
    pub is_last: bool,
}

#[must_use]
pub fn map_question(question: &QuestionSnapshot) -> QuestionVm {
    let options = question
        .options
        .iter()
        .map(|label| OptionVm {
            label: label.clone(),
            selected: question.selected.as_deref() == Some(label.as_str()),
        })
        .collect();
    QuestionVm {
        id: question.id,
        prompt: question.prompt.clone(),
        options,
        progress_label: format!("Question {} of {}", question.index + 1, question.total),
        is_first: question.index == 0,
        is_last: question.index + 1 >= question.total,
    }
}

/// Text of the submit confirmation dialog.
#[must_use]
pub fn submit_prompt(snapshot: &SessionSnapshot) -> String {
    let topic = snapshot
        .active_topic
        .as_ref()
        .map_or("this section", |t| t.as_str());
    match snapshot.unanswered_in_section {
        0 => format!("Submit {topic}? You cannot return to it afterwards."),
        1 => format!("Submit {topic}? 1 question is unanswered."),
        n => format!("Submit {topic}? {n} questions are unanswered."),
    }
}

//
// ─── TIMERS ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub label: String,
    pub urgent: bool,
}

#[must_use]
pub fn section_timer(snapshot: &SessionSnapshot) -> TimerVm {
    TimerVm {
        label: format_countdown(snapshot.remaining_secs),
        urgent: snapshot.view == View::Quiz && snapshot.remaining_secs <= URGENT_SECS,
    }
}

#[must_use]
pub fn break_timer(snapshot: &SessionSnapshot) -> TimerVm {
    TimerVm {
        label: format_countdown(snapshot.break_remaining_secs),
        urgent: false,
    }
}
