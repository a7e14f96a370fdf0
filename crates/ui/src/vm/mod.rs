mod participant_vm;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use participant_vm::{BranchOptionVm, branch_options, problem_messages, review_lines};
pub use quiz_vm::{
    OptionVm, QuestionVm, TimerVm, TopicRowState, TopicRowVm, break_timer, completion_label,
    map_question, map_topic_rows, section_timer, submit_prompt,
};
pub use results_vm::{ResultsVm, ScoreRowVm, map_results};
pub use time_fmt::{format_datetime, format_elapsed};
