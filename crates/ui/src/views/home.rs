use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{Branch, Participant, ParticipantDraft};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{branch_options, problem_messages, review_lines};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let mut name = use_signal(String::new);
    let mut roll_no = use_signal(String::new);
    let mut branch = use_signal(|| None::<Branch>);
    let mut problems = use_signal(Vec::<String>::new);
    let mut confirmed = use_signal(|| None::<Participant>);

    let section_count = ctx.question_bank().topics().len();
    let minutes = ctx.settings().section_allowance_secs().div_ceil(60);

    let on_continue = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = ParticipantDraft {
            name: name(),
            roll_no: roll_no(),
            branch: branch(),
        };
        match draft.validate() {
            Ok(participant) => {
                problems.set(Vec::new());
                confirmed.set(Some(participant));
            }
            Err(_) => problems.set(problem_messages(&draft)),
        }
    };

    let on_start = {
        let ctx = ctx.clone();
        move |_: MouseEvent| {
            if let Some(participant) = confirmed() {
                let _ = ctx.begin_session(participant);
                let _ = navigator.push(Route::Quiz {});
            }
        }
    };

    rsx! {
        div { class: "page home-page",
            h2 { "Before you begin" }
            p { class: "home-intro",
                "The quiz has {section_count} sections of {minutes} minutes each, taken in order. "
                "A short break follows every section."
            }
            if let Some(participant) = confirmed() {
                div { class: "identity-review",
                    h3 { "Confirm your details" }
                    dl {
                        for (label, value) in review_lines(&participant) {
                            dt { "{label}" }
                            dd { "{value}" }
                        }
                    }
                    div { class: "identity-review__actions",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| confirmed.set(None),
                            "Edit"
                        }
                        button {
                            class: "btn btn-primary",
                            id: "start-quiz",
                            r#type: "button",
                            onclick: on_start,
                            "Start quiz"
                        }
                    }
                }
            } else {
                form { class: "identity-form", onsubmit: on_continue,
                    label { r#for: "identity-name", "Name" }
                    input {
                        id: "identity-name",
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                    label { r#for: "identity-roll", "Roll No." }
                    input {
                        id: "identity-roll",
                        r#type: "text",
                        value: "{roll_no}",
                        oninput: move |evt| roll_no.set(evt.value()),
                    }
                    label { r#for: "identity-branch", "Branch" }
                    select {
                        id: "identity-branch",
                        onchange: move |evt| branch.set(evt.value().parse::<Branch>().ok()),
                        option { value: "", selected: branch().is_none(), "Select your branch" }
                        for opt in branch_options(branch()) {
                            option { value: "{opt.value}", selected: opt.selected, "{opt.value}" }
                        }
                    }
                    if !problems.read().is_empty() {
                        ul { class: "form-errors",
                            for problem in problems.read().iter() {
                                li { "{problem}" }
                            }
                        }
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Continue" }
                }
            }
        }
    }
}
