use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use quiz_core::model::{QuestionId, TopicName};
use services::{SessionDriver, SessionError, View};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{
    QuestionVm, TimerVm, TopicRowState, TopicRowVm, break_timer, completion_label, map_question,
    map_topic_rows, section_timer, submit_prompt,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum QuizIntent {
    StartTopic(String),
    StartNext,
    Select(QuestionId, String),
    Next,
    Prev,
    RequestSubmit,
    CancelSubmit,
    ConfirmSubmit,
}

fn apply_intent(driver: &SessionDriver, intent: QuizIntent) -> Result<(), ViewError> {
    let result: Result<(), SessionError> = match intent {
        QuizIntent::StartTopic(name) => {
            let name = TopicName::new(name).map_err(|_| ViewError::Unknown)?;
            driver.start_topic(&name)
        }
        QuizIntent::StartNext => driver.start_next_topic().map(|_| ()),
        QuizIntent::Select(id, option) => driver.select_answer(id, &option),
        QuizIntent::Next => driver.next_question().map(|_| ()),
        QuizIntent::Prev => driver.prev_question().map(|_| ()),
        QuizIntent::RequestSubmit => driver.request_submit(),
        QuizIntent::CancelSubmit => driver.cancel_submit(),
        QuizIntent::ConfirmSubmit => driver.confirm_submit().map(|_| ()),
    };
    result.map_err(|err| ViewError::from(&err))
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();

    match ctx.active_session() {
        Some(driver) => rsx! { QuizRunner { driver } },
        None => rsx! {
            div { class: "page quiz-page",
                p { "{ViewError::NoActiveSession.message()}" }
                Link { to: Route::Home {}, "Enter your details to begin" }
            }
        },
    }
}

#[component]
fn QuizRunner(driver: SessionDriver) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let mut snapshot = use_signal({
        let driver = driver.clone();
        move || driver.snapshot()
    });
    let mut feedback = use_signal(|| None::<ViewError>);

    use_future({
        let driver = driver.clone();
        move || {
            let driver = driver.clone();
            async move {
                let mut rx = driver.subscribe();
                while rx.changed().await.is_ok() {
                    let next = rx.borrow_and_update().clone();
                    snapshot.set(next);
                }
            }
        }
    });

    let dispatch = {
        let driver = driver.clone();
        use_callback(move |intent: QuizIntent| {
            let outcome = apply_intent(&driver, intent);
            feedback.set(outcome.err());
            snapshot.set(driver.snapshot());
        })
    };

    let on_view_results = {
        let driver = driver.clone();
        move |_: MouseEvent| match driver.handoff() {
            Ok(handoff) => {
                ctx.finish_session(handoff);
                let _ = navigator.push(Route::Results {});
            }
            Err(err) => feedback.set(Some(ViewError::from(&err))),
        }
    };

    let current = snapshot.read().clone();
    let rows = map_topic_rows(&current);
    let progress = completion_label(&current);
    let next_topic = current.next_pending().map(ToString::to_string);

    rsx! {
        div { class: "page quiz-page",
            aside { class: "quiz-stepper",
                TopicStepper {
                    rows,
                    on_pick: move |name: String| dispatch.call(QuizIntent::StartTopic(name)),
                }
                p { class: "quiz-stepper__progress", "{progress}" }
            }
            section { class: "quiz-main",
                if let Some(err) = feedback() {
                    p { class: "quiz-feedback", role: "alert", "{err.message()}" }
                }
                match current.view {
                    View::Topics => rsx! {
                        div { class: "quiz-intro",
                            h2 { "Sections" }
                            p { "Each section is timed. Once submitted, a section cannot be reopened." }
                            if let Some(next) = next_topic {
                                button {
                                    class: "btn btn-primary",
                                    id: "quiz-start",
                                    r#type: "button",
                                    onclick: move |_| dispatch.call(QuizIntent::StartNext),
                                    "Start {next}"
                                }
                            }
                        }
                    },
                    View::Quiz => rsx! {
                        QuizHeader {
                            topic: current.active_topic.as_ref().map(ToString::to_string).unwrap_or_default(),
                            timer: section_timer(&current),
                        }
                        if let Some(question) = current.question.as_ref().map(map_question) {
                            QuestionPanel { question, dispatch }
                        } else {
                            p { "This section has no questions." }
                        }
                        div { class: "quiz-submit",
                            button {
                                class: "btn btn-primary",
                                id: "quiz-submit",
                                r#type: "button",
                                onclick: move |_| dispatch.call(QuizIntent::RequestSubmit),
                                "Submit section"
                            }
                        }
                        if current.confirm_pending {
                            ConfirmModal { prompt: submit_prompt(&current), dispatch }
                        }
                    },
                    View::Break => rsx! {
                        BreakPanel {
                            timer: break_timer(&current),
                            next: next_topic,
                            on_start_next: move |_| dispatch.call(QuizIntent::StartNext),
                        }
                    },
                    View::Results => rsx! {
                        div { class: "quiz-complete",
                            h2 { "All sections submitted" }
                            p { "{current.answered_total} questions answered." }
                            button {
                                class: "btn btn-primary",
                                id: "quiz-view-results",
                                r#type: "button",
                                onclick: on_view_results,
                                "View results"
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn TopicStepper(rows: Vec<TopicRowVm>, on_pick: EventHandler<String>) -> Element {
    rsx! {
        ol { class: "topic-stepper",
            for row in rows {
                li { key: "{row.name}", class: "{row.state.class()}",
                    button {
                        r#type: "button",
                        disabled: row.state != TopicRowState::Next,
                        onclick: {
                            let name = row.name.clone();
                            move |_| on_pick.call(name.clone())
                        },
                        span { class: "topic-row__step", "{row.step}" }
                        span { class: "topic-row__name", "{row.name}" }
                        span { class: "topic-row__status", "{row.state.label()}" }
                        span { class: "topic-row__allowance", "{row.allowance_label}" }
                    }
                }
            }
        }
    }
}

#[component]
fn QuizHeader(topic: String, timer: TimerVm) -> Element {
    let timer_class = if timer.urgent {
        "quiz-timer quiz-timer--urgent"
    } else {
        "quiz-timer"
    };
    rsx! {
        header { class: "quiz-header",
            h2 { "{topic}" }
            span { class: "{timer_class}", id: "quiz-timer", "{timer.label}" }
        }
    }
}

#[component]
fn QuestionPanel(question: QuestionVm, dispatch: Callback<QuizIntent>) -> Element {
    let id = question.id;
    rsx! {
        div { class: "quiz-question",
            p { class: "quiz-question__progress", "{question.progress_label}" }
            p { class: "quiz-question__prompt", "{question.prompt}" }
            ul { class: "quiz-options",
                for option in question.options {
                    li { key: "{option.label}",
                        button {
                            class: if option.selected { "quiz-option quiz-option--selected" } else { "quiz-option" },
                            r#type: "button",
                            aria_pressed: "{option.selected}",
                            onclick: {
                                let label = option.label.clone();
                                move |_| dispatch.call(QuizIntent::Select(id, label.clone()))
                            },
                            "{option.label}"
                        }
                    }
                }
            }
            div { class: "quiz-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: question.is_first,
                    onclick: move |_| dispatch.call(QuizIntent::Prev),
                    "Previous"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: question.is_last,
                    onclick: move |_| dispatch.call(QuizIntent::Next),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn ConfirmModal(prompt: String, dispatch: Callback<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-overlay",
            div { class: "quiz-modal", role: "dialog", aria_modal: "true",
                p { "{prompt}" }
                div { class: "quiz-modal__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::CancelSubmit),
                        "Keep working"
                    }
                    button {
                        class: "btn btn-primary",
                        id: "quiz-confirm-submit",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::ConfirmSubmit),
                        "Submit"
                    }
                }
            }
        }
    }
}

#[component]
fn BreakPanel(timer: TimerVm, next: Option<String>, on_start_next: EventHandler<()>) -> Element {
    rsx! {
        div { class: "quiz-break",
            h2 { "Break" }
            p { class: "quiz-break__timer", "{timer.label}" }
            if let Some(next) = next {
                p { "{next} starts automatically when the break ends." }
                button {
                    class: "btn btn-primary",
                    id: "quiz-start-next",
                    r#type: "button",
                    onclick: move |_| on_start_next.call(()),
                    "Start {next} now"
                }
            }
        }
    }
}
