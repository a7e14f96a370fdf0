use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use tokio::runtime::Handle;

use quiz_core::model::{Branch, Participant, ParticipantDraft, QuestionBank, QuizSettings};
use quiz_core::time::fixed_clock;
use services::{QuizSession, builtin_bank};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{HomeView, QuizView, ResultsView};

struct TestApp {
    bank: Arc<QuestionBank>,
    runtime: Handle,
}

impl UiApp for TestApp {
    fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    fn settings(&self) -> QuizSettings {
        QuizSettings::default()
    }

    fn new_session(&self, participant: Participant) -> QuizSession {
        QuizSession::new(
            Arc::clone(&self.bank),
            self.settings(),
            participant,
            fixed_clock(),
        )
    }

    fn runtime(&self) -> Handle {
        self.runtime.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    Results,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Results => rsx! { ResultsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub context: AppContext,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn participant() -> Participant {
    ParticipantDraft {
        name: "Asha Verma".into(),
        roll_no: "2K22/CO/101".into(),
        branch: Some(Branch::ComputerScience),
    }
    .validate()
    .expect("valid participant")
}

/// Context over the built-in bank. Must be called inside a tokio runtime.
pub fn test_context() -> AppContext {
    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        bank: Arc::new(builtin_bank().expect("builtin bank")),
        runtime: Handle::current(),
    });
    build_app_context(&app)
}

pub fn setup_view_harness(view: ViewKind, context: AppContext) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            context: context.clone(),
            view,
        },
    );
    ViewHarness { dom, context }
}
