use quiz_core::model::QuestionId;

use super::test_harness::{ViewKind, participant, setup_view_harness, test_context};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_identity_form() {
    let mut harness = setup_view_harness(ViewKind::Home, test_context());
    harness.rebuild();
    let html = harness.render();
    for expected in ["Roll No.", "Select your branch", "Information Technology Engineering", "4 sections of 30 minutes"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_session_links_home() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_context());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No quiz is in progress."), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_stepper() {
    let context = test_context();
    let _ = context.begin_session(participant());
    let mut harness = setup_view_harness(ViewKind::Quiz, context);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Maths"), "missing start button in {html}");
    assert!(html.contains("Up next"), "missing next marker in {html}");
    assert!(html.contains("Logical Reasoning"), "missing topic row in {html}");
    assert!(html.contains("0 of 4 sections submitted"), "missing progress in {html}");
    harness.context.clear();
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_question_and_timer() {
    let context = test_context();
    let driver = context.begin_session(participant());
    driver.start_next_topic().unwrap();
    driver.select_answer(QuestionId::new(1), "75").unwrap();

    let mut harness = setup_view_harness(ViewKind::Quiz, context);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("25 × 36 ÷ 12 = ?"), "missing prompt in {html}");
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("30:00"), "missing timer in {html}");
    assert!(html.contains("quiz-option--selected"), "missing selection in {html}");
    harness.context.clear();
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_confirm_and_break() {
    let context = test_context();
    let driver = context.begin_session(participant());
    driver.start_next_topic().unwrap();
    driver.request_submit().unwrap();

    let mut harness = setup_view_harness(ViewKind::Quiz, context.clone());
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Submit Maths? 2 questions are unanswered."),
        "missing confirm prompt in {html}"
    );

    driver.confirm_submit().unwrap();
    let mut harness = setup_view_harness(ViewKind::Quiz, context);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Break"), "missing break title in {html}");
    assert!(html.contains("Start Logical Reasoning now"), "missing skip in {html}");
    harness.context.clear();
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_scores() {
    let context = test_context();
    let driver = context.begin_session(participant());
    driver.start_next_topic().unwrap();
    driver.select_answer(QuestionId::new(2), "7").unwrap();
    for _ in 0..4 {
        driver.request_submit().unwrap();
        driver.confirm_submit().unwrap();
        let _ = driver.start_next_topic();
    }
    context.finish_session(driver.handoff().unwrap());

    let mut harness = setup_view_harness(ViewKind::Results, context);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Asha Verma (2K22/CO/101)"), "missing participant in {html}");
    assert!(html.contains("1 / 2"), "missing maths score in {html}");
    assert!(html.contains("Not scored"), "missing personality row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_results() {
    let mut harness = setup_view_harness(ViewKind::Results, test_context());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Results are not available yet."), "missing notice in {html}");
}
