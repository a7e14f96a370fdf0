use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::map_results;

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let Some(handoff) = ctx.results() else {
        return rsx! {
            div { class: "page results-page",
                p { "{ViewError::NoResults.message()}" }
                Link { to: Route::Home {}, "Back to start" }
            }
        };
    };
    let vm = map_results(&handoff);

    rsx! {
        div { class: "page results-page",
            h2 { "Results" }
            p { class: "results-participant", "{vm.participant_label}" }
            p { class: "results-branch", "{vm.branch_label}" }
            table { class: "results-table",
                thead {
                    tr {
                        th { "Section" }
                        th { "Score" }
                        th { "Percent" }
                    }
                }
                tbody {
                    for row in vm.rows {
                        tr { key: "{row.topic}",
                            td { "{row.topic}" }
                            td { "{row.score_label}" }
                            td { "{row.percent_label}" }
                        }
                    }
                }
                tfoot {
                    tr {
                        th { "Overall" }
                        td { colspan: "2", "{vm.overall_label}" }
                    }
                }
            }
            ul { class: "results-meta",
                li { "{vm.answered_label}" }
                li { "Time taken: {vm.elapsed_label}" }
                li { "Completed: {vm.completed_at_str}" }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| {
                    ctx.clear();
                    let _ = navigator.push(Route::Home {});
                },
                "Start over"
            }
        }
    }
}
