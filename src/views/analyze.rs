use crate::attachment::Attachment;
use crate::features::{AnalyzeRequest, Assistant, Feature, Notice, settle};
use crate::parser::{AnalysisReport, StructuredResult};
use crate::session::Session;
use crate::views::shared::{
    FallbackCard, FileChip, LoadingIndicator, Toast, read_attachments, show_notice,
};
use dioxus::html::HasFileData;
use dioxus::prelude::*;

#[component]
pub fn AnalyzeView(session: Signal<Session>, toasts: Signal<Vec<Toast>>) -> Element {
    let mut session = session;
    let assistant = use_context::<Signal<Assistant>>();
    let mut summary = use_signal(|| Option::<String>::None);
    let mut drag_over = use_signal(|| false);

    let mut add_files = move |files: Vec<Attachment>| {
        session.with_mut(|state| state.add_files(files));
    };

    let run_analysis = move |_| {
        let request = match AnalyzeRequest::prepare(&session.read()) {
            Ok(request) => request,
            Err(err) => {
                show_notice(toasts, Notice::from(&err));
                return;
            }
        };
        session.with_mut(|state| state.begin(Feature::Analyze));
        let assistant = assistant();
        spawn(async move {
            let result = request.execute(&assistant).await;
            let mut state = session.write();
            if let Ok(outcome) = &result {
                outcome.apply(&mut state);
            }
            match settle(&mut state, Feature::Analyze, result) {
                Ok(outcome) => summary.set(Some(outcome.summary_line())),
                Err(err) => show_notice(toasts, Notice::from(&err)),
            }
        });
    };

    let state = session.read();
    let loading = state.is_in_flight(Feature::Analyze);
    let zone_class = if drag_over() {
        "upload-zone drag-over"
    } else {
        "upload-zone"
    };

    rsx! {
        div { class: "main-container",
            section { class: "panel",
                label {
                    class: zone_class,
                    ondragover: move |evt| {
                        evt.prevent_default();
                        drag_over.set(true);
                    },
                    ondragleave: move |_| drag_over.set(false),
                    ondrop: move |evt| {
                        evt.prevent_default();
                        drag_over.set(false);
                        if let Some(engine) = evt.files() {
                            spawn(async move { add_files(read_attachments(engine).await) });
                        }
                    },
                    input {
                        r#type: "file",
                        multiple: true,
                        class: "visually-hidden",
                        onchange: move |evt| {
                            if let Some(engine) = evt.files() {
                                spawn(async move { add_files(read_attachments(engine).await) });
                            }
                        },
                    }
                    div { class: "upload-icon", "⬆" }
                    div { class: "upload-title", "Drop documents here or click to browse" }
                    div { class: "upload-hint", "PDF, images, text, markdown, CSV" }
                }

                if !state.uploaded.is_empty() {
                    div { class: "files-list",
                        for (index, file) in state.uploaded.iter().enumerate() {
                            FileChip {
                                key: "{index}-{file.name()}",
                                name: file.name().to_string(),
                                size: file.size(),
                                on_remove: move |_| {
                                    session.with_mut(|state| {
                                        state.remove_file(index);
                                    });
                                },
                            }
                        }
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: loading,
                    onclick: run_analysis,
                    "Analyze"
                }
            }

            if loading {
                LoadingIndicator { label: "Analyzing documents…" }
            } else if let Some(result) = state.analysis.clone() {
                section { class: "results",
                    if let Some(line) = summary() {
                        div { class: "results-meta", "{line}" }
                    }
                    AnalysisResults { result }
                }
            }
        }
    }
}

#[component]
fn AnalysisResults(result: StructuredResult) -> Element {
    let Some(AnalysisReport { sections }) = result.analysis() else {
        return rsx! {
            FallbackCard { icon: "📊", title: "Analysis", result }
        };
    };
    rsx! {
        div { class: "results-grid",
            for (i, section) in sections.into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: "result-card",
                    style: format_args!("animation-delay: {:.1}s", i as f32 * 0.1),
                    div { class: "result-card-header",
                        div { class: format_args!("result-card-icon {}", section.icon_class), "{section.icon}" }
                        div { class: "result-card-title", "{section.title}" }
                    }
                    div { class: "result-card-content",
                        ul {
                            for item in section.content.iter() {
                                li { "{item}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
