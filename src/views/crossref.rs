use crate::attachment::format_file_size;
use crate::features::{Assistant, CrossRefRequest, Feature, Notice, settle};
use crate::markdown::markdown_to_html;
use crate::parser::{CrossRefReport, StructuredResult};
use crate::session::{Session, Slot};
use crate::views::shared::{FallbackCard, LoadingIndicator, Toast, read_attachments, show_notice};
use dioxus::html::FileEngine;
use dioxus::html::HasFileData;
use dioxus::prelude::*;
use std::sync::Arc;

#[component]
pub fn CrossRefView(session: Signal<Session>, toasts: Signal<Vec<Toast>>) -> Element {
    let mut session = session;
    let assistant = use_context::<Signal<Assistant>>();

    let run_compare = move |_| {
        let request = match CrossRefRequest::prepare(&session.read()) {
            Ok(request) => request,
            Err(err) => {
                show_notice(toasts, Notice::from(&err));
                return;
            }
        };
        session.with_mut(|state| state.begin(Feature::CrossReference));
        let assistant = assistant();
        spawn(async move {
            let result = request.execute(&assistant).await;
            let mut state = session.write();
            if let Ok(outcome) = &result {
                outcome.apply(&mut state);
            }
            if let Err(err) = settle(&mut state, Feature::CrossReference, result) {
                show_notice(toasts, Notice::from(&err));
            }
        });
    };

    let state = session.read();
    let loading = state.is_in_flight(Feature::CrossReference);
    let ready = state.crossref_ready();

    rsx! {
        div { class: "main-container",
            section { class: "panel",
                div { class: "crossref-zones",
                    SlotZone { session, slot: Slot::A }
                    div { class: "crossref-vs", "vs" }
                    SlotZone { session, slot: Slot::B }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: loading || !ready,
                    onclick: run_compare,
                    "Cross-Reference"
                }
            }

            if loading {
                LoadingIndicator { label: "Comparing documents…" }
            } else if let Some(result) = state.cross_reference.clone() {
                CrossRefResults { result }
            }
        }
    }
}

/// Drop target for one side of the comparison. Only the first file of a
/// drop or selection is kept.
#[component]
fn SlotZone(session: Signal<Session>, slot: Slot) -> Element {
    let mut session = session;
    let load_first = move |engine: Arc<dyn FileEngine>| {
        spawn(async move {
            if let Some(file) = read_attachments(engine).await.into_iter().next() {
                session.with_mut(|state| state.set_crossref(slot, file));
            }
        });
    };

    let state = session.read();
    let current = state.crossref.get(slot);
    let class = if current.is_some() {
        "crossref-zone has-file"
    } else {
        "crossref-zone"
    };

    rsx! {
        label {
            class: class,
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                evt.prevent_default();
                if let Some(engine) = evt.files() {
                    load_first(engine);
                }
            },
            input {
                r#type: "file",
                class: "visually-hidden",
                onchange: move |evt| {
                    if let Some(engine) = evt.files() {
                        load_first(engine);
                    }
                },
            }
            div { class: "crossref-label", "Document {slot.label()}" }
            if let Some(file) = current {
                div { class: "crossref-name", "{file.name()}" }
                div { class: "file-size", "{format_file_size(file.size())}" }
            } else {
                div { class: "upload-hint", "Drop a file or click to browse" }
            }
        }
    }
}

#[component]
fn CrossRefResults(result: StructuredResult) -> Element {
    let Some(CrossRefReport { sections }) = result.cross_reference() else {
        return rsx! {
            FallbackCard { icon: "📊", title: "Analysis", result }
        };
    };
    rsx! {
        div { class: "crossref-results",
            for (i, section) in sections.into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: "crossref-section",
                    style: format_args!("animation-delay: {:.2}s", i as f32 * 0.12),
                    div { class: "crossref-section-header",
                        span { class: "icon", "{section.icon}" }
                        "{section.title}"
                    }
                    div {
                        class: "crossref-section-content md",
                        dangerous_inner_html: "{markdown_to_html(&section.content)}",
                    }
                }
            }
        }
    }
}
