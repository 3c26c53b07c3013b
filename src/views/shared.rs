use crate::attachment::{Attachment, format_file_size};
use crate::features::{Notice, NoticeKind};
use crate::markdown::markdown_to_html;
use crate::parser::StructuredResult;
use dioxus::html::FileEngine;
use dioxus::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::warn;

pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Shows a notice and removes it again after [`TOAST_LIFETIME`].
pub fn show_notice(mut toasts: Signal<Vec<Toast>>, notice: Notice) {
    let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
    toasts.with_mut(|list| list.push(Toast { id, notice }));
    spawn(async move {
        tokio::time::sleep(TOAST_LIFETIME).await;
        toasts.with_mut(|list| list.retain(|toast| toast.id != id));
    });
}

#[component]
pub fn ToastStack(toasts: Signal<Vec<Toast>>) -> Element {
    rsx! {
        div { class: "toast-container",
            for toast in toasts().into_iter() {
                div {
                    key: "{toast.id}",
                    class: format_args!(
                        "toast {}",
                        match toast.notice.kind { NoticeKind::Info => "info", NoticeKind::Error => "error" },
                    ),
                    "{toast.notice.message}"
                }
            }
        }
    }
}

/// Reads every file a picker or drop handed over, in the order given.
/// Unreadable files are skipped with a warning.
pub async fn read_attachments(engine: Arc<dyn FileEngine>) -> Vec<Attachment> {
    let mut files = Vec::new();
    for path in engine.files() {
        match engine.read_file(&path).await {
            Some(bytes) => files.push(Attachment::from_bytes(display_name(&path), bytes)),
            None => warn!(file = %path, "could not read selected file"),
        }
    }
    files
}

/// Desktop engines report full paths; the chip only shows the file name.
fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

#[component]
pub fn FileChip(name: String, size: usize, on_remove: EventHandler<()>) -> Element {
    rsx! {
        div { class: "file-chip",
            span { class: "file-icon", "📄" }
            span { "{name}" }
            span { class: "file-size", "{format_file_size(size)}" }
            button {
                class: "file-remove",
                r#type: "button",
                title: "Remove",
                onclick: move |_| on_remove.call(()),
                "×"
            }
        }
    }
}

#[component]
pub fn LoadingIndicator(label: &'static str) -> Element {
    rsx! {
        div { class: "loading",
            div { class: "loading-spinner" }
            div { class: "shimmer-line",
                span { class: "shimmer-text", "{label}" }
            }
        }
    }
}

/// What a fallback card shows. Only raw replies go through the markdown
/// renderer; structured JSON is emitted as a text node.
#[derive(Debug, PartialEq)]
enum FallbackBody {
    Markdown(String),
    Preformatted(String),
}

fn fallback_body(result: &StructuredResult) -> FallbackBody {
    match result {
        StructuredResult::Raw(raw) => FallbackBody::Markdown(markdown_to_html(raw)),
        structured => FallbackBody::Preformatted(structured.display_text()),
    }
}

/// A single card holding a response that did not match the expected shape.
#[component]
pub fn FallbackCard(icon: &'static str, title: &'static str, result: StructuredResult) -> Element {
    rsx! {
        div { class: "result-card full-width",
            div { class: "result-card-header",
                div { class: "result-card-icon summary", "{icon}" }
                div { class: "result-card-title", "{title}" }
            }
            match fallback_body(&result) {
                FallbackBody::Markdown(html) => rsx! {
                    div { class: "result-card-content md", dangerous_inner_html: "{html}" }
                },
                FallbackBody::Preformatted(text) => rsx! {
                    div { class: "result-card-content md",
                        pre { "{text}" }
                    }
                },
            }
        }
    }
}
