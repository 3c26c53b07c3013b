use crate::features::{Assistant, CHAT_ERROR_REPLY, ChatTurn, Feature, settle};
use crate::markdown::markdown_to_html;
use crate::session::Session;
use crate::types::{ChatMessage, Role};
use dioxus::events::Key;
use dioxus::prelude::*;

const SUGGESTIONS: [&str; 3] = [
    "What are the biggest risks I should flag to leadership?",
    "Draft a status update from the analyzed documents.",
    "Which action items are most urgent?",
];

#[component]
pub fn ChatView(session: Signal<Session>) -> Element {
    let mut session = session;
    let assistant = use_context::<Signal<Assistant>>();
    let mut input = use_signal(String::new);
    // History lengths after which a failed reply was shown. These bubbles
    // are display only and never enter the conversation.
    let failed_after = use_signal(Vec::<usize>::new);

    let mut send_message = {
        let mut failed_after = failed_after;
        move |text: String| {
            if session.read().is_in_flight(Feature::Chat) {
                return;
            }
            let Some(turn) = session.with_mut(|state| ChatTurn::begin(state, &text)) else {
                return;
            };
            input.set(String::new());
            session.with_mut(|state| state.begin(Feature::Chat));

            let assistant = assistant();
            spawn(async move {
                let result = turn.execute(&assistant).await;
                let mut state = session.write();
                if let Ok(reply) = &result {
                    reply.apply(&mut state);
                }
                if settle(&mut state, Feature::Chat, result).is_err() {
                    let at = state.chat_history.len();
                    failed_after.with_mut(|marks| marks.push(at));
                }
            });
        }
    };

    let state = session.read();
    let sending = state.is_in_flight(Feature::Chat);
    let rows = transcript(&state.chat_history, &failed_after.read());

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    if state.chat_history.is_empty() && !sending {
                        div { class: "chat-welcome",
                            h2 { "Ask Clarity anything" }
                            p { "Questions are answered with your analyzed documents as background." }
                            div { class: "suggestions",
                                for suggestion in SUGGESTIONS {
                                    button {
                                        class: "suggestion",
                                        r#type: "button",
                                        onclick: move |_| send_message(suggestion.to_string()),
                                        "{suggestion}"
                                    }
                                }
                            }
                        }
                    }
                    for (i, (role, content)) in rows.into_iter().enumerate() {
                        MessageRow { key: "{i}", role, content }
                    }
                    if sending {
                        div { class: "message-row assistant",
                            div { class: "avatar assistant", "C" }
                            div { class: "message-stack",
                                div { class: "shimmer-line",
                                    span { class: "shimmer-text", "Processing…" }
                                }
                            }
                        }
                    }
                }
            }

            form { class: "composer no-divider",
                div { class: "composer-inner",
                    div { class: "hstack", style: "gap: 0.5rem; width: 100%; align-items: flex-end;",
                        textarea {
                            class: "", rows: "1", placeholder: "Ask about your documents…",
                            value: "{input}", oninput: move |ev| input.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    send_message(input());
                                }
                            },
                            disabled: sending, autofocus: true,
                        }
                        button {
                            class: "btn btn-primary", r#type: "button",
                            disabled: sending || input().trim().is_empty(),
                            onclick: move |_| send_message(input()),
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

/// The conversation as shown: history plus an error bubble after each
/// user turn whose reply failed.
fn transcript(history: &[ChatMessage], failed_after: &[usize]) -> Vec<(Role, String)> {
    let mut rows = Vec::with_capacity(history.len() + failed_after.len());
    for (i, msg) in history.iter().enumerate() {
        rows.push((msg.role, msg.content.clone()));
        for _ in failed_after.iter().filter(|at| **at == i + 1) {
            rows.push((Role::Assistant, CHAT_ERROR_REPLY.to_string()));
        }
    }
    rows
}

#[component]
fn MessageRow(role: Role, content: String) -> Element {
    let side = match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    rsx! {
        div { class: "message-row {side}",
            if matches!(role, Role::Assistant) { div { class: "avatar assistant", "C" } }
            div { class: "message-stack",
                div { class: "bubble {side}",
                    if matches!(role, Role::Assistant) {
                        AssistantBubble { content }
                    } else { "{content}" }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    let copy_payload = content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };

    rsx! {
        div { class: "bubble-controls",
            div { class: "actions",
                button { class: "action-btn", title: "Copy markdown", onclick: on_copy, "Copy" }
            }
        }
        div { class: "md", dangerous_inner_html: "{content_html}" }
    }
}
