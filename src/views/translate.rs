use crate::features::{Assistant, Feature, Notice, TranslateRequest, settle};
use crate::markdown::markdown_to_html;
use crate::parser::{StructuredResult, TranslationSet};
use crate::session::Session;
use crate::types::Audience;
use crate::views::shared::{FallbackCard, LoadingIndicator, Toast, show_notice};
use dioxus::prelude::*;

#[component]
pub fn TranslateView(session: Signal<Session>, toasts: Signal<Vec<Toast>>) -> Element {
    let mut session = session;
    let assistant = use_context::<Signal<Assistant>>();
    let mut input = use_signal(String::new);
    let mut selected = use_signal(Vec::<Audience>::new);

    let run_translate = move |_| {
        let request = match TranslateRequest::prepare(&input(), &selected()) {
            Ok(request) => request,
            Err(err) => {
                show_notice(toasts, Notice::from(&err));
                return;
            }
        };
        session.with_mut(|state| state.begin(Feature::Translate));
        let assistant = assistant();
        spawn(async move {
            let result = request.execute(&assistant).await;
            let mut state = session.write();
            if let Ok(outcome) = &result {
                outcome.apply(&mut state);
            }
            if let Err(err) = settle(&mut state, Feature::Translate, result) {
                show_notice(toasts, Notice::from(&err));
            }
        });
    };

    let state = session.read();
    let loading = state.is_in_flight(Feature::Translate);
    let chars = input().chars().count();

    rsx! {
        div { class: "main-container",
            section { class: "panel",
                textarea {
                    class: "translate-input",
                    rows: "8",
                    placeholder: "Paste an email, memo or announcement…",
                    value: "{input}",
                    oninput: move |ev| input.set(ev.value()),
                }
                div { class: "char-count", "{chars} chars" }

                div { class: "audience-grid",
                    for audience in Audience::ALL {
                        AudienceChip {
                            key: "{audience.key()}",
                            audience,
                            selected: selected().contains(&audience),
                            on_toggle: move |_| {
                                selected.with_mut(|list| {
                                    if let Some(pos) = list.iter().position(|a| *a == audience) {
                                        list.remove(pos);
                                    } else {
                                        list.push(audience);
                                    }
                                });
                            },
                        }
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: loading,
                    onclick: run_translate,
                    "Translate"
                }
            }

            if loading {
                LoadingIndicator { label: "Translating…" }
            } else if let Some(result) = state.translation.clone() {
                TranslationResults { result }
            }
        }
    }
}

#[component]
fn AudienceChip(audience: Audience, selected: bool, on_toggle: EventHandler<()>) -> Element {
    let class = if selected {
        "audience-chip selected"
    } else {
        "audience-chip"
    };
    rsx! {
        button {
            class: class,
            r#type: "button",
            title: audience.description(),
            onclick: move |_| on_toggle.call(()),
            span { class: "chip-icon", "{audience.icon()}" }
            "{audience.label()}"
        }
    }
}

#[component]
fn TranslationResults(result: StructuredResult) -> Element {
    let Some(TranslationSet { translations }) = result.translations() else {
        return rsx! {
            FallbackCard { icon: "📝", title: "Translation", result }
        };
    };
    rsx! {
        div { class: "translate-results",
            for (i, translation) in translations.into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: "translate-card",
                    style: format_args!("animation-delay: {:.2}s", i as f32 * 0.15),
                    div { class: "translate-card-header",
                        span { class: "chip-icon", "{translation.icon}" }
                        "{translation.label}"
                    }
                    div {
                        class: "translate-card-body md",
                        dangerous_inner_html: "{markdown_to_html(&translation.content)}",
                    }
                }
            }
        }
    }
}
