use crate::ai::Gateway;
use crate::features::Assistant;
use crate::session::Session;
use crate::views::shared::{Toast, ToastStack};
use crate::views::{AnalyzeView, ChatView, CrossRefView, TranslateView};
use dioxus::prelude::*;
use tracing::error;

const CLARITY_CSS: Asset = asset!("/assets/clarity.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Analyze,
    Translate,
    CrossReference,
    Chat,
}

impl AppTab {
    const ALL: [AppTab; 4] = [
        AppTab::Analyze,
        AppTab::Translate,
        AppTab::CrossReference,
        AppTab::Chat,
    ];

    fn label(self) -> &'static str {
        match self {
            AppTab::Analyze => "Analyze",
            AppTab::Translate => "Translate",
            AppTab::CrossReference => "Cross-Reference",
            AppTab::Chat => "Chat",
        }
    }
}

/// Builds the assistant from the environment. A bad configuration still
/// opens the app; every request then fails with "All models failed".
fn load_assistant() -> Assistant {
    match Assistant::from_env() {
        Ok(assistant) => assistant,
        Err(err) => {
            error!(error = %err, "invalid configuration, no endpoints available");
            Assistant::new(Gateway::new(Vec::new()))
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(load_assistant()));
    let session = use_signal(Session::new);
    let toasts = use_signal(Vec::<Toast>::new);
    let active_tab = use_signal(|| AppTab::Analyze);

    rsx! {
        document::Link { rel: "stylesheet", href: CLARITY_CSS }
        AppHeader { active_tab }
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Analyze,
                children: rsx!( AnalyzeView { session, toasts } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Translate,
                children: rsx!( TranslateView { session, toasts } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::CrossReference,
                children: rsx!( CrossRefView { session, toasts } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Chat,
                children: rsx!( ChatView { session } ),
            }
        }
        ToastStack { toasts }
    }
}

#[component]
fn AppHeader(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "header no-divider",
            div { class: "header-content",
                div { class: "wordmark", "Clarity" }
                div { class: "tabs",
                    for tab in AppTab::ALL {
                        TabButton { active_tab, tab }
                    }
                }
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let is_active = active_tab() == tab;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab {
        "tab active"
    } else {
        "tab"
    };
    rsx! {
        h1 {
            class: class,
            onclick: move |_| active_tab.set(tab),
            "{tab.label()}"
        }
    }
}
