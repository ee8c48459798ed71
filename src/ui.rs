use crate::api::probe_connection;
use crate::session::Conversation;
use crate::types::{ModelStatus, Settings, Tool};
use crate::views::shared::{Notice, NoticeStack};
use crate::views::{ChatView, SettingsPanel, ToolSidebar};
use dioxus::prelude::*;

const APP_CSS: Asset = asset!("/assets/app.css");

#[component]
pub fn App() -> Element {
    let selected_tool = use_signal(|| Tool::Writer);
    let sidebar_open = use_signal(|| true);
    let settings_open = use_signal(|| false);
    let model_status = use_signal(|| ModelStatus::Connecting);
    let settings = use_signal(Settings::default);
    let conversation = use_signal(Conversation::default);
    let notices = use_signal(Vec::<Notice>::new);

    // One-shot liveness probe; everything after startup goes through the
    // settings panel's reconnect action.
    use_future(move || {
        let mut model_status = model_status;
        async move {
            let ok = probe_connection().await;
            model_status.set(if ok {
                ModelStatus::Connected
            } else {
                ModelStatus::Disconnected
            });
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: APP_CSS }
        AppHeader { model_status: model_status(), sidebar_open, settings_open }
        div { class: "app-body",
            ToolSidebar { selected_tool, open: sidebar_open }
            ChatView { conversation, selected_tool, settings, model_status, notices }
            SettingsPanel { open: settings_open, settings, model_status, conversation, notices }
        }
        NoticeStack { notices }
    }
}

#[component]
fn AppHeader(
    model_status: ModelStatus,
    sidebar_open: Signal<bool>,
    settings_open: Signal<bool>,
) -> Element {
    let mut sidebar_open = sidebar_open;
    let mut settings_open = settings_open;
    rsx! {
        header { class: "header",
            div { class: "header-left",
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        let open = sidebar_open();
                        sidebar_open.set(!open);
                    },
                    if sidebar_open() { "✕" } else { "☰" }
                }
                div { class: "brand",
                    span { class: "brand-mark", "H" }
                    h1 { class: "brand-title", "Hearth" }
                }
            }
            div { class: "header-right",
                div { class: "status-pill",
                    span { class: model_status.dot_class() }
                    span { class: "status-label", "{model_status.label()}" }
                }
                button {
                    class: if settings_open() { "btn btn-ghost active" } else { "btn btn-ghost" },
                    r#type: "button",
                    onclick: move |_| {
                        let open = settings_open();
                        settings_open.set(!open);
                    },
                    "Settings"
                }
            }
        }
    }
}
