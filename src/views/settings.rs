use crate::api::probe_connection;
use crate::session::Conversation;
use crate::storage;
use crate::types::{ModelAvailability, ModelStatus, Settings, model_catalog};
use crate::views::shared::{Notice, push_notice};
use dioxus::events::FormEvent;
use dioxus::prelude::*;

#[component]
pub fn SettingsPanel(
    open: Signal<bool>,
    settings: Signal<Settings>,
    model_status: Signal<ModelStatus>,
    conversation: Signal<Conversation>,
    notices: Signal<Vec<Notice>>,
) -> Element {
    let mut open = open;
    let mut settings = settings;
    let temperature = settings.with(|s| s.temperature);
    let active_model = settings.with(|s| s.model.clone());

    // Reading the counter subscribes this component; handlers that change
    // what is on disk bump it so the stat box recounts.
    let mut stats_refresh = use_signal(|| 0u32);
    let _ = stats_refresh();
    let stats = storage::log_stats(&storage::data_dir());

    let export_history = move |_| {
        let messages = conversation.with(|convo| convo.messages().to_vec());
        match storage::export_transcript(&storage::data_dir(), &messages) {
            Ok(path) => push_notice(
                notices,
                "Chat history exported",
                format!("Written to {}", path.display()),
            ),
            Err(err) => push_notice(notices, "Export failed", err),
        }
    };

    let export_settings = move |_| {
        let snapshot = settings();
        match storage::export_settings(&storage::data_dir(), &snapshot) {
            Ok(path) => push_notice(
                notices,
                "Settings exported",
                format!("Written to {}", path.display()),
            ),
            Err(err) => push_notice(notices, "Export failed", err),
        }
    };

    let clear_logs = move |_| match storage::clear_logs(&storage::data_dir()) {
        Ok(()) => {
            stats_refresh.with_mut(|n| *n += 1);
            push_notice(notices, "Logs cleared", "All logged data has been removed.");
        }
        Err(err) => push_notice(notices, "Clear failed", err),
    };

    let reconnect = {
        let mut model_status = model_status;
        move |_| {
            model_status.set(ModelStatus::Connecting);
            spawn(async move {
                let ok = probe_connection().await;
                model_status.set(if ok {
                    ModelStatus::Connected
                } else {
                    ModelStatus::Disconnected
                });
                if ok {
                    push_notice(notices, "Model connected", "");
                } else {
                    push_notice(notices, "Model unreachable", "Check that the local server is running.");
                }
            });
        }
    };

    rsx! {
        if open() {
            div { class: "settings-overlay", onclick: move |_| open.set(false) }
        }
        aside { class: if open() { "settings-panel open" } else { "settings-panel" },
            div { class: "settings-header",
                h2 { "Settings" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| open.set(false),
                    "Close"
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Model Configuration" }
                div { class: "field",
                    label { class: "field-label", for: "settings-model", "Active Model" }
                    select {
                        id: "settings-model",
                        value: settings.with(|s| s.model.clone()),
                        onchange: move |ev: FormEvent| settings.with_mut(|s| s.model = ev.value()),
                        for model in model_catalog() {
                            option {
                                value: "{model.id}",
                                disabled: model.availability == ModelAvailability::Unavailable,
                                "{model.name} ({model.availability.label()})"
                            }
                        }
                    }
                }
                div { class: "field",
                    label { class: "field-label", for: "settings-temperature",
                        "Temperature: {temperature:.1}"
                    }
                    input {
                        id: "settings-temperature",
                        r#type: "range",
                        min: "0.1",
                        max: "2",
                        step: "0.1",
                        value: "{temperature}",
                        oninput: move |ev: FormEvent| {
                            if let Ok(value) = ev.value().parse::<f64>() {
                                settings.with_mut(|s| s.temperature = value);
                            }
                        },
                    }
                    div { class: "field-hint-row",
                        span { "More focused" }
                        span { "More creative" }
                    }
                }
                div { class: "field",
                    label { class: "field-label", for: "settings-max-tokens", "Max Tokens" }
                    input {
                        id: "settings-max-tokens",
                        r#type: "number",
                        min: "1",
                        max: "4096",
                        value: settings.with(|s| s.max_tokens.to_string()),
                        onchange: move |ev: FormEvent| {
                            if let Ok(value) = ev.value().parse::<u32>() {
                                settings.with_mut(|s| s.max_tokens = value.clamp(1, 4096));
                            }
                        },
                    }
                }
                div { class: "field",
                    label { class: "field-label", for: "settings-system-prompt", "System Prompt" }
                    textarea {
                        id: "settings-system-prompt",
                        rows: "4",
                        placeholder: "Define the AI's behavior and personality...",
                        value: settings.with(|s| s.system_prompt.clone()),
                        oninput: move |ev: FormEvent| {
                            settings.with_mut(|s| s.system_prompt = ev.value())
                        },
                    }
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Output Settings" }
                div { class: "field toggle-field",
                    div {
                        span { class: "field-label", "Auto-save responses" }
                        p { class: "field-hint", "Automatically save AI responses" }
                    }
                    input {
                        r#type: "checkbox",
                        checked: settings.with(|s| s.auto_save),
                        onchange: move |ev: FormEvent| {
                            settings.with_mut(|s| s.auto_save = ev.checked())
                        },
                    }
                }
                div { class: "field toggle-field",
                    div {
                        span { class: "field-label", "Enable logging" }
                        p { class: "field-hint", "Log all interactions" }
                    }
                    input {
                        r#type: "checkbox",
                        checked: settings.with(|s| s.logging_enabled),
                        onchange: move |ev: FormEvent| {
                            settings.with_mut(|s| s.logging_enabled = ev.checked())
                        },
                    }
                }
                button { class: "btn btn-outline", r#type: "button", onclick: export_history,
                    "Export Chat History"
                }
                button { class: "btn btn-outline", r#type: "button", onclick: export_settings,
                    "Export Settings"
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Logging & Data" }
                div { class: "stat-box",
                    div { class: "stat-line", "Saved files: {stats.files}" }
                    div { class: "stat-line", "Storage used: {stats.bytes} bytes" }
                }
                button { class: "btn btn-danger", r#type: "button", onclick: clear_logs,
                    "Clear All Logs"
                }
            }

            div { class: "settings-section",
                h3 { class: "section-title", "Connection Status" }
                div { class: "stat-box",
                    div { class: "stat-header",
                        span { "Model Status" }
                        span { class: model_status().dot_class() }
                    }
                    div { class: "stat-line", "Model: {active_model}" }
                    div { class: "stat-line", "{model_status().label()}" }
                }
                button { class: "btn btn-outline", r#type: "button", onclick: reconnect,
                    "Reconnect Model"
                }
            }
        }
    }
}
