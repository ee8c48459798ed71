use crate::api::{GenerateOutcome, generate_reply};
use crate::session::{Conversation, INPUT_SOFT_LIMIT};
use crate::storage;
use crate::types::{ChatMessage, ModelStatus, Role, Settings, Tool};
use crate::views::controls::ToolControls;
use crate::views::shared::{Notice, format_message_timestamp, markdown_to_html, push_notice};
use dioxus::events::Key;
use dioxus::prelude::*;

fn counter_class(len: usize) -> &'static str {
    if len > INPUT_SOFT_LIMIT {
        "composer-counter over-limit"
    } else {
        "composer-counter"
    }
}

#[component]
pub fn ChatView(
    conversation: Signal<Conversation>,
    selected_tool: Signal<Tool>,
    settings: Signal<Settings>,
    model_status: Signal<ModelStatus>,
    notices: Signal<Vec<Notice>>,
) -> Element {
    let mut input = use_signal(String::new);
    let sending = use_signal(|| false);

    let mut send_message = {
        let mut input = input;
        let mut sending = sending;
        let mut conversation = conversation;
        move |text: String| {
            // One request in flight at a time; the send affordances are
            // disabled, but keyboard submission lands here too.
            if sending() || model_status() == ModelStatus::Disconnected {
                return;
            }
            let tool = selected_tool();
            let Some(epoch) = conversation.with_mut(|convo| convo.submit(&text, tool)) else {
                return;
            };
            input.set(String::new());
            sending.set(true);

            let prompt = text.trim().to_string();
            let temperature = settings.with(|s| s.temperature);
            let log_enabled = settings.with(|s| s.logging_enabled);
            let auto_save = settings.with(|s| s.auto_save);
            spawn(async move {
                let outcome = generate_reply(prompt.clone(), temperature).await;
                match &outcome {
                    GenerateOutcome::Failure(message) => {
                        push_notice(notices, "Request failed", message.clone());
                    }
                    GenerateOutcome::Output(text) => {
                        let base = storage::data_dir();
                        if log_enabled
                            && let Err(err) = storage::append_interaction_log(&base, &prompt, text)
                        {
                            tracing::warn!(error = %err, "could not append interaction log");
                        }
                        if auto_save
                            && let Err(err) = storage::save_message_doc(&base, text)
                        {
                            tracing::warn!(error = %err, "could not auto-save response");
                        }
                    }
                }
                conversation.with_mut(|convo| convo.settle(epoch, tool, outcome));
                sending.set(false);
            });
        }
    };

    let clear_chat = {
        let mut conversation = conversation;
        move |_| {
            conversation.with_mut(|convo| convo.clear());
            push_notice(notices, "Chat cleared", "All messages have been removed.");
        }
    };

    let regenerate = move |_: ()| {
        let prompt = conversation.with(|convo| convo.last_user_prompt().map(str::to_string));
        match prompt {
            Some(prompt) => send_message(prompt),
            None => push_notice(notices, "Nothing to regenerate", "Send a message first."),
        }
    };

    let tool = selected_tool();
    let messages_snapshot = conversation.with(|convo| convo.messages().to_vec());
    let char_count = input().chars().count();
    let is_sending = sending();
    let disconnected = model_status() == ModelStatus::Disconnected;

    rsx! {
        div { class: "chat-panel",
            div { class: "chat-header",
                div {
                    h2 { class: "chat-title", "{tool.title()}" }
                    p { class: "chat-subtitle", "Ready to assist with your {tool.id()} tasks" }
                }
                button { class: "btn btn-ghost", r#type: "button", onclick: clear_chat, "Clear" }
            }

            ToolControls { selected_tool, settings }

            div { class: "chat-list",
                if messages_snapshot.is_empty() {
                    div { class: "chat-empty",
                        h3 { "Start a conversation" }
                        p { "Use the {tool.title()} to help with your task. Type a message below to get started." }
                    }
                } else {
                    for (i, msg) in messages_snapshot.iter().enumerate() {
                        MessageBubble {
                            key: "{i}",
                            message: msg.clone(),
                            show_actions: !is_sending,
                            notices,
                            on_regenerate: regenerate,
                        }
                    }
                }
                if is_sending {
                    div { class: "shimmer-line",
                        span { class: "shimmer-text", "AI is thinking…" }
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    div { class: "composer-input",
                        textarea {
                            rows: "3",
                            placeholder: "{tool.placeholder()}",
                            value: "{input}",
                            oninput: move |ev| input.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter
                                    && (ev.modifiers().ctrl() || ev.modifiers().meta())
                                {
                                    ev.prevent_default();
                                    let text = input();
                                    send_message(text);
                                }
                            },
                            disabled: is_sending,
                        }
                        span { class: counter_class(char_count), "{char_count}/{INPUT_SOFT_LIMIT}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: is_sending || disconnected || input().trim().is_empty(),
                        onclick: move |_| {
                            let text = input();
                            send_message(text);
                        },
                        if is_sending { "Sending…" } else { "Send" }
                    }
                }
                div { class: "composer-hints",
                    span { "Press Ctrl+Enter to send" }
                    span {
                        if disconnected { "Model offline" } else { "Local AI model ready" }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(
    message: ChatMessage,
    show_actions: bool,
    notices: Signal<Vec<Notice>>,
    on_regenerate: EventHandler<()>,
) -> Element {
    let is_assistant = message.role == Role::Assistant;
    let row_class = match message.role {
        Role::User => "message-row user",
        Role::Assistant => "message-row assistant",
    };
    let bubble_class = match message.role {
        Role::User => "bubble user",
        Role::Assistant => "bubble assistant",
    };
    let content_html = is_assistant.then(|| markdown_to_html(&message.content));

    let copy_payload = message.content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        #[cfg(any(feature = "desktop", feature = "mobile"))]
        {
            if let Ok(mut cb) = arboard::Clipboard::new()
                && cb.set_text(raw).is_ok()
            {
                push_notice(notices, "Copied to clipboard", "Message content has been copied.");
                return;
            }
            push_notice(notices, "Copy failed", "Clipboard is not available.");
        }
        #[cfg(not(any(feature = "desktop", feature = "mobile")))]
        {
            let _ = raw;
            push_notice(notices, "Copy failed", "Clipboard is not available.");
        }
    };

    let save_payload = message.content.clone();
    let on_save = move |_| match storage::save_message_doc(&storage::data_dir(), &save_payload) {
        Ok(path) => push_notice(
            notices,
            "Message saved",
            format!("Saved to {}", path.display()),
        ),
        Err(err) => push_notice(notices, "Save failed", err),
    };

    rsx! {
        div { class: row_class,
            div { class: "message-stack",
                div { class: bubble_class,
                    if let Some(html) = content_html {
                        div { class: "md", dangerous_inner_html: "{html}" }
                    } else {
                        "{message.content}"
                    }
                }
                div { class: "message-meta",
                    if let Some(ts) = format_message_timestamp(message.created_at) {
                        span { class: "message-timestamp", "{ts}" }
                    }
                    if is_assistant && show_actions {
                        div { class: "actions",
                            button { class: "action-btn", r#type: "button", title: "Copy", onclick: on_copy, "Copy" }
                            button { class: "action-btn", r#type: "button", title: "Save", onclick: on_save, "Save" }
                            button {
                                class: "action-btn",
                                r#type: "button",
                                title: "Regenerate",
                                onclick: move |_| on_regenerate.call(()),
                                "Regenerate"
                            }
                        }
                    }
                }
            }
        }
    }
}
