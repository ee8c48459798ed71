use crate::types::Tool;
use dioxus::prelude::*;

/// Tool picker. On narrow layouts the sidebar floats over the chat and
/// closes itself after a selection; on wide layouts the open flag only
/// collapses it.
#[component]
pub fn ToolSidebar(selected_tool: Signal<Tool>, open: Signal<bool>) -> Element {
    let mut open = open;
    rsx! {
        if open() {
            div { class: "sidebar-overlay", onclick: move |_| open.set(false) }
        }
        aside { class: if open() { "tool-sidebar open" } else { "tool-sidebar" },
            div { class: "sidebar-header",
                h2 { "AI Tools" }
                p { class: "text-muted", "Choose your AI assistant" }
            }
            div { class: "tool-cards",
                for tool in Tool::ALL {
                    ToolCard { tool, selected_tool, open }
                }
            }
        }
    }
}

#[component]
fn ToolCard(tool: Tool, selected_tool: Signal<Tool>, open: Signal<bool>) -> Element {
    let mut selected_tool = selected_tool;
    let mut open = open;
    let is_selected = selected_tool() == tool;
    rsx! {
        button {
            class: if is_selected { "tool-card selected" } else { "tool-card" },
            r#type: "button",
            onclick: move |_| {
                selected_tool.set(tool);
                open.set(false);
            },
            span { class: "tool-card-badge {tool.id()}" }
            span { class: "tool-card-body",
                span { class: "tool-card-title", "{tool.title()}" }
                span { class: "tool-card-description", "{tool.description()}" }
            }
        }
    }
}
