use crate::types::{Settings, Tool};
use dioxus::events::FormEvent;
use dioxus::prelude::*;

static WRITER_CONTENT_TYPES: [(&str, &str); 5] = [
    ("blog", "Blog Post"),
    ("tweet", "Tweet"),
    ("story", "Story"),
    ("email", "Email"),
    ("article", "Article"),
];

static WRITER_TONES: [(&str, &str); 4] = [
    ("professional", "Professional"),
    ("casual", "Casual"),
    ("creative", "Creative"),
    ("formal", "Formal"),
];

static REPHRASER_STYLES: [&str; 5] = ["CEO", "Teenager", "Academic", "Comedian", "Poet"];

static EXPLAINER_SUBJECTS: [&str; 4] = ["Science", "Tech", "History", "Math"];

fn complexity_label(value: i64) -> &'static str {
    if value <= 3 {
        "Elementary"
    } else if value <= 7 {
        "Intermediate"
    } else {
        "Expert"
    }
}

/// Tool-specific control strip. These widgets shape local display state
/// only; the prompt sent over the wire is identical regardless of tool. The
/// one exception is the writer's creativity slider, which edits the shared
/// settings temperature.
#[component]
pub fn ToolControls(selected_tool: Signal<Tool>, settings: Signal<Settings>) -> Element {
    let content_type = use_signal(|| "blog".to_string());
    let tone = use_signal(|| "professional".to_string());
    let complexity = use_signal(|| 5i64);
    let subject = use_signal(|| Option::<String>::None);

    match selected_tool() {
        Tool::Writer => rsx! {
            WriterControls { content_type, tone, settings }
        },
        Tool::Rephraser => rsx! {
            RephraserControls { tone }
        },
        Tool::Explainer => rsx! {
            ExplainerControls { complexity, subject }
        },
        Tool::Search => rsx! {
            SearchControls {}
        },
    }
}

#[component]
fn WriterControls(
    content_type: Signal<String>,
    tone: Signal<String>,
    settings: Signal<Settings>,
) -> Element {
    let mut content_type = content_type;
    let mut tone = tone;
    let mut settings = settings;
    let temperature = settings.with(|s| s.temperature);
    rsx! {
        div { class: "tool-strip",
            div { class: "strip-group",
                label { class: "strip-label", for: "writer-type", "Type" }
                select {
                    id: "writer-type",
                    value: "{content_type}",
                    onchange: move |ev: FormEvent| content_type.set(ev.value()),
                    for (value, label) in WRITER_CONTENT_TYPES.iter() {
                        option { value: "{value}", "{label}" }
                    }
                }
            }
            div { class: "strip-group",
                label { class: "strip-label", for: "writer-tone", "Tone" }
                select {
                    id: "writer-tone",
                    value: "{tone}",
                    onchange: move |ev: FormEvent| tone.set(ev.value()),
                    for (value, label) in WRITER_TONES.iter() {
                        option { value: "{value}", "{label}" }
                    }
                }
            }
            div { class: "strip-group strip-slider",
                label { class: "strip-label", for: "writer-creativity", "Creativity" }
                input {
                    id: "writer-creativity",
                    r#type: "range",
                    min: "0.1",
                    max: "1",
                    step: "0.1",
                    value: "{temperature}",
                    oninput: move |ev: FormEvent| {
                        if let Ok(value) = ev.value().parse::<f64>() {
                            settings.with_mut(|s| s.temperature = value);
                        }
                    },
                }
                span { class: "strip-value", "{temperature:.1}" }
            }
        }
    }
}

#[component]
fn RephraserControls(tone: Signal<String>) -> Element {
    let mut tone = tone;
    rsx! {
        div { class: "tool-strip",
            span { class: "strip-label", "Style" }
            for style in REPHRASER_STYLES.iter() {
                button {
                    class: if tone() == style.to_lowercase() { "chip active" } else { "chip" },
                    r#type: "button",
                    onclick: move |_| tone.set(style.to_lowercase()),
                    "{style}"
                }
            }
        }
    }
}

#[component]
fn ExplainerControls(complexity: Signal<i64>, subject: Signal<Option<String>>) -> Element {
    let mut complexity = complexity;
    let mut subject = subject;
    let level = complexity();
    rsx! {
        div { class: "tool-strip",
            div { class: "strip-group strip-slider",
                label { class: "strip-label", for: "explainer-complexity", "Complexity" }
                input {
                    id: "explainer-complexity",
                    r#type: "range",
                    min: "1",
                    max: "10",
                    step: "1",
                    value: "{level}",
                    oninput: move |ev: FormEvent| {
                        if let Ok(value) = ev.value().parse::<i64>() {
                            complexity.set(value.clamp(1, 10));
                        }
                    },
                }
                span { class: "strip-value", "{complexity_label(level)}" }
            }
            div { class: "strip-group",
                for name in EXPLAINER_SUBJECTS.iter() {
                    button {
                        class: if subject().as_deref() == Some(*name) { "chip active" } else { "chip" },
                        r#type: "button",
                        onclick: move |_| subject.set(Some(name.to_string())),
                        "{name}"
                    }
                }
            }
        }
    }
}

#[component]
fn SearchControls() -> Element {
    rsx! {
        div { class: "tool-strip",
            span { class: "strip-label",
                "Documents: "
                span { class: "strip-highlight", "0 indexed" }
            }
            span { class: "strip-note", "Vector DB: Ready" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_bands_cover_the_slider_range() {
        assert_eq!(complexity_label(1), "Elementary");
        assert_eq!(complexity_label(3), "Elementary");
        assert_eq!(complexity_label(4), "Intermediate");
        assert_eq!(complexity_label(7), "Intermediate");
        assert_eq!(complexity_label(8), "Expert");
        assert_eq!(complexity_label(10), "Expert");
    }
}
