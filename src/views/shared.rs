use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use dioxus::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
});

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

// ============================================
// Transient notices
// ============================================

const NOTICE_LIFETIME: Duration = Duration::from_secs(4);

static NOTICE_SEQ: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub title: String,
    pub detail: String,
}

/// Push a toast and schedule its dismissal.
pub fn push_notice(
    mut notices: Signal<Vec<Notice>>,
    title: impl Into<String>,
    detail: impl Into<String>,
) {
    let id = NOTICE_SEQ.fetch_add(1, Ordering::Relaxed);
    notices.with_mut(|list| {
        list.push(Notice {
            id,
            title: title.into(),
            detail: detail.into(),
        })
    });
    spawn(async move {
        tokio::time::sleep(NOTICE_LIFETIME).await;
        notices.with_mut(|list| list.retain(|notice| notice.id != id));
    });
}

#[component]
pub fn NoticeStack(notices: Signal<Vec<Notice>>) -> Element {
    rsx! {
        div { class: "notice-stack", aria_live: "polite",
            for notice in notices().iter() {
                div { key: "{notice.id}", class: "notice",
                    div { class: "notice-title", "{notice.title}" }
                    if !notice.detail.is_empty() {
                        div { class: "notice-detail", "{notice.detail}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_renders_basic_structure() {
        let html = markdown_to_html("# Title\n\nsome *emphasis*");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<em>"));
    }

    #[test]
    fn timestamp_formatting_handles_none() {
        assert_eq!(format_message_timestamp(None), None);
    }
}
