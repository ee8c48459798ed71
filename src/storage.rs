//! On-disk storage for the save, export, and logging affordances.
//!
//! Everything lives under a per-user data directory:
//!
//! - `logs/chat_log.txt`  — append-only prompt/response log
//! - `saved/*.md`         — individual assistant messages saved by the user
//! - `exports/*`          — transcript and settings exports
//!
//! All helpers take the base directory explicitly so tests can point them at
//! a temp dir; the UI passes [`data_dir`].

use crate::types::{ChatMessage, Role, Settings};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const LOG_FILE: &str = "chat_log.txt";

/// Default storage root: the platform data dir, or a local `cache/` folder
/// when that is unavailable.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join("hearth");
    }
    PathBuf::from("cache")
}

fn logs_dir(base: &Path) -> PathBuf {
    base.join("logs")
}

fn saved_dir(base: &Path) -> PathBuf {
    base.join("saved")
}

fn exports_dir(base: &Path) -> PathBuf {
    base.join("exports")
}

fn timestamp_string() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown-time".to_string())
}

static FILE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Filename stamp: millisecond timestamp plus a process-wide counter, so
/// rapid saves of same-titled content never land on the same path.
fn file_stamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{millis}-{}", FILE_SEQ.fetch_add(1, Ordering::Relaxed))
}

/// Append one prompt/response pair to the interaction log. Format matches
/// the backing service's own `chat_log.txt`.
pub fn append_interaction_log(base: &Path, prompt: &str, response: &str) -> Result<(), String> {
    let dir = logs_dir(base);
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create log directory: {e}"))?;
    let entry = format!(
        "[{}]\nPrompt: {}\nResponse: {}\n\n",
        timestamp_string(),
        prompt,
        response
    );
    let path = dir.join(LOG_FILE);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open log: {e}"))?;
    file.write_all(entry.as_bytes())
        .map_err(|e| format!("Failed to write log: {e}"))
}

/// Save one assistant message as a standalone markdown doc. Returns the
/// written path.
pub fn save_message_doc(base: &Path, content: &str) -> Result<PathBuf, String> {
    if content.trim().is_empty() {
        return Err("Nothing to save".to_string());
    }
    let dir = saved_dir(base);
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create saved directory: {e}"))?;
    let title = extract_title(content, "response");
    let slug = slugify(&title);
    let filename = if slug.is_empty() {
        format!("response-{}.md", file_stamp())
    } else {
        format!("{}-{}.md", slug, file_stamp())
    };
    let path = dir.join(filename);
    fs::write(&path, content).map_err(|e| format!("Failed to write saved message: {e}"))?;
    Ok(path)
}

/// Render the conversation as a markdown transcript.
pub fn transcript_markdown(messages: &[ChatMessage]) -> String {
    let mut out = String::from("# Chat history\n");
    for msg in messages {
        let speaker = match msg.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        let when = msg
            .created_at
            .and_then(|ts| ts.format(&Rfc3339).ok())
            .unwrap_or_default();
        out.push_str(&format!(
            "\n## {speaker} ({}) {when}\n\n{}\n",
            msg.tool.title(),
            msg.content
        ));
    }
    out
}

/// Write the full transcript to the exports directory.
pub fn export_transcript(base: &Path, messages: &[ChatMessage]) -> Result<PathBuf, String> {
    let dir = exports_dir(base);
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create exports directory: {e}"))?;
    let path = dir.join(format!("chat-history-{}.md", file_stamp()));
    fs::write(&path, transcript_markdown(messages))
        .map_err(|e| format!("Failed to write transcript: {e}"))?;
    Ok(path)
}

/// Write the current settings to the exports directory as JSON.
pub fn export_settings(base: &Path, settings: &Settings) -> Result<PathBuf, String> {
    let dir = exports_dir(base);
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create exports directory: {e}"))?;
    let body = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    let path = dir.join(format!("settings-{}.json", file_stamp()));
    fs::write(&path, body).map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(path)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogStats {
    pub files: usize,
    pub bytes: u64,
}

/// File count and total size across the log and saved directories, shown in
/// the settings drawer.
pub fn log_stats(base: &Path) -> LogStats {
    let mut stats = LogStats::default();
    for dir in [logs_dir(base), saved_dir(base)] {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            if let Ok(meta) = entry.metadata()
                && meta.is_file()
            {
                stats.files += 1;
                stats.bytes += meta.len();
            }
        }
    }
    stats
}

/// Delete the interaction log and saved messages. Idempotent.
pub fn clear_logs(base: &Path) -> Result<(), String> {
    for dir in [logs_dir(base), saved_dir(base)] {
        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|e| format!("Failed to clear logs: {e}"))?;
        }
    }
    Ok(())
}

fn extract_title(content: &str, fallback: &str) -> String {
    let mut title = content
        .lines()
        .find_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.trim_start_matches('#').trim().to_string())
            }
        })
        .filter(|candidate| !candidate.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    if title.len() > 80 {
        // Walk back to a char boundary; byte 80 can land mid-character.
        let mut cut = 80;
        while !title.is_char_boundary(cut) {
            cut -= 1;
        }
        title.truncate(cut);
    }
    title
}

fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = false;
    for ch in input.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            slug.push(lower);
            last_dash = false;
        } else if (lower.is_ascii_whitespace() || lower == '-') && !last_dash && !slug.is_empty() {
            slug.push('-');
            last_dash = true;
        }
        if slug.len() >= 40 {
            break;
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation_and_dashes() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  ---  "), "");
        assert_eq!(slugify("Rust & Dioxus: notes"), "rust-dioxus-notes");
    }

    #[test]
    fn extract_title_prefers_first_nonempty_line() {
        assert_eq!(extract_title("\n\n# My Title\nbody", "x"), "My Title");
        assert_eq!(extract_title("   \n  ", "fallback"), "fallback");
    }

    #[test]
    fn extract_title_truncates_multibyte_lines_on_a_char_boundary() {
        // 30 three-byte chars: 90 bytes, byte 80 lands mid-character.
        let line = "あ".repeat(30);
        let title = extract_title(&line, "x");
        assert!(title.len() <= 80);
        assert!(line.starts_with(&title));
        assert!(!title.is_empty());
    }

    #[test]
    fn transcript_includes_both_roles() {
        use crate::types::Tool;
        let messages = vec![
            ChatMessage {
                role: Role::User,
                content: "hi".to_string(),
                created_at: None,
                tool: Tool::Writer,
            },
            ChatMessage {
                role: Role::Assistant,
                content: "hello".to_string(),
                created_at: None,
                tool: Tool::Writer,
            },
        ];
        let md = transcript_markdown(&messages);
        assert!(md.contains("## User"));
        assert!(md.contains("## Assistant"));
        assert!(md.contains("hello"));
    }
}
