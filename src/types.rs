use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub created_at: Option<OffsetDateTime>,
    pub tool: Tool,
}

/// The fixed set of prompt-shaping UI modes. Selecting a tool changes the
/// displayed copy and control strip, not the transport payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Writer,
    Rephraser,
    Explainer,
    Search,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Writer, Tool::Rephraser, Tool::Explainer, Tool::Search];

    pub fn id(self) -> &'static str {
        match self {
            Tool::Writer => "writer",
            Tool::Rephraser => "rephraser",
            Tool::Explainer => "explainer",
            Tool::Search => "search",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tool::Writer => "AI Writer",
            Tool::Rephraser => "Rephraser",
            Tool::Explainer => "Explainer",
            Tool::Search => "Custom Search",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::Writer => "Generate creative content from topics",
            Tool::Rephraser => "Rewrite text in different styles",
            Tool::Explainer => "Explain complex concepts simply",
            Tool::Search => "Query local documents with RAG",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Tool::Writer => "Describe what you want to write about...",
            Tool::Rephraser => "Paste the text you want to rephrase...",
            Tool::Explainer => "What concept would you like explained?",
            Tool::Search => "Ask a question about your documents...",
        }
    }
}

/// Perceived backend availability. Set from the startup probe and the
/// settings panel's reconnect action, never from a protocol handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelStatus {
    Connected,
    Connecting,
    Disconnected,
}

impl ModelStatus {
    pub fn label(self) -> &'static str {
        match self {
            ModelStatus::Connected => "Connected",
            ModelStatus::Connecting => "Connecting",
            ModelStatus::Disconnected => "Disconnected",
        }
    }

    pub fn dot_class(self) -> &'static str {
        match self {
            ModelStatus::Connected => "status-dot connected",
            ModelStatus::Connecting => "status-dot connecting",
            ModelStatus::Disconnected => "status-dot disconnected",
        }
    }
}

/// Session settings, owned by the top-level `App` component. The temperature
/// here is the one source of truth: the composer sends it on every generate
/// call, and the writer control strip's creativity slider edits it too.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub system_prompt: String,
    pub auto_save: bool,
    pub logging_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: "llama2-7b".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            system_prompt: "You are a helpful AI assistant.".to_string(),
            auto_save: true,
            logging_enabled: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelAvailability {
    Available,
    Downloading,
    Unavailable,
}

impl ModelAvailability {
    pub fn label(self) -> &'static str {
        match self {
            ModelAvailability::Available => "available",
            ModelAvailability::Downloading => "downloading",
            ModelAvailability::Unavailable => "unavailable",
        }
    }
}

pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub availability: ModelAvailability,
}

/// Models offered in the settings drawer. The backing service decides what is
/// actually loaded; this list only drives the picker.
pub fn model_catalog() -> &'static [ModelInfo] {
    static CATALOG: [ModelInfo; 4] = [
        ModelInfo {
            id: "llama2-7b",
            name: "Llama 2 7B",
            availability: ModelAvailability::Available,
        },
        ModelInfo {
            id: "llama2-13b",
            name: "Llama 2 13B",
            availability: ModelAvailability::Available,
        },
        ModelInfo {
            id: "codellama-7b",
            name: "CodeLlama 7B",
            availability: ModelAvailability::Downloading,
        },
        ModelInfo {
            id: "mistral-7b",
            name: "Mistral 7B",
            availability: ModelAvailability::Unavailable,
        },
    ];
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_ids_are_distinct() {
        for (i, a) in Tool::ALL.iter().enumerate() {
            for b in Tool::ALL.iter().skip(i + 1) {
                assert_ne!(a.id(), b.id());
            }
        }
    }

    #[test]
    fn every_tool_has_copy() {
        for tool in Tool::ALL {
            assert!(!tool.title().is_empty());
            assert!(!tool.description().is_empty());
            assert!(!tool.placeholder().is_empty());
        }
    }

    #[test]
    fn default_settings_match_composer_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.temperature, 0.7);
        assert!(settings.max_tokens >= 1);
        assert!(!settings.system_prompt.is_empty());
    }

    #[test]
    fn catalog_contains_default_model() {
        let default_model = Settings::default().model;
        assert!(model_catalog().iter().any(|m| m.id == default_model));
    }
}
