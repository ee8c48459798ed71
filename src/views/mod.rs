pub mod chat;
pub mod controls;
pub mod settings;
pub mod shared;
pub mod sidebar;

pub use chat::ChatView;
pub use settings::SettingsPanel;
pub use sidebar::ToolSidebar;
