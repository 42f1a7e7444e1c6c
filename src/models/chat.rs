use serde::{ Serialize, Deserialize };

/// One turn of a conversation. The sequence is owned by the calling session
/// and never persisted by this crate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }

    /// Only `user` and `assistant` are valid on the wire; the system turn is
    /// always supplied server-side.
    pub fn has_valid_role(&self) -> bool {
        matches!(self.role.as_str(), "user" | "assistant")
    }
}
