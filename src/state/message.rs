use chrono::{DateTime, Local};

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Text,
    /// Synthetic model message standing in for a failed turn
    LinkFailure,
}

/// One transcript entry. Model text is replaced while its turn streams and
/// left alone once the turn completes.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, kind: MessageKind::Text, content: content.into(), timestamp: Local::now() }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self { role: Role::Model, kind: MessageKind::Text, content: content.into(), timestamp: Local::now() }
    }

    pub fn link_failure(content: impl Into<String>) -> Self {
        Self { kind: MessageKind::LinkFailure, ..Self::model(content) }
    }

    pub fn is_model(&self) -> bool {
        self.role == Role::Model
    }
}
