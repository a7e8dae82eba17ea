//! Chat assistant transcript store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Store;

/// Id of the seeded greeting.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Text of the seeded greeting.
pub const WELCOME_MESSAGE: &str = "Hi there! I can help you find goats, sheep, cattle, poultry \
     or hatching eggs. What are you looking for today?";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn welcome() -> Self {
        Self {
            id: WELCOME_MESSAGE_ID.to_owned(),
            role: ChatRole::Assistant,
            content: WELCOME_MESSAGE.to_owned(),
            timestamp: Utc::now(),
        }
    }

    /// Whether this is the seeded greeting.
    #[must_use]
    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_MESSAGE_ID
    }
}

/// Transcript plus panel flags.
///
/// Messages are kept in insertion order. The log only grows, except for
/// [`ChatStore::clear_messages`], which resets it to the welcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStore {
    messages: Vec<ChatMessage>,
    is_open: bool,
    is_expanded: bool,
    is_typing: bool,
}

impl Default for ChatStore {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            is_open: false,
            is_expanded: false,
            is_typing: false,
        }
    }
}

/// Mutations accepted by [`ChatStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    AddMessage { role: ChatRole, content: String },
    SetTyping(bool),
    ClearMessages,
    OpenChat,
    CloseChat,
    ToggleChat,
    ToggleExpanded,
}

impl ChatStore {
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    #[must_use]
    pub const fn is_typing(&self) -> bool {
        self.is_typing
    }

    /// The most recent message from the visitor, if any.
    #[must_use]
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == ChatRole::User)
    }

    /// Append a message with a fresh id and the current time, returning the id.
    pub fn add_message(&mut self, role: ChatRole, content: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.messages.push(ChatMessage {
            id: id.clone(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
        id
    }

    pub const fn set_typing(&mut self, typing: bool) {
        self.is_typing = typing;
    }

    /// Reset the log to exactly the welcome message.
    pub fn clear_messages(&mut self) {
        self.messages = vec![ChatMessage::welcome()];
    }

    pub const fn open_chat(&mut self) {
        self.is_open = true;
    }

    pub const fn close_chat(&mut self) {
        self.is_open = false;
    }

    pub const fn toggle_chat(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Expanded layout is independent of open/closed.
    pub const fn toggle_expanded(&mut self) {
        self.is_expanded = !self.is_expanded;
    }
}

impl Store for ChatStore {
    type Action = ChatAction;

    fn apply(&mut self, action: ChatAction) {
        match action {
            ChatAction::AddMessage { role, content } => {
                self.add_message(role, content);
            }
            ChatAction::SetTyping(typing) => self.set_typing(typing),
            ChatAction::ClearMessages => self.clear_messages(),
            ChatAction::OpenChat => self.open_chat(),
            ChatAction::CloseChat => self.close_chat(),
            ChatAction::ToggleChat => self.toggle_chat(),
            ChatAction::ToggleExpanded => self.toggle_expanded(),
        }
    }
}
