//! Chat sessions kept in the key/value store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::AiModel;
use crate::orchestrator::RuntimeError;
use crate::store::KeyValueStore;

pub const SESSIONS_KEY: &str = "chat-sessions";
pub const ACTIVE_SESSION_KEY: &str = "active-session";
pub const DEFAULT_SESSION_TITLE: &str = "New Conversation";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,

    /// Set on AI replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<AiModel>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            ai_model: None,
        }
    }

    pub fn ai(content: impl Into<String>, model: AiModel) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender: Sender::Ai,
            timestamp: Utc::now(),
            ai_model: Some(model),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Session list and active-session pointer, persisted on every change.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: KeyValueStore,
}

impl SessionManager {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// All sessions, newest first.
    pub fn sessions(&self) -> Vec<ChatSession> {
        self.store.get_or(SESSIONS_KEY, Vec::new())
    }

    pub fn session(&self, id: &str) -> Option<ChatSession> {
        self.sessions().into_iter().find(|s| s.id == id)
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.store.get_or(ACTIVE_SESSION_KEY, None)
    }

    pub fn set_active_session(&self, id: &str) -> Result<(), RuntimeError> {
        if self.session(id).is_none() {
            return Err(RuntimeError::SessionNotFound(id.to_string()));
        }
        self.store.set(ACTIVE_SESSION_KEY, &Some(id));
        Ok(())
    }

    /// Create a session at the front of the list and make it active.
    pub fn create_session(&self, title: Option<&str>) -> ChatSession {
        let now = Utc::now();
        let session = ChatSession {
            id: uuid::Uuid::new_v4().to_string(),
            title: title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_SESSION_TITLE)
                .to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let mut sessions = self.sessions();
        sessions.insert(0, session.clone());
        self.store.set(SESSIONS_KEY, &sessions);
        self.store.set(ACTIVE_SESSION_KEY, &Some(&session.id));

        tracing::debug!(session_id = %session.id, "chat session created");
        session
    }

    /// Append a message and bump the session's `updated_at`.
    pub fn add_message(&self, session_id: &str, message: ChatMessage) -> Result<(), RuntimeError> {
        let mut sessions = self.sessions();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;

        session.updated_at = message.timestamp.max(session.updated_at);
        session.messages.push(message);
        self.store.set(SESSIONS_KEY, &sessions);
        Ok(())
    }

    /// The active session, creating one if none exists.
    pub fn active_or_create(&self) -> ChatSession {
        self.active_session_id()
            .and_then(|id| self.session(&id))
            .unwrap_or_else(|| self.create_session(None))
    }
}
