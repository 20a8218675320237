//! Async services tying the scorer, the mock models, and the store together.
//!
//! - [`DilemmaService`]: validate, simulate latency, score, record history
//! - [`ChatService`]: append the user message, ask the provider, append the reply

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use dilemma_core::{DilemmaError, EthicalAnalysis, EthicalDilemma};

use crate::config::{LatencyConfig, RuntimeConfig};
use crate::history::AnalysisHistory;
use crate::models::{random_between, AiModel, ModelProvider};
use crate::sessions::{ChatMessage, SessionManager};
use crate::store::KeyValueStore;

/// Reply stored when the model provider fails.
pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I'm having trouble processing your request right now. Please try again in a moment.";

/// Errors from the runtime services.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(transparent)]
    Dilemma(#[from] DilemmaError),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Runs analyses and keeps their history.
pub struct DilemmaService {
    config: RuntimeConfig,
    history: AnalysisHistory,
}

impl DilemmaService {
    pub fn new(config: RuntimeConfig, store: KeyValueStore) -> Self {
        Self {
            config,
            history: AnalysisHistory::new(store),
        }
    }

    /// Build from config, opening the store it names.
    pub fn from_config(config: RuntimeConfig) -> Self {
        let store = KeyValueStore::new(config.store.path.clone());
        Self::new(config, store)
    }

    pub fn history(&self) -> &AnalysisHistory {
        &self.history
    }

    /// Clean, validate, and score a dilemma, then record it in history.
    ///
    /// Blank options and stakeholders are dropped before validation, so a
    /// dilemma with two options of which one is blank is rejected.
    pub async fn analyze(&self, dilemma: &EthicalDilemma) -> Result<EthicalAnalysis, RuntimeError> {
        let dilemma = dilemma.normalized();
        dilemma_core::validate(&dilemma)?;

        simulate_latency(
            &self.config.latency,
            self.config.latency.analysis_min,
            self.config.latency.analysis_max,
        )
        .await;

        let analysis = match self.config.determinism.created_at {
            Some(created_at) => dilemma_core::analyze_at(&dilemma, created_at),
            None => dilemma_core::analyze(&dilemma),
        };

        let entry = self.history.record(&dilemma, &analysis);
        tracing::info!(
            analysis_id = %entry.analysis_id,
            confidence = entry.confidence,
            "analysis recorded"
        );

        Ok(analysis)
    }
}

async fn simulate_latency(latency: &LatencyConfig, min: Duration, max: Duration) {
    if latency.enabled {
        tokio::time::sleep(random_between(min, max)).await;
    }
}

/// Chat over persisted sessions.
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    sessions: SessionManager,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ModelProvider>, sessions: SessionManager) -> Self {
        Self { provider, sessions }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Send `text` to `model` in session `session_id` and return the reply.
    ///
    /// Both the user message and the reply are stored. A provider failure
    /// is not an error here: the stored reply becomes [`APOLOGY_MESSAGE`].
    pub async fn send(
        &self,
        session_id: &str,
        text: &str,
        model: AiModel,
    ) -> Result<ChatMessage, RuntimeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RuntimeError::EmptyMessage);
        }

        self.sessions.add_message(session_id, ChatMessage::user(text))?;

        let content = match self.provider.generate_response(text, model).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, %model, "model provider failed");
                APOLOGY_MESSAGE.to_string()
            }
        };

        let reply = ChatMessage::ai(content, model);
        self.sessions.add_message(session_id, reply.clone())?;
        Ok(reply)
    }
}
