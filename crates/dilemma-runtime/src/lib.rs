//! # dilemma-runtime
//!
//! Runtime services around `dilemma-core`:
//! - Mock chat models with simulated latency
//! - A JSON-file key/value store for sessions and analysis history
//! - Async analysis and chat services
//!
//! Scoring itself stays in `dilemma-core` and never touches this crate's
//! latency or storage.

pub mod config;
pub mod history;
pub mod models;
pub mod orchestrator;
pub mod sessions;
pub mod store;

pub use config::{DeterminismConfig, LatencyConfig, RuntimeConfig, StoreConfig};
pub use history::{AnalysisHistory, HistoryEntry};
pub use models::{AiModel, MockModelService, ModelInfo, ModelProvider};
pub use orchestrator::{ChatService, DilemmaService, RuntimeError, APOLOGY_MESSAGE};
pub use sessions::{ChatMessage, ChatSession, Sender, SessionManager};
pub use store::KeyValueStore;
