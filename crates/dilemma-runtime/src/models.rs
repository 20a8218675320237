//! Mock model service.
//!
//! Every reply is a canned string chosen by model. There is no inference;
//! the only behavior is a randomized delay that makes replies feel like
//! network round-trips.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::LatencyConfig;
use crate::orchestrator::RuntimeError;

/// The selectable chat models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiModel {
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[default]
    #[serde(rename = "claude-3")]
    Claude3,
    #[serde(rename = "gemini-pro")]
    GeminiPro,
}

/// Display information for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: AiModel,
    pub name: &'static str,
    pub description: &'static str,
    pub strengths: [&'static str; 3],
}

impl AiModel {
    pub const ALL: [AiModel; 3] = [AiModel::Gpt4, AiModel::Claude3, AiModel::GeminiPro];

    pub fn as_str(&self) -> &'static str {
        match self {
            AiModel::Gpt4 => "gpt-4",
            AiModel::Claude3 => "claude-3",
            AiModel::GeminiPro => "gemini-pro",
        }
    }

    pub fn info(&self) -> ModelInfo {
        match self {
            AiModel::Gpt4 => ModelInfo {
                id: *self,
                name: "GPT-4",
                description: "Advanced reasoning and comprehensive analysis",
                strengths: ["Complex reasoning", "Detailed explanations", "Broad knowledge"],
            },
            AiModel::Claude3 => ModelInfo {
                id: *self,
                name: "Claude 3",
                description: "Thoughtful and nuanced ethical reasoning",
                strengths: ["Ethical reasoning", "Balanced perspectives", "Safety-focused"],
            },
            AiModel::GeminiPro => ModelInfo {
                id: *self,
                name: "Gemini Pro",
                description: "Multi-modal analysis and creative insights",
                strengths: ["Creative solutions", "Multi-perspective", "Efficient processing"],
            },
        }
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiModel {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AiModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RuntimeError::UnknownModel(s.to_string()))
    }
}

/// Source of model replies.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Reply to a chat message.
    async fn generate_response(&self, message: &str, model: AiModel) -> Result<String, RuntimeError>;

    /// Narrative take on a dilemma scenario.
    async fn analyze_dilemma(&self, scenario: &str, model: AiModel) -> Result<String, RuntimeError>;
}

/// Canned-reply provider with simulated latency.
pub struct MockModelService {
    latency: LatencyConfig,
}

impl MockModelService {
    pub fn new(latency: LatencyConfig) -> Self {
        Self { latency }
    }

    async fn simulate_delay(&self, min: Duration, max: Duration) {
        if !self.latency.enabled {
            return;
        }
        let delay = random_between(min, max);
        tracing::debug!(delay_ms = delay.as_millis() as u64, "simulating model latency");
        tokio::time::sleep(delay).await;
    }
}

/// Uniformly random duration in `[min, max]`; `min` when the range is empty.
pub(crate) fn random_between(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let millis = rand::thread_rng().gen_range(min.as_millis()..=max.as_millis());
    Duration::from_millis(millis as u64)
}

#[async_trait]
impl ModelProvider for MockModelService {
    async fn generate_response(&self, message: &str, model: AiModel) -> Result<String, RuntimeError> {
        self.simulate_delay(self.latency.chat_min, self.latency.chat_max)
            .await;
        Ok(chat_reply(message, model))
    }

    async fn analyze_dilemma(&self, _scenario: &str, model: AiModel) -> Result<String, RuntimeError> {
        self.simulate_delay(self.latency.analysis_min, self.latency.analysis_max)
            .await;
        Ok(perspective(model).to_string())
    }
}

fn chat_reply(message: &str, model: AiModel) -> String {
    let opening = match model {
        AiModel::Gpt4 => "I understand you're seeking guidance on this ethical matter. Let me provide a comprehensive analysis considering multiple perspectives and potential outcomes.",
        AiModel::Claude3 => "Thank you for sharing this ethical dilemma with me. I'll approach this thoughtfully, considering the various stakeholders and moral principles involved.",
        AiModel::GeminiPro => "Interesting ethical question! Let me explore this from several angles and suggest some creative approaches you might not have considered.",
    };

    // First 50 characters, not bytes
    let excerpt: String = message.chars().take(50).collect();

    format!(
        "{} Based on your message about \"{}...\", here's my analysis and recommendations.",
        opening, excerpt
    )
}

fn perspective(model: AiModel) -> &'static str {
    match model {
        AiModel::Gpt4 => "From an analytical perspective, this scenario presents several key ethical considerations:\n\n1. **Stakeholder Impact**: We must consider how each option affects all parties involved.\n2. **Long-term Consequences**: The decision should account for both immediate and future implications.\n3. **Moral Principles**: Universal ethical principles should guide our reasoning.\n\nI recommend a balanced approach that prioritizes transparency and stakeholder consultation.",
        AiModel::Claude3 => "This is a nuanced ethical situation that requires careful consideration of multiple moral frameworks:\n\n**Utilitarian Analysis**: Which option creates the greatest good for the greatest number?\n**Deontological Perspective**: What are our fundamental duties and obligations?\n**Care Ethics**: How do we maintain relationships and show empathy?\n\nI suggest focusing on the solution that best honors human dignity while achieving practical outcomes.",
        AiModel::GeminiPro => "Looking at this dilemma through multiple lenses reveals interesting insights:\n\n• **Risk Assessment**: Each option carries different probability-weighted outcomes\n• **Innovation Potential**: Consider creative alternatives that haven't been explored\n• **Systemic Impact**: How does this decision affect broader systems and patterns?\n\nA hybrid approach combining elements from different options might yield the most innovative and ethical solution.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> MockModelService {
        MockModelService::new(LatencyConfig {
            enabled: false,
            ..LatencyConfig::default()
        })
    }

    #[test]
    fn test_model_ids_round_trip() {
        for model in AiModel::ALL {
            assert_eq!(model.as_str().parse::<AiModel>().unwrap(), model);
        }
        assert!(matches!(
            "llama".parse::<AiModel>(),
            Err(RuntimeError::UnknownModel(m)) if m == "llama"
        ));
    }

    #[test]
    fn test_serde_uses_ids() {
        assert_eq!(serde_json::to_string(&AiModel::GeminiPro).unwrap(), "\"gemini-pro\"");
    }

    #[test]
    fn test_random_between_bounds() {
        let min = Duration::from_millis(10);
        let max = Duration::from_millis(20);
        for _ in 0..50 {
            let d = random_between(min, max);
            assert!(d >= min && d <= max);
        }
        assert_eq!(random_between(max, min), max);
    }

    #[tokio::test]
    async fn test_reply_quotes_first_fifty_chars() {
        let message = "a".repeat(80);
        let reply = instant().generate_response(&message, AiModel::Gpt4).await.unwrap();
        assert!(reply.starts_with("I understand you're seeking guidance"));
        assert!(reply.contains(&format!("\"{}...\"", "a".repeat(50))));
    }

    #[tokio::test]
    async fn test_reply_handles_multibyte_text() {
        let reply = instant()
            .generate_response("¿Es justo? ¿Es ético?", AiModel::Claude3)
            .await
            .unwrap();
        assert!(reply.contains("¿Es justo? ¿Es ético?..."));
    }

    #[tokio::test]
    async fn test_perspective_per_model() {
        let service = instant();
        let gemini = service.analyze_dilemma("s", AiModel::GeminiPro).await.unwrap();
        assert!(gemini.starts_with("Looking at this dilemma"));
        let claude = service.analyze_dilemma("s", AiModel::Claude3).await.unwrap();
        assert!(claude.contains("**Care Ethics**"));
    }
}
