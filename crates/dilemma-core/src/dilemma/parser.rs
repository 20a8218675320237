//! Dilemma records and parsing from YAML/JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::validation::ValidationIssue;

/// Errors that can occur when loading or validating dilemmas.
#[derive(Error, Debug)]
pub enum DilemmaError {
    #[error("Failed to read dilemma file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Dilemma validation failed: {}", join_issues(.0))]
    ValidationError(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// One course of action the decision maker could take.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DilemmaOption {
    /// Caller-assigned identifier
    pub id: String,

    /// Short name of the option
    pub title: String,

    /// What taking this option means
    #[serde(default)]
    pub description: String,

    /// Expected consequences, in the order the author listed them
    #[serde(default)]
    pub consequences: Vec<String>,
}

impl DilemmaOption {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        consequences: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            consequences,
        }
    }

    /// An option counts toward the two-option minimum only when both
    /// title and description carry text.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// A user-authored scenario with competing options and affected stakeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EthicalDilemma {
    #[serde(default = "new_id")]
    pub id: String,

    pub title: String,

    /// The situation being decided, in free text
    pub scenario: String,

    #[serde(default)]
    pub options: Vec<DilemmaOption>,

    #[serde(default)]
    pub stakeholders: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl EthicalDilemma {
    /// Create a dilemma with a fresh id and the current time.
    pub fn new(
        title: impl Into<String>,
        scenario: impl Into<String>,
        options: Vec<DilemmaOption>,
        stakeholders: Vec<String>,
    ) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            scenario: scenario.into(),
            options,
            stakeholders,
            context: None,
            timeframe: None,
            created_at: Utc::now(),
        }
    }

    /// Parse a dilemma from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, DilemmaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a dilemma from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DilemmaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a dilemma from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DilemmaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load a dilemma from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DilemmaError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a dilemma, choosing the format by file extension.
    ///
    /// `.json` files are parsed as JSON; everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DilemmaError> {
        let path = path.as_ref();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    /// Trim text fields and drop blank entries, the way a submitted form
    /// is cleaned before analysis.
    ///
    /// Incomplete options (blank title or description) and blank
    /// stakeholders are removed. A blank context becomes `None`.
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.trim().to_string(),
            scenario: self.scenario.trim().to_string(),
            options: self
                .options
                .iter()
                .filter(|o| o.is_complete())
                .cloned()
                .collect(),
            stakeholders: self
                .stakeholders
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
            context: self
                .context
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            timeframe: self.timeframe.clone(),
            created_at: self.created_at,
        }
    }
}
