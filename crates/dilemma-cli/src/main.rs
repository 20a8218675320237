//! Dilemma CLI
//!
//! Command-line interface for ethical dilemma analysis.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a dilemma
//! dilemma analyze --dilemma hiring.yaml
//!
//! # JSON output, pinned timestamp
//! dilemma analyze --dilemma hiring.yaml --format json --created-at 2025-12-20T00:00:00Z
//!
//! # Write an export next to the input
//! dilemma analyze --dilemma hiring.yaml --export ./reports
//!
//! # Chat with a mock model
//! dilemma chat --model gpt-4 "Should I report my colleague?"
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: Dilemma failed validation
//! - 3: Error

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use dilemma_core::{
    collect_issues, frameworks, AnalysisExport, DilemmaError, EthicalAnalysis, EthicalDilemma,
};
use dilemma_runtime::{
    AiModel, ChatService, DilemmaService, KeyValueStore, MockModelService, ModelProvider,
    RuntimeConfig, RuntimeError, Sender, SessionManager,
};

/// Dilemma: rule-based ethical dilemma analysis
#[derive(Parser)]
#[command(name = "dilemma")]
#[command(version)]
#[command(about = "Score decision dilemmas under five ethical frameworks", long_about = None)]
struct Cli {
    /// Runtime configuration file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip simulated model and analysis latency
    #[arg(long, global = true)]
    no_latency: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a dilemma file
    Analyze {
        /// Path to the dilemma (YAML or JSON)
        #[arg(short, long)]
        dilemma: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show per-framework explanations and reasoning
        #[arg(long)]
        explain: bool,

        /// Directory to write an `ethical-analysis-<title>.json` export into
        #[arg(long)]
        export: Option<PathBuf>,

        /// Also ask a mock model for its perspective
        #[arg(long)]
        perspective: Option<AiModel>,

        /// Explicit timestamp for deterministic analysis (RFC 3339).
        /// Example: --created-at 2025-12-20T00:00:00Z
        #[arg(long, value_parser = parse_datetime)]
        created_at: Option<DateTime<Utc>>,
    },

    /// Validate a dilemma file
    Validate {
        /// Path to the dilemma file
        path: PathBuf,
    },

    /// Show dilemma details
    Show {
        /// Path to the dilemma file
        path: PathBuf,
    },

    /// List the ethical frameworks
    Frameworks,

    /// List the mock models
    Models,

    /// Send a chat message
    Chat {
        /// Model to answer with (defaults to the configured model)
        #[arg(short, long)]
        model: Option<AiModel>,

        /// Session to post into (defaults to the active session)
        #[arg(short, long)]
        session: Option<String>,

        /// Message text
        message: String,
    },

    /// List recent analyses
    History {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// List chat sessions
    Sessions,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse an RFC 3339 datetime string to DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime format: {}. Expected RFC 3339 (e.g., 2025-12-20T00:00:00Z)", e))
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref(), cli.no_latency)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;

    match cli.command {
        Commands::Analyze {
            dilemma,
            format,
            explain,
            export,
            perspective,
            created_at,
        } => runtime.block_on(analyze_command(
            config,
            dilemma,
            format,
            explain,
            export,
            perspective,
            created_at,
        )),
        Commands::Validate { path } => validate_dilemma(path),
        Commands::Show { path } => show_dilemma(path),
        Commands::Frameworks => list_frameworks(),
        Commands::Models => list_models(&config),
        Commands::Chat {
            model,
            session,
            message,
        } => runtime.block_on(chat_command(config, model, session, message)),
        Commands::History { limit } => list_history(config, limit),
        Commands::Sessions => list_sessions(&config),
    }
}

fn load_config(path: Option<&PathBuf>, no_latency: bool) -> Result<RuntimeConfig> {
    let config = match path {
        Some(path) => RuntimeConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => RuntimeConfig::default(),
    };
    Ok(if no_latency {
        config.without_latency()
    } else {
        config
    })
}

fn load_dilemma(path: &PathBuf) -> Result<EthicalDilemma> {
    EthicalDilemma::from_file(path)
        .with_context(|| format!("Failed to load dilemma from {:?}", path))
}

async fn analyze_command(
    mut config: RuntimeConfig,
    dilemma_path: PathBuf,
    format: OutputFormat,
    explain: bool,
    export_dir: Option<PathBuf>,
    perspective: Option<AiModel>,
    created_at: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    let dilemma = load_dilemma(&dilemma_path)?;

    if created_at.is_some() {
        config.determinism.created_at = created_at;
    }
    let latency = config.latency.clone();
    let service = DilemmaService::from_config(config);

    let analysis = match service.analyze(&dilemma).await {
        Ok(analysis) => analysis,
        Err(RuntimeError::Dilemma(DilemmaError::ValidationError(issues))) => {
            eprintln!("Dilemma validation failed:");
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e).context("Analysis failed"),
    };

    let dilemma = dilemma.normalized();

    let perspective = match perspective {
        Some(model) => {
            let provider = MockModelService::new(latency);
            let text = provider.analyze_dilemma(&dilemma.scenario, model).await?;
            Some((model, text))
        }
        None => None,
    };

    match format {
        OutputFormat::Json => {
            let perspective = perspective.as_ref().map(|(model, text)| (*model, text.as_str()));
            println!("{}", analysis_json(&analysis, perspective)?);
        }
        OutputFormat::Text => {
            print_text_analysis(&dilemma, &analysis, explain);

            if let Some((model, text)) = &perspective {
                println!();
                println!("--- {} Perspective ---", model.info().name);
                println!();
                println!("{}", text);
            }
        }
    }

    if let Some(dir) = export_dir {
        let export = match created_at {
            Some(at) => AnalysisExport::new_at(dilemma, analysis, at),
            None => AnalysisExport::new(dilemma, analysis),
        };
        let path = export
            .write_to_dir(&dir)
            .with_context(|| format!("Failed to write export to {:?}", dir))?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(ExitCode::from(0))
}

/// The analysis as pretty JSON. With a model perspective the analysis is
/// wrapped as `{"analysis": ..., "perspective": {"model", "text"}}`.
fn analysis_json(analysis: &EthicalAnalysis, perspective: Option<(AiModel, &str)>) -> Result<String> {
    let value = serde_json::to_value(analysis)?;
    let document = match perspective {
        None => value,
        Some((model, text)) => {
            let perspective = Map::from_iter([
                ("model".to_string(), Value::from(model.as_str())),
                ("text".to_string(), Value::from(text)),
            ]);
            Value::Object(Map::from_iter([
                ("analysis".to_string(), value),
                ("perspective".to_string(), Value::Object(perspective)),
            ]))
        }
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn print_text_analysis(dilemma: &EthicalDilemma, analysis: &EthicalAnalysis, explain: bool) {
    println!("ANALYSIS: {}", dilemma.title);
    println!();

    let option_title = dilemma
        .options
        .iter()
        .find(|o| o.id == analysis.recommendation.option_id)
        .map(|o| o.title.as_str())
        .unwrap_or("(none)");
    println!("Recommendation: {}", option_title);
    println!("Confidence: {:.0}%", analysis.recommendation.confidence * 100.0);
    println!();
    println!("{}", analysis.summary);
    println!();

    println!("Framework scores:");
    for score in &analysis.scores {
        println!(
            "  {:<16} {:>3.0}%  {}",
            frameworks::display_name(&score.framework),
            score.score * 100.0,
            score.band().label()
        );
    }

    if !analysis.risks.is_empty() {
        println!();
        println!("Risks:");
        for risk in &analysis.risks {
            println!(
                "  [{}] {} (likelihood {:.0}%, impact {:.0}%)",
                risk.severity.as_str().to_uppercase(),
                risk.description,
                risk.likelihood * 100.0,
                risk.impact * 100.0
            );
        }
    }

    if explain {
        println!();
        println!("--- Framework Reasoning ---");

        for score in &analysis.scores {
            println!();
            println!(
                "{}: {} ({:.0}% confidence)",
                frameworks::display_name(&score.framework),
                score.explanation,
                score.confidence * 100.0
            );
            for reason in &score.reasoning {
                println!("  - {}", reason);
            }
        }
    }
}

fn validate_dilemma(path: PathBuf) -> Result<ExitCode> {
    let dilemma = load_dilemma(&path)?.normalized();

    let issues = collect_issues(&dilemma);
    if issues.is_empty() {
        println!("Dilemma is valid: {}", dilemma.title);
        println!();
        println!("Options: {}", dilemma.options.len());
        println!("Stakeholders: {}", dilemma.stakeholders.len());
        Ok(ExitCode::from(0))
    } else {
        eprintln!("Dilemma validation failed:");
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        Ok(ExitCode::from(1))
    }
}

fn show_dilemma(path: PathBuf) -> Result<ExitCode> {
    let dilemma = load_dilemma(&path)?;

    println!("Dilemma: {}", dilemma.title);
    println!("Id: {}", dilemma.id);
    println!();
    println!("Scenario:");
    println!("  {}", dilemma.scenario);
    if let Some(context) = &dilemma.context {
        println!();
        println!("Context: {}", context);
    }
    if let Some(timeframe) = &dilemma.timeframe {
        println!("Timeframe: {}", timeframe);
    }
    println!();

    println!("Options:");
    for (i, option) in dilemma.options.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, option.title, option.id);
        if !option.description.is_empty() {
            println!("     {}", option.description);
        }
        for consequence in &option.consequences {
            println!("     - {}", consequence);
        }
    }
    println!();

    println!("Stakeholders:");
    for stakeholder in &dilemma.stakeholders {
        println!("  - {}", stakeholder);
    }

    Ok(ExitCode::from(0))
}

fn list_frameworks() -> Result<ExitCode> {
    for framework in frameworks::frameworks() {
        println!("{:<14} {}", framework.id, framework.name);
        println!("               {}", framework.description);
    }
    Ok(ExitCode::from(0))
}

fn list_models(config: &RuntimeConfig) -> Result<ExitCode> {
    for model in AiModel::ALL {
        let info = model.info();
        let marker = if model == config.default_model { "*" } else { " " };
        println!("{} {:<11} {}", marker, model.as_str(), info.name);
        println!("              {}", info.description);
        println!("              Strengths: {}", info.strengths.join(", "));
    }
    Ok(ExitCode::from(0))
}

async fn chat_command(
    config: RuntimeConfig,
    model: Option<AiModel>,
    session: Option<String>,
    message: String,
) -> Result<ExitCode> {
    let model = model.unwrap_or(config.default_model);
    let sessions = SessionManager::new(KeyValueStore::new(config.store.path.clone()));

    let session_id = match session {
        Some(id) => {
            sessions.set_active_session(&id)?;
            id
        }
        None => sessions.active_or_create().id,
    };

    let provider: Arc<dyn ModelProvider> = Arc::new(MockModelService::new(config.latency));
    let chat = ChatService::new(provider, sessions);
    let reply = chat.send(&session_id, &message, model).await?;

    println!("[{}] {}", model.info().name, reply.content);
    Ok(ExitCode::from(0))
}

fn list_history(config: RuntimeConfig, limit: usize) -> Result<ExitCode> {
    let service = DilemmaService::from_config(config);
    let entries = service.history().entries();

    if entries.is_empty() {
        println!("No analyses recorded");
        return Ok(ExitCode::from(0));
    }

    for entry in entries.iter().take(limit) {
        println!(
            "{}  {} ({:.0}% confidence)",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.title,
            entry.confidence * 100.0
        );
        println!("    {}", entry.preview);
    }
    Ok(ExitCode::from(0))
}

fn list_sessions(config: &RuntimeConfig) -> Result<ExitCode> {
    let sessions = SessionManager::new(KeyValueStore::new(config.store.path.clone()));
    let active = sessions.active_session_id();
    let all = sessions.sessions();

    if all.is_empty() {
        println!("No chat sessions");
        return Ok(ExitCode::from(0));
    }

    for session in &all {
        let marker = if active.as_deref() == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        let user_messages = session
            .messages
            .iter()
            .filter(|m| m.sender == Sender::User)
            .count();
        println!(
            "{} {}  {} ({} messages, updated {})",
            marker,
            session.id,
            session.title,
            user_messages,
            session.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(ExitCode::from(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn analysis() -> EthicalAnalysis {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/hiring.yaml");
        let dilemma = EthicalDilemma::from_file(path).unwrap();
        let at = DateTime::parse_from_rfc3339("2025-12-20T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        dilemma_core::analyze_with_id_at(&dilemma, "an-1", at)
    }

    #[test]
    fn test_json_without_perspective_is_bare_analysis() {
        let json = analysis_json(&analysis(), None).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "an-1");
        assert!(value.get("perspective").is_none());
    }

    #[test]
    fn test_json_includes_perspective() {
        let json = analysis_json(&analysis(), Some((AiModel::GeminiPro, "Looking at this"))).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["analysis"]["dilemmaId"], "hiring");
        assert_eq!(value["perspective"]["model"], "gemini-pro");
        assert_eq!(value["perspective"]["text"], "Looking at this");
    }

    #[test]
    fn test_validate_unloadable_file_is_error() {
        let dir = TempDir::new().unwrap();

        // Missing and unparseable files both propagate to exit code 3
        assert!(validate_dilemma(dir.path().join("missing.yaml")).is_err());

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "title: [unclosed").unwrap();
        assert!(validate_dilemma(broken).is_err());
    }

    #[test]
    fn test_validate_incomplete_dilemma_is_not_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("thin.yaml");
        std::fs::write(
            &path,
            "title: Thin\nscenario: Only one option\noptions:\n  - id: a\n    title: A\n    description: a\nstakeholders: [Staff]\n",
        )
        .unwrap();

        // Validation failures report through the exit code, not an error
        assert!(validate_dilemma(path).is_ok());
    }
}
