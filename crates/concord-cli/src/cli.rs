//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use concord_domain::{StrategyChoice, SummarizerBackend, SummaryDepth};
use std::path::PathBuf;

/// Concord CLI - Score, reconcile and summarize batches of documents.
#[derive(Debug, Parser)]
#[command(name = "concord")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CONCORD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs and status only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run submission files through the pipeline
    Run(RunArgs),

    /// Check submission files without running them
    Validate(ValidateArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// List document types with their default strategy and signals
    Types,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Submission JSON files; `-` reads one from stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Override the conflict strategy of every submission
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Override the summarizer backend of every submission
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Override the summary depth of every submission
    #[arg(short, long, value_enum)]
    pub depth: Option<DepthArg>,

    /// Ollama endpoint; without one the pipeline runs offline
    #[arg(long, env = "CONCORD_OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Ollama model for classification, extraction and summaries
    #[arg(short, long)]
    pub model: Option<String>,

    /// Ollama embedding model; hashing embeddings are used without one
    #[arg(long)]
    pub embedding_model: Option<String>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Submission JSON files; `-` reads one from stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file
    Init {
        /// Pipeline preset to start from
        #[arg(short, long, value_enum, default_value = "default")]
        preset: PresetArg,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Conflict strategy argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    /// Default strategy of the plurality document type
    Auto,
    /// Confidence-weighted vote with tie flagging
    WeightedVote,
    /// Most trusted sources agreeing on one text
    MajorityVote,
    /// Highest-confidence claim always wins
    HighestCredibilityWins,
    /// Never resolve disagreements
    Conservative,
}

/// Summarizer backend argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendArg {
    /// Language-model summary (extractive without a model)
    Rag,
    /// Offline extractive summary
    Bart,
}

/// Summary depth argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DepthArg {
    /// A few sentences
    Brief,
    /// A handful of sections
    Standard,
    /// Longer sections with per-source detail
    Detailed,
    /// Research-style report
    DeepResearch,
}

/// Configuration preset argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Loose clustering, strict input, fast failure
    Aggressive,
    /// Tight clustering, permissive input, patient retries
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<StrategyArg> for StrategyChoice {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Auto => StrategyChoice::Auto,
            StrategyArg::WeightedVote => StrategyChoice::WeightedVote,
            StrategyArg::MajorityVote => StrategyChoice::MajorityVote,
            StrategyArg::HighestCredibilityWins => StrategyChoice::HighestCredibilityWins,
            StrategyArg::Conservative => StrategyChoice::Conservative,
        }
    }
}

impl From<BackendArg> for SummarizerBackend {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Rag => SummarizerBackend::Rag,
            BackendArg::Bart => SummarizerBackend::Bart,
        }
    }
}

impl From<DepthArg> for SummaryDepth {
    fn from(depth: DepthArg) -> Self {
        match depth {
            DepthArg::Brief => SummaryDepth::Brief,
            DepthArg::Standard => SummaryDepth::Standard,
            DepthArg::Detailed => SummaryDepth::Detailed,
            DepthArg::DeepResearch => SummaryDepth::DeepResearch,
        }
    }
}
