use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jurist")]
#[command(version)]
#[command(about = "Ask questions about a country's constitution, answered by a language model", long_about = None)]
pub struct Cli {
    /// Jurisdiction to start with (defaults to the first configured one)
    #[arg(short, long, env = "JURIST_JURISDICTION")]
    pub jurisdiction: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing the constitution text files
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Model to ask (overrides responder.model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Non-interactive prompt to execute
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "prompt")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration and the data directory
    Init,
    /// List supported jurisdictions
    List,
    /// Start a chat session (default)
    Chat,
    /// Show version information
    Version,
    /// Check constitution files and the model endpoint
    Status,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}
