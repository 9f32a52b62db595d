//! Command-line interface for mongo-transformer
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and CLI overrides
//! - Reading documents from a file or stdin into a cursor
//! - Rendering the cursor as JSON or JSONP

pub mod completion;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::config::{Config, JsonMode, LogLevel, OutputFormat};
use crate::cursor::MemoryCursor;
use crate::error::{ConfigError, Result};
use crate::formatter::JsonEncoder;
use crate::transformer::{CursorTransformer, JsonpOptions};

/// Convert MongoDB query results to JSON or JSONP
#[derive(Parser, Debug)]
#[command(
    name = "mongo-transformer",
    version,
    about = "Convert MongoDB documents to JSON or JSONP",
    long_about = "Reads documents as MongoDB Extended JSON (one per line, or a JSON array) and
writes them as JSON or JSONP. A single document is written as an object,
anything else as an array."
)]
pub struct CliArgs {
    /// Input file; omit or use '-' for stdin
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Layout of the input documents
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = InputFormat::Lines)]
    pub input_format: InputFormat,

    /// Output format
    #[arg(short = 'f', long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// JSONP callback name (written verbatim, not escaped)
    #[arg(long, value_name = "NAME")]
    pub callback: Option<String>,

    /// BSON to JSON mapping
    #[arg(short = 'm', long, value_enum, value_name = "MODE")]
    pub mode: Option<JsonMode>,

    /// Pretty-print the JSON payload
    #[arg(long)]
    pub pretty: bool,

    /// Indentation width for pretty output
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Layout of the input documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One document per line (JSON Lines)
    Lines,

    /// A single JSON array of documents
    Array,
}

/// Subcommands for mongo-transformer
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completion {
        /// Shell type
        #[arg(value_enum, value_name = "SHELL")]
        shell: clap_complete::Shell,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration
    config: Config,
}

impl CliInterface {
    /// Parse process arguments and load configuration
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Config::load(args.config_file.as_deref())?;
        Self::from_parts(args, config)
    }

    /// Combine parsed arguments with a loaded configuration
    ///
    /// Arguments override configuration values; the result is validated.
    pub fn from_parts(args: CliArgs, mut config: Config) -> Result<Self> {
        Self::apply_args_to_config(&mut config, &args);
        config.validate()?;
        Ok(Self { args, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Whether the log level was forced on the command line
    pub fn log_level_overridden(&self) -> bool {
        self.args.verbose || self.args.very_verbose
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - true if a subcommand ran and the program should exit
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(*shell, &mut std::io::stdout())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read the input documents into a cursor
    pub async fn read_cursor(&self) -> Result<MemoryCursor> {
        let content = match self.args.input.as_deref() {
            Some(path) if path.as_os_str() != "-" => {
                debug!("Reading documents from {}", path.display());
                tokio::fs::read_to_string(path).await?
            }
            _ => {
                debug!("Reading documents from stdin");
                let mut content = String::new();
                tokio::io::stdin().read_to_string(&mut content).await?;
                content
            }
        };

        parse_input(&content, self.args.input_format)
    }

    /// Render a cursor according to the effective output settings
    pub fn render(&self, cursor: MemoryCursor) -> Result<String> {
        let output = &self.config.output;
        let mut transformer =
            CursorTransformer::with_cursor(cursor).with_encoder(JsonEncoder::from_config(output));

        match output.format {
            OutputFormat::Json => transformer.to_json(),
            OutputFormat::Jsonp => {
                let callback = output
                    .callback
                    .clone()
                    .ok_or_else(|| ConfigError::MissingField("callback".to_string()))?;
                info!("Wrapping output in JSONP callback '{}'", callback);
                transformer.to_jsonp(&JsonpOptions::new(callback))
            }
        }
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_output_args(config, args);
        Self::apply_logging_args(config, args);
    }

    /// Apply output-related CLI arguments to configuration
    fn apply_output_args(config: &mut Config, args: &CliArgs) {
        if let Some(format) = args.format {
            config.output.format = format;
        }

        if let Some(mode) = args.mode {
            config.output.mode = mode;
        }

        if args.pretty {
            config.output.pretty = true;
        }

        if let Some(indent) = args.indent {
            config.output.indent = indent;
        }

        if args.no_color {
            config.output.color = false;
        }

        if let Some(callback) = &args.callback {
            config.output.callback = Some(callback.clone());
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else {
            config.logging.level
        };
    }
}

/// Parse input text into a cursor
pub fn parse_input(content: &str, format: InputFormat) -> Result<MemoryCursor> {
    match format {
        InputFormat::Lines => MemoryCursor::from_json_lines(content.as_bytes()),
        InputFormat::Array => MemoryCursor::from_json_array(content),
    }
}
