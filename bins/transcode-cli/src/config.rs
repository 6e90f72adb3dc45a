use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::error::CliError;
use crate::model::RecordName;

#[derive(Parser)]
#[command(name = "transcode-cli", about = "Copy fields between wire and domain records")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "transcode.toml", env = "TRANSCODE_CONFIG")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a JSON record and transcode it into another record type
    Convert(ConvertArgs),
    /// Print the conversion table
    Rules,
    /// Print a record's field descriptors
    Schema(SchemaArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    /// Source record type
    #[arg(long, value_enum)]
    pub from: RecordName,

    /// Destination record type
    #[arg(long, value_enum)]
    pub to: RecordName,

    /// JSON input file, `-` for stdin
    #[arg(long, env = "TRANSCODE_INPUT")]
    pub input: Option<String>,

    /// JSON file with the destination's starting values
    #[arg(long)]
    pub base: Option<String>,

    #[arg(long, value_enum, env = "TRANSCODE_OUTPUT")]
    pub output: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    #[arg(long, value_enum)]
    pub record: RecordName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Debug,
    /// Hex-encoded protobuf bytes (wire records only)
    Protobuf,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Debug => "debug",
            Self::Protobuf => "protobuf",
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub input: Option<String>,
    pub output: Option<OutputFormat>,
    pub pretty: Option<bool>,
}

pub fn load_config(path: &str) -> Result<Config, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("cannot read config {path}: {e}")))?;
    parse_config(path, &content)
}

fn parse_config(path: &str, content: &str) -> Result<Config, CliError> {
    toml::from_str(content).map_err(|e| CliError::Config(format!("bad config {path}: {e}")))
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Settings for one `convert` run: CLI/env > config file > defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effective {
    pub from: RecordName,
    pub to: RecordName,
    pub input: String,
    pub base: Option<String>,
    pub output: OutputFormat,
    pub pretty: bool,
}

impl Effective {
    pub fn new(config_path: &str, args: &ConvertArgs) -> Result<Self, CliError> {
        let cfg = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                if std::path::Path::new(config_path).exists() {
                    return Err(e);
                }
                tracing::debug!(path = config_path, "no config file, using defaults");
                Config::default()
            }
        };
        Ok(Self::merge(args, cfg))
    }

    fn merge(args: &ConvertArgs, cfg: Config) -> Self {
        Self {
            from: args.from,
            to: args.to,
            input: args.input.clone().or(cfg.input).unwrap_or_else(|| "-".into()),
            base: args.base.clone(),
            output: args.output.or(cfg.output).unwrap_or(OutputFormat::Json),
            pretty: args.pretty || cfg.pretty.unwrap_or(false),
        }
    }
}
