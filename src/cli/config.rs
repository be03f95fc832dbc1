use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "blueprint-assembly",
    version,
    about = "Assemble extracted source facts into a test blueprint and bounded chunks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: blueprint-assembly.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a facts file into blueprint.json and chunk files
    Assemble {
        /// Path to the extracted facts JSON file
        #[arg(long)]
        facts: String,

        /// Output directory for blueprint.json and chunks/
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Path for the JSONL pipeline trace (disabled when omitted)
        #[arg(long)]
        trace: Option<String>,
    },

    /// Re-chunk an existing blueprint.json
    Chunk {
        /// Path to blueprint.json
        #[arg(long)]
        blueprint: String,

        /// Output directory for chunk files
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Print an audit of a blueprint and its chunks
    Inspect {
        /// Path to blueprint.json
        #[arg(long)]
        blueprint: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `blueprint-assembly.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Pretty-print persisted JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub file: Option<String>,
}

// Serde default helpers
fn default_output_dir() -> String {
    "blueprint-output".to_string()
}
fn default_true() -> bool {
    true
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("blueprint-assembly.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
