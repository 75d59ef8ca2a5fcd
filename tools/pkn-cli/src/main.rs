//! PKN CLI — Command-line interface for composing and exporting postings.
//!
//! Usage:
//!   pkn formats                  List the output formats
//!   pkn template                 Print a configuration document
//!   pkn info <CONFIG>            Summarize a configuration
//!   pkn render <CONFIG>          Render one format as HTML or a layout tree
//!   pkn export <CONFIG>          Export one format or all formats as a ZIP

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pkn_common::config::AppConfig;
use pkn_posting_model::{Format, GlobalPreset, PostType};

mod commands;

#[derive(Parser)]
#[command(
    name = "pkn",
    about = "Compose PKN social media graphics and export them in every format",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Application config file (defaults to $XDG_CONFIG_HOME/pkn/config.json)
    #[arg(long, global = true)]
    app_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the posting configuration comes from.
#[derive(Args, Debug, Clone)]
pub struct ConfigSource {
    /// Path to a posting configuration (JSON)
    pub config: Option<PathBuf>,

    /// Start from a global preset instead of a file: pkn-standard|minimal|event-strong
    #[arg(long)]
    pub preset: Option<GlobalPreset>,

    /// Switch the layout variant and apply its defaults
    #[arg(long)]
    pub post_type: Option<PostType>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the output formats with their sizes and preview scales
    Formats,

    /// Print a configuration document to start from
    Template {
        /// Preset to print instead of the defaults
        #[arg(long)]
        preset: Option<GlobalPreset>,
    },

    /// Summarize a configuration
    Info {
        #[command(flatten)]
        source: ConfigSource,
    },

    /// Render one format as a standalone HTML document
    Render {
        #[command(flatten)]
        source: ConfigSource,

        /// Format to render (1:1, 4:3, 3:4, 16:9, 9:16)
        #[arg(short, long, default_value = "1:1")]
        format: Format,

        /// Print the layout tree as JSON instead of HTML
        #[arg(long)]
        tree: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export one format as PNG or all formats as a ZIP archive
    Export {
        #[command(flatten)]
        source: ConfigSource,

        /// Export a single format
        #[arg(short, long, conflicts_with = "all")]
        format: Option<Format>,

        /// Export all formats into one archive
        #[arg(long)]
        all: bool,

        /// Output directory (defaults to the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = match &cli.app_config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = app_config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    pkn_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Formats => commands::formats::run(&app_config),
        Commands::Template { preset } => commands::template::run(preset),
        Commands::Info { source } => commands::info::run(&source, &app_config),
        Commands::Render {
            source,
            format,
            tree,
            output,
        } => commands::render::run(&source, format, tree, output, &app_config),
        Commands::Export {
            source,
            format,
            all,
            output,
        } => commands::export::run(&source, format, all, output, &app_config).await,
    }
}
