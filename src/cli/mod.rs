//! CLI module for the effect browser
//!
//! Every browsing and generation operation of the GUI is also available as a
//! subcommand. Running without a subcommand opens the window instead.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::{Config, SERVER_ENV_VAR};

pub use output::{print_error, OutputFormat};

/// Effect Browser - browse and generate video effects
#[derive(Parser, Debug)]
#[command(name = "effect-browser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Effect server URL (overrides the config file)
    #[arg(long, global = true, env = SERVER_ENV_VAR)]
    pub server: Option<String>,

    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Run a command instead of opening the window
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List effect styles with their effect and preview counts
    Styles,

    /// List the effects of a style
    Effects {
        /// Style name, e.g. "shake"
        style: String,
    },

    /// Show one effect's details
    Show {
        style: String,
        effect_id: String,

        /// Print the effect's XML definition
        #[arg(long)]
        xml: bool,
    },

    /// Generate new effects for a style
    Generate {
        style: String,

        /// Number of effects to generate (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },

    /// Render the preview clip of one effect
    Preview { style: String, effect_id: String },

    /// Render previews for every effect of a style
    BatchPreview {
        style: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List saved demo clips
    Demos {
        /// Only show demos whose filename, style, or effect id contains this
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Save an effect's XML file
    DownloadEffect {
        style: String,
        effect_id: String,

        /// Destination file (defaults to <effect_id>.xml in the download folder)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Save a demo clip
    DownloadDemo {
        /// Server path of the demo, as listed by `demos`
        path: String,

        /// Destination file (defaults to the demo's filename in the download folder)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// What every server command needs
pub struct CommandContext {
    pub api: ApiClient,
    pub config: Config,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Run the CLI with parsed arguments
pub async fn run(server: Option<String>, output: OutputOptions, command: Commands) -> Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    if let Commands::Config { command } = command {
        return commands::config::run(command, format, quiet).await;
    }

    let config = Config::load()?;
    let url = config.server_url(server.as_deref());
    let api = ApiClient::new(&url, config.server.timeout())?;
    tracing::debug!("Using server {}", api.base_url());

    let ctx = CommandContext {
        api,
        config,
        format,
        quiet,
    };
    dispatch(&ctx, command).await
}

async fn dispatch(ctx: &CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Styles => commands::catalog::styles(ctx).await,
        Commands::Effects { style } => commands::catalog::effects(ctx, &style).await,
        Commands::Show {
            style,
            effect_id,
            xml,
        } => commands::catalog::show(ctx, &style, &effect_id, xml).await,
        Commands::Generate { style, count } => {
            let count = count.unwrap_or(ctx.config.ui.default_generate_count);
            commands::generate::generate(ctx, &style, count).await
        }
        Commands::Preview { style, effect_id } => {
            commands::generate::preview(ctx, &style, &effect_id).await
        }
        Commands::BatchPreview { style, yes } => {
            commands::generate::batch_preview(ctx, &style, yes).await
        }
        Commands::Demos { filter } => commands::demos::list(ctx, filter.as_deref()).await,
        Commands::DownloadEffect {
            style,
            effect_id,
            output,
        } => commands::catalog::download_effect(ctx, &style, &effect_id, output).await,
        Commands::DownloadDemo { path, output } => {
            commands::demos::download(ctx, &path, output).await
        }
        Commands::Config { command } => commands::config::run(command, ctx.format, ctx.quiet).await,
    }
}
