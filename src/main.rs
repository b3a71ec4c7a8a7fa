// Hide console window in release builds (Windows GUI app)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod app;
mod browser;
mod cli;
mod config;
mod demos;
mod state;
mod styles;
mod task;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

/// Log filter used when `RUST_LOG` is unset
fn default_filter(cli_mode: bool, verbose: bool) -> &'static str {
    match (cli_mode, verbose) {
        (false, _) => "effect_browser=debug,info",
        (true, false) => "warn",
        (true, true) => "effect_browser=debug,info",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_mode = cli.command.is_some();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| default_filter(cli_mode, cli.output.verbose).into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(command) = cli.command {
        if let Err(e) = cli::run(cli.server, cli.output, command).await {
            cli::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    tracing::info!("Starting Effect Browser");

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {}", e);
        Config::default()
    });
    let server_url = config.server_url(cli.server.as_deref());

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 760.0])
        .with_min_inner_size([720.0, 480.0])
        .with_title("Effect Browser");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Effect Browser",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::EffectBrowserApp::new(cc, config, server_url)?))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false, false), "effect_browser=debug,info");
        assert_eq!(default_filter(true, false), "warn");
        assert_eq!(default_filter(true, true), "effect_browser=debug,info");
    }

    #[test]
    fn test_cli_parses_commands() {
        let parsed = Cli::try_parse_from(["effect-browser", "--json", "effects", "shake"]).unwrap();
        assert!(parsed.output.json);
        assert!(matches!(parsed.command, Some(cli::Commands::Effects { ref style }) if style == "shake"));

        let gui = Cli::try_parse_from(["effect-browser"]).unwrap();
        assert!(gui.command.is_none());

        let batch =
            Cli::try_parse_from(["effect-browser", "batch-preview", "glitch", "--yes"]).unwrap();
        assert!(matches!(batch.command, Some(cli::Commands::BatchPreview { yes: true, .. })));
    }
}
