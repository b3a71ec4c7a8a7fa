//! Generation commands: new effects and preview renders

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::ApiError;
use crate::cli::output::{confirm, print_formatted, OutputFormat};
use crate::cli::CommandContext;
use crate::state::PendingConfirm;
use crate::styles::style_display_name;

#[derive(Serialize)]
struct GenerateResult {
    style: String,
    generated_count: u32,
    files: Vec<String>,
}

#[derive(Serialize)]
struct PreviewResult {
    style: String,
    effect_id: String,
    preview_file: Option<String>,
    demo_file: Option<String>,
}

#[derive(Serialize)]
struct BatchPreviewResult {
    style: String,
    generated_count: u32,
    total_effects: u32,
    demos_saved_to: String,
}

/// Turn a server rejection into the message the GUI would toast
fn describe(action: &str, err: ApiError) -> anyhow::Error {
    anyhow::anyhow!("Failed to {}: {}", action, err.server_message())
}

pub async fn generate(ctx: &CommandContext, style: &str, count: u32) -> Result<()> {
    if style.trim().is_empty() {
        anyhow::bail!("Choose a style");
    }
    if count == 0 {
        anyhow::bail!("Count must be at least 1");
    }

    let response = ctx
        .api
        .generate(style, count)
        .await
        .map_err(|e| describe("generate effects", e))?;

    let result = GenerateResult {
        style: style.to_string(),
        generated_count: response.generated_count,
        files: response.files,
    };
    if !ctx.quiet || ctx.format == OutputFormat::Json {
        print_formatted(&result, ctx.format, |r| {
            let mut lines = vec![format!("Generated {} effects", r.generated_count)];
            lines.extend(r.files.iter().map(|f| format!("  {}", f)));
            lines.join("\n")
        });
    }
    Ok(())
}

pub async fn preview(ctx: &CommandContext, style: &str, effect_id: &str) -> Result<()> {
    if style.is_empty() || effect_id.is_empty() {
        anyhow::bail!("Missing style or effect id");
    }

    let response = ctx
        .api
        .generate_preview(style, effect_id)
        .await
        .map_err(|e| describe("generate preview", e))?;

    let result = PreviewResult {
        style: style.to_string(),
        effect_id: effect_id.to_string(),
        preview_file: response.preview_file,
        demo_file: response.demo_file,
    };
    if !ctx.quiet || ctx.format == OutputFormat::Json {
        print_formatted(&result, ctx.format, format_preview);
    }
    Ok(())
}

fn format_preview(r: &PreviewResult) -> String {
    let mut lines = vec!["Preview generated".to_string()];
    if let Some(preview) = &r.preview_file {
        lines.push(format!("Preview: {}", preview));
    }
    if let Some(demo) = &r.demo_file {
        lines.push(format!("Demo saved to: {}", demo));
    }
    lines.join("\n")
}

pub async fn batch_preview(ctx: &CommandContext, style: &str, yes: bool) -> Result<()> {
    if !yes {
        if ctx.format == OutputFormat::Json {
            anyhow::bail!("Pass --yes to render previews in JSON mode");
        }
        let prompt = PendingConfirm::BatchPreview {
            style: style.to_string(),
        }
        .prompt();
        if !confirm(&prompt).context("Failed to read confirmation")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    tracing::info!("Rendering previews for every {} effect", style_display_name(style));
    let response = ctx
        .api
        .generate_batch_preview(style)
        .await
        .map_err(|e| describe("generate previews", e))?;

    let result = BatchPreviewResult {
        style: style.to_string(),
        generated_count: response.generated_count,
        total_effects: response.total_effects,
        demos_saved_to: response.demos_saved_to,
    };
    if !ctx.quiet || ctx.format == OutputFormat::Json {
        print_formatted(&result, ctx.format, format_batch);
    }
    Ok(())
}

fn format_batch(r: &BatchPreviewResult) -> String {
    format!(
        "Generated previews for {}/{} effects\nDemos saved to: {}",
        r.generated_count, r.total_effects, r.demos_saved_to
    )
}
