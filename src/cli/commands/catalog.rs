//! Browsing commands: styles, effects, and effect details

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::{is_not_found, non_empty, EffectSummary, Style};
use crate::cli::commands::download_destination;
use crate::cli::output::{print_formatted, print_success, truncate};
use crate::cli::CommandContext;
use crate::styles::{effects_title, style_display_name, style_icon};

#[derive(Serialize)]
struct StylesResult {
    styles: Vec<Style>,
}

#[derive(Serialize)]
struct EffectsResult {
    style: String,
    effects: Vec<EffectSummary>,
}

#[derive(Serialize)]
struct EffectResult {
    style: String,
    id: String,
    name: String,
    description: String,
    author: String,
    has_preview: bool,
    preview_file: Option<String>,
    xml_content: String,
}

pub async fn styles(ctx: &CommandContext) -> Result<()> {
    let styles = ctx.api.styles().await.context("Failed to load styles")?;
    print_formatted(&StylesResult { styles }, ctx.format, format_styles);
    Ok(())
}

fn format_styles(r: &StylesResult) -> String {
    if r.styles.is_empty() {
        return "No styles found.".to_string();
    }

    let mut lines = vec![format!("{:<22} {:>8} {:>9}", "STYLE", "EFFECTS", "PREVIEWS")];
    lines.push("-".repeat(41));
    for style in &r.styles {
        let label = format!("{} {}", style_icon(&style.name), style_display_name(&style.name));
        lines.push(format!(
            "{:<22} {:>8} {:>9}",
            label, style.effect_count, style.preview_count
        ));
    }
    lines.join("\n")
}

pub async fn effects(ctx: &CommandContext, style: &str) -> Result<()> {
    let effects = ctx.api.effects(style).await.context("Failed to load effects")?;
    let result = EffectsResult {
        style: style.to_string(),
        effects,
    };
    print_formatted(&result, ctx.format, format_effects);
    Ok(())
}

fn format_effects(r: &EffectsResult) -> String {
    if r.effects.is_empty() {
        return format!(
            "No {} effects yet. Run `effect-browser generate {}` to create some.",
            style_display_name(&r.style),
            r.style
        );
    }

    let mut lines = vec![format!("{} ({}):\n", effects_title(&r.style), r.effects.len())];
    lines.push(format!("{:<16} {:<24} {:<8} {}", "ID", "NAME", "PREVIEW", "DESCRIPTION"));
    lines.push("-".repeat(80));
    for effect in &r.effects {
        let description = non_empty(effect.description.as_deref()).unwrap_or("No description");
        lines.push(format!(
            "{:<16} {:<24} {:<8} {}",
            truncate(&effect.id, 16),
            truncate(effect.title(), 24),
            if effect.has_preview { "yes" } else { "-" },
            truncate(description, 30)
        ));
    }
    lines.join("\n")
}

pub async fn show(ctx: &CommandContext, style: &str, effect_id: &str, xml: bool) -> Result<()> {
    let detail = match ctx.api.effect(style, effect_id).await {
        Ok(detail) => detail,
        Err(e) if is_not_found(&e) => {
            anyhow::bail!("Effect '{}' not found in style '{}'", effect_id, style)
        }
        Err(e) => return Err(e).context("Failed to load effect details"),
    };
    let has_preview = ctx.api.preview_exists(style, effect_id).await;

    let result = EffectResult {
        style: style.to_string(),
        id: effect_id.to_string(),
        name: non_empty(detail.name.as_deref()).unwrap_or(effect_id).to_string(),
        description: non_empty(detail.description.as_deref())
            .unwrap_or("No description")
            .to_string(),
        author: non_empty(detail.author.as_deref()).unwrap_or("Unknown").to_string(),
        has_preview,
        preview_file: has_preview.then(|| crate::api::ApiClient::preview_path(style, effect_id)),
        xml_content: detail.xml_content,
    };

    print_formatted(&result, ctx.format, |r| format_effect(r, xml));
    Ok(())
}

fn format_effect(r: &EffectResult, xml: bool) -> String {
    let mut lines = vec![
        r.name.clone(),
        String::new(),
        format!("Style:       {}", style_display_name(&r.style)),
        format!("Effect id:   {}", r.id),
        format!("Author:      {}", r.author),
        format!("Description: {}", r.description),
        format!(
            "Preview:     {}",
            r.preview_file.as_deref().unwrap_or("not generated")
        ),
    ];
    if xml {
        lines.push(String::new());
        lines.push(r.xml_content.clone());
    }
    lines.join("\n")
}

pub async fn download_effect(
    ctx: &CommandContext,
    style: &str,
    effect_id: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let url = ctx.api.effect_xml_url(style, effect_id)?;
    let dest = download_destination(&ctx.config.downloads, output, &format!("{effect_id}.xml"));

    let bytes = ctx
        .api
        .download(url, &dest)
        .await
        .with_context(|| format!("Failed to download effect {}/{}", style, effect_id))?;

    print_success(&format!("Saved {} ({} bytes)", dest.display(), bytes), ctx.quiet);
    Ok(())
}
