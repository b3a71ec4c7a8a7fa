//! Demo clip commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::Demo;
use crate::cli::commands::download_destination;
use crate::cli::output::{print_formatted, print_success, truncate};
use crate::cli::CommandContext;
use crate::demos::{filter_demos, format_created, format_demo_size};

#[derive(Serialize)]
struct DemoListResult<'a> {
    demos: Vec<&'a Demo>,
    shown: usize,
    total: usize,
}

pub async fn list(ctx: &CommandContext, filter: Option<&str>) -> Result<()> {
    let demos = ctx.api.demos().await.context("Failed to load demos")?;
    let visible = filter_demos(&demos, filter.unwrap_or_default());

    let result = DemoListResult {
        shown: visible.len(),
        total: demos.len(),
        demos: visible,
    };
    print_formatted(&result, ctx.format, format_demos);
    Ok(())
}

fn format_demos(r: &DemoListResult) -> String {
    if r.demos.is_empty() {
        return "No demos found.".to_string();
    }

    let mut lines = vec![format!("Demos ({} of {}):\n", r.shown, r.total)];
    lines.push(format!(
        "{:<36} {:<12} {:<12} {:>10} {}",
        "FILENAME", "STYLE", "EFFECT", "SIZE", "CREATED"
    ));
    lines.push("-".repeat(94));
    for demo in &r.demos {
        lines.push(format!(
            "{:<36} {:<12} {:<12} {:>10} {}",
            truncate(&demo.filename, 36),
            truncate(&demo.style, 12),
            truncate(&demo.effect_id, 12),
            format_demo_size(demo.size),
            format_created(demo.created)
        ));
    }
    lines.join("\n")
}

pub async fn download(ctx: &CommandContext, path: &str, output: Option<PathBuf>) -> Result<()> {
    let file_name = path
        .rsplit('/')
        .find(|s| !s.is_empty())
        .context("Demo path has no file name")?;
    let url = ctx.api.asset_url(path)?;
    let dest = download_destination(&ctx.config.downloads, output, file_name);

    let bytes = ctx
        .api
        .download(url, &dest)
        .await
        .with_context(|| format!("Failed to download {}", path))?;

    print_success(
        &format!("Saved {} ({})", dest.display(), format_demo_size(bytes)),
        ctx.quiet,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::cli::OutputFormat;
    use crate::config::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn demo(filename: &str, style: &str) -> Demo {
        Demo {
            path: format!("demos/{filename}"),
            filename: filename.into(),
            style: style.into(),
            effect_id: "e1".into(),
            size: 2 * 1024 * 1024,
            created: 1_700_000_000.0,
        }
    }

    #[test]
    fn test_format_demos() {
        let demos = [demo("Shake_01.mp4", "shake"), demo("Zoom_01.mp4", "zoom")];
        let result = DemoListResult {
            demos: demos.iter().collect(),
            shown: 2,
            total: 2,
        };
        let text = format_demos(&result);
        assert!(text.contains("Demos (2 of 2)"));
        assert!(text.contains("2.00 MB"));

        let empty = DemoListResult {
            demos: vec![],
            shown: 0,
            total: 2,
        };
        assert_eq!(format_demos(&empty), "No demos found.");
    }

    #[tokio::test]
    async fn test_download_demo_uses_file_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/demos/shake/Shake_01.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 32]))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.downloads.directory = Some(dir.path().to_path_buf());
        let ctx = CommandContext {
            api: ApiClient::new(&server.uri(), None).unwrap(),
            config,
            format: OutputFormat::Text,
            quiet: true,
        };

        download(&ctx, "demos/shake/Shake_01.mp4", None).await.unwrap();
        assert_eq!(
            std::fs::metadata(dir.path().join("Shake_01.mp4")).unwrap().len(),
            32
        );
    }
}
