//! HTTP client for the effect generation server.
//!
//! This module provides:
//!
//! - `ApiClient`: `reqwest` wrapper bound to a server base URL
//! - Deserialized records for styles, effects, and demo videos
//! - Response bodies for the generation endpoints
//! - `ApiError`, which separates transport failures from server rejections
//!
//! URLs are always built from path segments so style names and effect ids
//! are percent-encoded instead of spliced into a string template.

use std::path::Path;
use std::time::{Duration, Instant};

use futures::StreamExt;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

/// User agent for API requests
const USER_AGENT: &str = concat!("Effect-Browser/", env!("CARGO_PKG_VERSION"));

/// Errors returned by [`ApiClient`]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Server reported failure: {0}")]
    Rejected(String),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The most specific message the server gave us, for user-facing toasts.
    pub fn server_message(&self) -> String {
        match self {
            ApiError::Rejected(msg) => msg.clone(),
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A family of effects, as listed by `/api/styles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default)]
    pub effect_count: u32,
    #[serde(default)]
    pub preview_count: u32,
}

/// One effect in a style's listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub effect_file: Option<String>,
    #[serde(default)]
    pub has_preview: bool,
    #[serde(default)]
    pub preview_file: Option<String>,
}

impl EffectSummary {
    /// Name to show on a card; the server may send an empty string.
    pub fn title(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(&self.id)
    }
}

/// Full metadata for one effect, including its XML definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub xml_content: String,
}

/// A saved demo clip from `/api/demos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demo {
    pub path: String,
    pub filename: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub effect_id: String,
    /// File size in bytes
    #[serde(default)]
    pub size: u64,
    /// Modification time in unix seconds (fractional on most servers)
    #[serde(default)]
    pub created: f64,
}

/// Response of `POST /api/generate`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub generated_count: u32,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `POST /api/generate_preview`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub preview_file: Option<String>,
    #[serde(default)]
    pub demo_file: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `POST /api/generate_batch_preview`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchPreviewResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub generated_count: u32,
    #[serde(default)]
    pub total_effects: u32,
    #[serde(default)]
    pub demos_saved_to: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Bodies of mutating endpoints carry their own success flag.
trait Outcome {
    fn succeeded(&self) -> bool;
    fn error(&self) -> Option<&str>;
}

macro_rules! impl_outcome {
    ($($ty:ty),*) => {
        $(impl Outcome for $ty {
            fn succeeded(&self) -> bool {
                self.success
            }

            fn error(&self) -> Option<&str> {
                self.error.as_deref()
            }
        })*
    };
}

impl_outcome!(GenerateResponse, PreviewResponse, BatchPreviewResponse);

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    style: &'a str,
    count: u32,
}

#[derive(Serialize)]
struct PreviewRequest<'a> {
    style: &'a str,
    effect_id: &'a str,
}

#[derive(Serialize)]
struct BatchPreviewRequest<'a> {
    style: &'a str,
}

/// Client for the effect server's JSON API and static assets
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// No timeout is applied unless one is given; a stuck request then keeps
    /// its loading indicator alive until the connection resolves.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    /// The server base URL
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint<I, S>(&self, segments: I) -> Result<Url, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of a server-relative asset such as `demos/shake_e1_demo.mp4`
    pub fn asset_url(&self, path: &str) -> Result<Url, ApiError> {
        self.endpoint(path.split('/').filter(|s| !s.is_empty()))
    }

    /// URL of an effect's XML file, used as a download target
    pub fn effect_xml_url(&self, style: &str, effect_id: &str) -> Result<Url, ApiError> {
        let file_name = format!("{effect_id}.xml");
        self.endpoint(["effect", style, file_name.as_str()])
    }

    /// Conventional location of an effect's preview clip, relative to the server root
    pub fn preview_path(style: &str, effect_id: &str) -> String {
        format!("previews/{style}/{effect_id}_preview.mp4")
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    text
                }
            });

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let body = Self::check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Outcome,
    {
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        let outcome: T = Self::decode(response).await?;
        if outcome.succeeded() {
            Ok(outcome)
        } else {
            Err(ApiError::Rejected(
                outcome.error().unwrap_or("unknown error").to_string(),
            ))
        }
    }

    /// Fetch all styles with their effect and preview counts
    pub async fn styles(&self) -> Result<Vec<Style>, ApiError> {
        let start = Instant::now();
        let styles: Vec<Style> = self.get_json(self.endpoint(["api", "styles"])?).await?;
        tracing::info!(
            "Fetched {} styles in {:.2}s",
            styles.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(styles)
    }

    /// Fetch the effects of one style
    pub async fn effects(&self, style: &str) -> Result<Vec<EffectSummary>, ApiError> {
        let start = Instant::now();
        let effects: Vec<EffectSummary> = self.get_json(self.endpoint(["api", "effects", style])?).await?;
        tracing::info!(
            "Fetched {} effects for '{}' in {:.2}s",
            effects.len(),
            style,
            start.elapsed().as_secs_f32()
        );
        Ok(effects)
    }

    /// Fetch one effect's metadata and XML
    pub async fn effect(&self, style: &str, effect_id: &str) -> Result<EffectDetail, ApiError> {
        self.get_json(self.endpoint(["api", "effect", style, effect_id])?).await
    }

    /// Probe whether the conventional preview file exists on the server.
    ///
    /// Any failure, including a network error, counts as "no preview".
    pub async fn preview_exists(&self, style: &str, effect_id: &str) -> bool {
        let url = match self.asset_url(&Self::preview_path(style, effect_id)) {
            Ok(url) => url,
            Err(_) => return false,
        };

        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Preview probe for {}/{} failed: {}", style, effect_id, e);
                false
            }
        }
    }

    /// Ask the server to generate `count` new effects for a style
    pub async fn generate(&self, style: &str, count: u32) -> Result<GenerateResponse, ApiError> {
        let url = self.endpoint(["api", "generate"])?;
        self.post_json(url, &GenerateRequest { style, count }).await
    }

    /// Ask the server to render the preview clip of one effect
    pub async fn generate_preview(
        &self,
        style: &str,
        effect_id: &str,
    ) -> Result<PreviewResponse, ApiError> {
        let url = self.endpoint(["api", "generate_preview"])?;
        self.post_json(url, &PreviewRequest { style, effect_id }).await
    }

    /// Ask the server to render previews for every effect of a style
    pub async fn generate_batch_preview(&self, style: &str) -> Result<BatchPreviewResponse, ApiError> {
        let url = self.endpoint(["api", "generate_batch_preview"])?;
        self.post_json(url, &BatchPreviewRequest { style }).await
    }

    /// Fetch the saved demo clips
    pub async fn demos(&self) -> Result<Vec<Demo>, ApiError> {
        let start = Instant::now();
        let demos: Vec<Demo> = self.get_json(self.endpoint(["api", "demos"])?).await?;
        tracing::info!(
            "Fetched {} demos in {:.2}s",
            demos.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(demos)
    }

    /// Stream a server file to `dest`, returning the number of bytes written.
    ///
    /// Writes to a `.part` sibling first and renames on success, so a failed
    /// download never leaves a truncated file under the requested name.
    pub async fn download(&self, url: Url, dest: &Path) -> Result<u64, ApiError> {
        let start = Instant::now();
        let response = Self::check(self.client.get(url).send().await?).await?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut part = dest.as_os_str().to_owned();
        part.push(".part");
        let part = std::path::PathBuf::from(part);

        let result: Result<u64, ApiError> = async {
            let mut file = tokio::fs::File::create(&part).await?;
            let mut stream = response.bytes_stream();
            let mut written: u64 = 0;

            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }

            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&part, dest).await?;
            Ok(written)
        }
        .await;

        let written = match result {
            Ok(written) => written,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                    tracing::warn!("Failed to remove {:?}: {}", part, cleanup);
                }
                return Err(e);
            }
        };

        tracing::info!(
            "Downloaded {} bytes to {:?} in {:.1}s",
            written,
            dest,
            start.elapsed().as_secs_f32()
        );
        Ok(written)
    }
}

/// `Some(s)` only when the string is present and not blank
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Whether a status code means "not found" (used by CLI output)
pub fn is_not_found(err: &ApiError) -> bool {
    matches!(err, ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND.as_u16())
}
