//! Browsing controller
//!
//! `Browser` owns everything the client knows about the server: the style
//! list, the effect grid, the open effect, the demo cache, and the requests in
//! flight. UI code never mutates this state directly; it reads it to draw and
//! sends [`BrowserAction`]s back. Network calls run as tokio tasks and are
//! applied in [`Browser::poll_tasks`], called once per frame.
//!
//! Each list or detail slot holds at most one request. A newer load replaces
//! (and aborts) the older one, so a slow response for a style the user has
//! already left is dropped instead of overwriting the current view.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::api::{
    ApiClient, ApiError, BatchPreviewResponse, Demo, EffectDetail, EffectSummary,
    GenerateResponse, PreviewResponse, Style,
};
use crate::demos::filter_demos;
use crate::state::{
    EffectKey, EffectsView, LoadingOverlay, OpenEffect, PendingConfirm, PlatformRequest,
    PreviewState, Session, Toasts,
};
use crate::styles::{effects_title, style_display_name};
use crate::task::{poll_all, poll_slot, PollResult, TrackedTask};

/// Everything the UI can ask the controller to do
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserAction {
    LoadStyles,
    SelectStyle(String),
    RefreshAll,
    GenerateEffects { style: String, count: u32 },
    /// `None` targets the effect open in the detail window
    GenerateSinglePreview(Option<EffectKey>),
    RequestBatchPreview,
    ShowDetails(EffectKey),
    CloseDetails,
    DownloadEffect,
    CopyXml,
    PlayPreview(String),
    ShowDemos,
    CloseDemos,
    RefreshDemos,
    SetDemoFilter(String),
    PlayDemo(String),
    DownloadDemo { path: String, filename: String },
    RequestDeleteDemo { path: String, filename: String },
    DownloadAllDemos,
    Confirm,
    CancelConfirm,
    DismissToast(u64),
    SaveTo { url: String, dest: PathBuf },
}

struct StylesJob {
    announce: bool,
    result: Result<Vec<Style>, ApiError>,
}

struct EffectsJob {
    style: String,
    result: Result<Vec<EffectSummary>, ApiError>,
}

struct DetailJob {
    key: EffectKey,
    result: Result<(EffectDetail, bool), ApiError>,
}

struct DemosJob {
    open_gallery: bool,
    announce: bool,
    result: Result<Vec<Demo>, ApiError>,
}

struct GenerateJob {
    style: String,
    result: Result<GenerateResponse, ApiError>,
}

struct PreviewJob {
    key: EffectKey,
    result: Result<PreviewResponse, ApiError>,
}

struct BatchJob {
    style: String,
    result: Result<BatchPreviewResponse, ApiError>,
}

struct DownloadJob {
    dest: PathBuf,
    result: Result<u64, ApiError>,
}

/// Client-side controller for one browsing session
pub struct Browser {
    api: ApiClient,
    pub session: Session,
    pub styles: Vec<Style>,
    pub effects: EffectsView,
    pub effects_title: String,
    pub detail_open: bool,
    pub demos_open: bool,
    pub confirm: Option<PendingConfirm>,
    pub overlay: LoadingOverlay,
    pub toasts: Toasts,
    requests: Vec<PlatformRequest>,

    styles_task: Option<TrackedTask<StylesJob>>,
    effects_task: Option<TrackedTask<EffectsJob>>,
    detail_task: Option<TrackedTask<DetailJob>>,
    demos_task: Option<TrackedTask<DemosJob>>,
    generate_tasks: Vec<TrackedTask<GenerateJob>>,
    preview_tasks: Vec<TrackedTask<PreviewJob>>,
    batch_tasks: Vec<TrackedTask<BatchJob>>,
    download_tasks: Vec<TrackedTask<DownloadJob>>,

    /// Styles with a generation request in flight
    generating: HashSet<String>,
    /// Effects with a preview render in flight
    previewing: HashSet<EffectKey>,
    /// Styles with a batch preview render in flight
    batching: HashSet<String>,
}

impl Browser {
    pub fn new(api: ApiClient, toast_lifetime: Duration) -> Self {
        Self {
            api,
            session: Session::default(),
            styles: Vec::new(),
            effects: EffectsView::default(),
            effects_title: "Select a style".to_string(),
            detail_open: false,
            demos_open: false,
            confirm: None,
            overlay: LoadingOverlay::default(),
            toasts: Toasts::new(toast_lifetime),
            requests: Vec::new(),
            styles_task: None,
            effects_task: None,
            detail_task: None,
            demos_task: None,
            generate_tasks: Vec::new(),
            preview_tasks: Vec::new(),
            batch_tasks: Vec::new(),
            download_tasks: Vec::new(),
            generating: HashSet::new(),
            previewing: HashSet::new(),
            batching: HashSet::new(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Point the controller at another server, dropping everything from the old one
    pub fn reconnect(&mut self, api: ApiClient) {
        tracing::info!("Switching server to {}", api.base_url());
        let toasts = std::mem::take(&mut self.toasts);
        *self = Self::new(api, Duration::from_secs(3));
        self.toasts = toasts;
        self.load_styles();
    }

    /// Route a UI action to its handler
    pub fn dispatch(&mut self, action: BrowserAction) {
        match action {
            BrowserAction::LoadStyles => self.load_styles(),
            BrowserAction::SelectStyle(name) => self.select_style(&name),
            BrowserAction::RefreshAll => self.refresh_all(),
            BrowserAction::GenerateEffects { style, count } => self.generate_effects(&style, count),
            BrowserAction::GenerateSinglePreview(target) => self.generate_single_preview(target),
            BrowserAction::RequestBatchPreview => self.request_batch_preview(),
            BrowserAction::ShowDetails(key) => self.show_effect_details(key),
            BrowserAction::CloseDetails => self.detail_open = false,
            BrowserAction::DownloadEffect => self.download_effect(),
            BrowserAction::CopyXml => self.copy_xml(),
            BrowserAction::PlayPreview(path) => self.open_asset(&path),
            BrowserAction::ShowDemos => self.show_demos(),
            BrowserAction::CloseDemos => self.demos_open = false,
            BrowserAction::RefreshDemos => self.refresh_demos(),
            BrowserAction::SetDemoFilter(term) => self.session.demo_filter = term,
            BrowserAction::PlayDemo(path) => self.open_asset(&path),
            BrowserAction::DownloadDemo { path, filename } => self.download_demo(&path, &filename),
            BrowserAction::RequestDeleteDemo { path, filename } => {
                self.confirm = Some(PendingConfirm::DeleteDemo { path, filename });
            }
            BrowserAction::DownloadAllDemos => self.download_all_demos(),
            BrowserAction::Confirm => self.confirm(),
            BrowserAction::CancelConfirm => self.confirm = None,
            BrowserAction::DismissToast(id) => self.toasts.dismiss(id),
            BrowserAction::SaveTo { url, dest } => self.start_download(url, dest),
        }
    }

    /// Requests for the UI layer, emptied on each call
    pub fn take_requests(&mut self) -> Vec<PlatformRequest> {
        std::mem::take(&mut self.requests)
    }

    // ------------------------------------------------------------------
    // Style browser
    // ------------------------------------------------------------------

    /// Fetch the style list, replacing the current one when it arrives
    pub fn load_styles(&mut self) {
        self.spawn_styles(false);
    }

    fn spawn_styles(&mut self, announce: bool) {
        let api = self.api.clone();
        self.styles_task = Some(TrackedTask::spawn(
            async move {
                StylesJob {
                    announce,
                    result: api.styles().await,
                }
            },
            None,
        ));
    }

    /// Make `name` the current style and load its effects.
    ///
    /// Selecting the style that is already current fetches again.
    pub fn select_style(&mut self, name: &str) {
        self.session.current_style = Some(name.to_string());
        self.effects_title = effects_title(name);
        self.load_effects(name);
    }

    pub fn is_active_style(&self, name: &str) -> bool {
        self.session.is_current_style(name)
    }

    /// Reload styles and the current grid
    pub fn refresh_all(&mut self) {
        self.spawn_styles(true);
        if let Some(style) = self.session.current_style.clone() {
            self.load_effects(&style);
        }
    }

    // ------------------------------------------------------------------
    // Effect browser
    // ------------------------------------------------------------------

    /// Fetch the effects of `style` into the grid
    pub fn load_effects(&mut self, style: &str) {
        let api = self.api.clone();
        let style = style.to_string();
        let guard = self.overlay.begin("Loading effects...");

        self.effects_task = Some(TrackedTask::spawn(
            async move {
                let result = api.effects(&style).await;
                EffectsJob { style, result }
            },
            Some(guard),
        ));
    }

    /// Ask the server to generate `count` effects for `style`
    pub fn generate_effects(&mut self, style: &str, count: u32) {
        if style.is_empty() {
            self.toasts.warning("Choose a style");
            return;
        }
        if !self.generating.insert(style.to_string()) {
            self.toasts.warning(format!(
                "Already generating {} effects",
                style_display_name(style)
            ));
            return;
        }

        let api = self.api.clone();
        let style = style.to_string();
        let guard = self.overlay.begin("Generating effects...");
        tracing::info!("Requesting {} effects for '{}'", count, style);

        self.generate_tasks.push(TrackedTask::spawn(
            async move {
                let result = api.generate(&style, count).await;
                GenerateJob { style, result }
            },
            Some(guard),
        ));
    }

    /// Render the preview clip of one effect.
    ///
    /// With no target, the effect open in the detail window is used.
    pub fn generate_single_preview(&mut self, target: Option<EffectKey>) {
        let key = match target.or_else(|| self.session.current_effect.as_ref().map(|o| o.key.clone())) {
            Some(key) => key,
            None => {
                self.toasts.error("Missing style or effect id");
                return;
            }
        };

        if !self.previewing.insert(key.clone()) {
            self.toasts.warning(format!("Already rendering a preview for {}", key.effect_id));
            return;
        }

        let api = self.api.clone();
        let guard = self.overlay.begin("Generating preview video...");
        tracing::info!("Requesting preview for {}/{}", key.style, key.effect_id);

        self.preview_tasks.push(TrackedTask::spawn(
            async move {
                let result = api.generate_preview(&key.style, &key.effect_id).await;
                PreviewJob { key, result }
            },
            Some(guard),
        ));
    }

    pub fn is_generating_preview(&self, key: &EffectKey) -> bool {
        self.previewing.contains(key)
    }

    pub fn is_generating_effects(&self, style: &str) -> bool {
        self.generating.contains(style)
    }

    /// Ask for confirmation before rendering every preview of the current style
    pub fn request_batch_preview(&mut self) {
        match &self.session.current_style {
            Some(style) => {
                self.confirm = Some(PendingConfirm::BatchPreview { style: style.clone() });
            }
            None => self.toasts.warning("Select a style first"),
        }
    }

    fn start_batch_preview(&mut self, style: String) {
        if !self.batching.insert(style.clone()) {
            self.toasts.warning(format!(
                "Already generating previews for {}",
                style_display_name(&style)
            ));
            return;
        }

        let api = self.api.clone();
        let guard = self.overlay.begin("Generating previews...");
        tracing::info!("Requesting batch previews for '{}'", style);

        self.batch_tasks.push(TrackedTask::spawn(
            async move {
                let result = api.generate_batch_preview(&style).await;
                BatchJob { style, result }
            },
            Some(guard),
        ));
    }

    /// Run the action waiting for confirmation
    pub fn confirm(&mut self) {
        match self.confirm.take() {
            Some(PendingConfirm::BatchPreview { style }) => self.start_batch_preview(style),
            Some(PendingConfirm::DeleteDemo { path, .. }) => {
                // The server has no delete endpoint yet
                tracing::info!("Delete requested for {}, not supported by server", path);
                self.toasts.info("Deleting demos is not supported by the server yet");
            }
            None => {}
        }
    }

    // ------------------------------------------------------------------
    // Effect detail panel
    // ------------------------------------------------------------------

    /// Fetch an effect's details and open the detail window once they arrive
    pub fn show_effect_details(&mut self, key: EffectKey) {
        let api = self.api.clone();
        let guard = self.overlay.begin("Loading effect details...");

        self.detail_task = Some(TrackedTask::spawn(
            async move {
                let result = match api.effect(&key.style, &key.effect_id).await {
                    Ok(detail) => {
                        let has_preview = api.preview_exists(&key.style, &key.effect_id).await;
                        Ok((detail, has_preview))
                    }
                    Err(e) => Err(e),
                };
                DetailJob { key, result }
            },
            Some(guard),
        ));
    }

    /// Save the open effect's XML file
    pub fn download_effect(&mut self) {
        let Some(open) = &self.session.current_effect else {
            self.toasts.warning("No effect selected");
            return;
        };

        match self.api.effect_xml_url(&open.key.style, &open.key.effect_id) {
            Ok(url) => {
                let file_name = format!("{}.xml", open.key.effect_id);
                self.requests.push(PlatformRequest::SaveFile {
                    url: url.to_string(),
                    file_name,
                });
            }
            Err(e) => {
                tracing::error!("Cannot build effect download URL: {}", e);
                self.toasts.error("Failed to download effect");
            }
        }
    }

    /// Copy the open effect's XML to the clipboard
    pub fn copy_xml(&mut self) {
        let Some(open) = &self.session.current_effect else {
            self.toasts.warning("No effect selected");
            return;
        };

        self.requests.push(PlatformRequest::CopyText(open.xml().to_string()));
        self.toasts.success("XML copied to clipboard");
    }

    fn open_asset(&mut self, path: &str) {
        match self.api.asset_url(path) {
            Ok(url) => self.requests.push(PlatformRequest::OpenUrl(url.to_string())),
            Err(e) => {
                tracing::error!("Cannot build URL for {}: {}", path, e);
                self.toasts.error("Failed to open video");
            }
        }
    }

    // ------------------------------------------------------------------
    // Demo gallery
    // ------------------------------------------------------------------

    /// Load the demo list and open the gallery
    pub fn show_demos(&mut self) {
        self.spawn_demos(true, false);
    }

    /// Reload the demo list in place
    pub fn refresh_demos(&mut self) {
        self.spawn_demos(false, true);
    }

    fn spawn_demos(&mut self, open_gallery: bool, announce: bool) {
        let api = self.api.clone();
        let guard = open_gallery.then(|| self.overlay.begin("Loading demos..."));

        self.demos_task = Some(TrackedTask::spawn(
            async move {
                DemosJob {
                    open_gallery,
                    announce,
                    result: api.demos().await,
                }
            },
            guard,
        ));
    }

    /// Cached demos matching the current search term
    pub fn visible_demos(&self) -> Vec<&Demo> {
        filter_demos(&self.session.all_demos, &self.session.demo_filter)
    }

    fn download_demo(&mut self, path: &str, filename: &str) {
        match self.api.asset_url(path) {
            Ok(url) => self.requests.push(PlatformRequest::SaveFile {
                url: url.to_string(),
                file_name: filename.to_string(),
            }),
            Err(e) => {
                tracing::error!("Cannot build URL for {}: {}", path, e);
                self.toasts.error("Failed to download demo");
            }
        }
    }

    fn download_all_demos(&mut self) {
        // No bulk archive endpoint on the server
        self.toasts.info("Bulk demo download is not supported by the server yet");
    }

    /// Download `url` to `dest` in the background
    pub fn start_download(&mut self, url: String, dest: PathBuf) {
        let url = match reqwest::Url::parse(&url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Invalid download URL {}: {}", url, e);
                self.toasts.error("Download failed: invalid URL");
                return;
            }
        };

        let api = self.api.clone();
        let name = dest
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let guard = self.overlay.begin(format!("Downloading {}...", name));

        self.download_tasks.push(TrackedTask::spawn(
            async move {
                let result = api.download(url, &dest).await;
                DownloadJob { dest, result }
            },
            Some(guard),
        ));
    }

    // ------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------

    /// Whether any request is still in flight
    pub fn has_pending(&self) -> bool {
        fn running<T>(slot: &Option<TrackedTask<T>>) -> bool {
            slot.as_ref().is_some_and(TrackedTask::is_running)
        }
        fn any_running<T>(tasks: &[TrackedTask<T>]) -> bool {
            tasks.iter().any(TrackedTask::is_running)
        }

        running(&self.styles_task)
            || running(&self.effects_task)
            || running(&self.detail_task)
            || running(&self.demos_task)
            || any_running(&self.generate_tasks)
            || any_running(&self.preview_tasks)
            || any_running(&self.batch_tasks)
            || any_running(&self.download_tasks)
    }

    /// Poll tasks and expire toasts; keeps egui repainting while anything is live
    pub fn poll(&mut self, ctx: &egui::Context) {
        let pending = self.poll_tasks();
        self.toasts.prune(Instant::now());

        if pending {
            ctx.request_repaint();
        } else if !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    /// Apply every finished request. Returns whether requests remain in flight.
    pub fn poll_tasks(&mut self) -> bool {
        match poll_slot(&mut self.styles_task) {
            PollResult::Complete(Ok(job)) => self.finish_styles(job),
            PollResult::Complete(Err(e)) => {
                tracing::error!("Styles task panicked: {}", e);
                self.toasts.error("Failed to load styles");
            }
            PollResult::Pending | PollResult::NoTask => {}
        }

        match poll_slot(&mut self.effects_task) {
            PollResult::Complete(Ok(job)) => self.finish_effects(job),
            PollResult::Complete(Err(e)) => {
                tracing::error!("Effects task panicked: {}", e);
                self.toasts.error("Failed to load effects");
            }
            PollResult::Pending | PollResult::NoTask => {}
        }

        match poll_slot(&mut self.detail_task) {
            PollResult::Complete(Ok(job)) => self.finish_detail(job),
            PollResult::Complete(Err(e)) => {
                tracing::error!("Effect detail task panicked: {}", e);
                self.toasts.error("Failed to load effect details");
            }
            PollResult::Pending | PollResult::NoTask => {}
        }

        match poll_slot(&mut self.demos_task) {
            PollResult::Complete(Ok(job)) => self.finish_demos(job),
            PollResult::Complete(Err(e)) => {
                tracing::error!("Demos task panicked: {}", e);
                self.toasts.error("Failed to load demos");
            }
            PollResult::Pending | PollResult::NoTask => {}
        }

        let mut pending = false;

        for result in poll_all(&mut self.generate_tasks, &mut pending) {
            match result {
                Ok(job) => self.finish_generate(job),
                Err(e) => {
                    tracing::error!("Generate task panicked: {}", e);
                    self.generating.clear();
                    self.toasts.error("Failed to generate effects");
                }
            }
        }

        for result in poll_all(&mut self.preview_tasks, &mut pending) {
            match result {
                Ok(job) => self.finish_preview(job),
                Err(e) => {
                    tracing::error!("Preview task panicked: {}", e);
                    self.previewing.clear();
                    self.toasts.error("Failed to generate preview");
                }
            }
        }

        for result in poll_all(&mut self.batch_tasks, &mut pending) {
            match result {
                Ok(job) => self.finish_batch(job),
                Err(e) => {
                    tracing::error!("Batch preview task panicked: {}", e);
                    self.batching.clear();
                    self.toasts.error("Failed to generate previews");
                }
            }
        }

        for result in poll_all(&mut self.download_tasks, &mut pending) {
            match result {
                Ok(job) => self.finish_download(job),
                Err(e) => {
                    tracing::error!("Download task panicked: {}", e);
                    self.toasts.error("Download failed");
                }
            }
        }

        // Completion handlers may have started follow-up requests
        self.has_pending()
    }

    fn finish_styles(&mut self, job: StylesJob) {
        match job.result {
            Ok(styles) => {
                self.styles = styles;
                if job.announce {
                    self.toasts.success("Data refreshed");
                }
            }
            Err(e) => {
                tracing::error!("Failed to load styles: {}", e);
                self.styles.clear();
                self.toasts.error("Failed to load styles");
            }
        }
    }

    fn finish_effects(&mut self, job: EffectsJob) {
        match job.result {
            Ok(effects) => {
                self.effects = EffectsView::from_effects(job.style, effects);
            }
            Err(e) => {
                tracing::error!("Failed to load effects for '{}': {}", job.style, e);
                self.toasts.error("Failed to load effects");
            }
        }
    }

    fn finish_detail(&mut self, job: DetailJob) {
        match job.result {
            Ok((detail, has_preview)) => {
                let preview = if has_preview {
                    PreviewState::Available(ApiClient::preview_path(&job.key.style, &job.key.effect_id))
                } else {
                    PreviewState::Missing
                };
                self.session.current_effect = Some(OpenEffect {
                    key: job.key,
                    detail,
                    preview,
                });
                self.detail_open = true;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load effect {}/{}: {}",
                    job.key.style,
                    job.key.effect_id,
                    e
                );
                self.toasts.error("Failed to load effect details");
            }
        }
    }

    fn finish_demos(&mut self, job: DemosJob) {
        match job.result {
            Ok(demos) => {
                self.session.all_demos = demos;
                if job.announce {
                    self.toasts.success("Demo list refreshed");
                }
            }
            Err(e) => {
                tracing::error!("Failed to load demos: {}", e);
                self.toasts.error("Failed to load demos");
            }
        }

        if job.open_gallery {
            self.demos_open = true;
        }
    }

    fn finish_generate(&mut self, job: GenerateJob) {
        self.generating.remove(&job.style);

        match job.result {
            Ok(response) => {
                tracing::info!(
                    "Generated {} effects for '{}'",
                    response.generated_count,
                    job.style
                );
                self.toasts
                    .success(format!("Generated {} effects", response.generated_count));

                self.load_styles();
                if self.session.is_current_style(&job.style) {
                    self.load_effects(&job.style);
                }
            }
            Err(e) => {
                tracing::error!("Failed to generate effects for '{}': {}", job.style, e);
                self.toasts
                    .error(format!("Failed to generate effects: {}", e.server_message()));
            }
        }
    }

    fn finish_preview(&mut self, job: PreviewJob) {
        self.previewing.remove(&job.key);

        match job.result {
            Ok(response) => {
                let mut message = "Preview generated".to_string();
                if let Some(demo) = &response.demo_file {
                    message.push_str(&format!("\nDemo saved to: {}", demo));
                }
                self.toasts.success(message);

                if self.session.is_open(&job.key) {
                    if let Some(open) = self.session.current_effect.as_mut() {
                        let path = response.preview_file.clone().unwrap_or_else(|| {
                            ApiClient::preview_path(&job.key.style, &job.key.effect_id)
                        });
                        open.preview = PreviewState::Available(path);
                    }
                }

                if self.session.is_current_style(&job.key.style) {
                    self.load_effects(&job.key.style);
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to generate preview for {}/{}: {}",
                    job.key.style,
                    job.key.effect_id,
                    e
                );
                self.toasts
                    .error(format!("Failed to generate preview: {}", e.server_message()));
            }
        }
    }

    fn finish_batch(&mut self, job: BatchJob) {
        self.batching.remove(&job.style);

        match job.result {
            Ok(response) => {
                tracing::info!(
                    "Batch preview for '{}': {}/{}",
                    job.style,
                    response.generated_count,
                    response.total_effects
                );
                self.toasts.success(format!(
                    "Generated previews for {}/{} effects\nDemos saved to: {}",
                    response.generated_count, response.total_effects, response.demos_saved_to
                ));

                if let Some(style) = self.session.current_style.clone() {
                    self.load_effects(&style);
                }
            }
            Err(e) => {
                tracing::error!("Failed to generate previews for '{}': {}", job.style, e);
                self.toasts
                    .error(format!("Failed to generate previews: {}", e.server_message()));
            }
        }
    }

    fn finish_download(&mut self, job: DownloadJob) {
        match job.result {
            Ok(_) => {
                self.toasts.success(format!("Saved to {}", job.dest.display()));
            }
            Err(e) => {
                tracing::error!("Download to {:?} failed: {}", job.dest, e);
                self.toasts.error(format!("Download failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToastKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn browser(server: &MockServer) -> Browser {
        let api = ApiClient::new(&server.uri(), None).unwrap();
        Browser::new(api, Duration::from_secs(3))
    }

    async fn settle(browser: &mut Browser) {
        for _ in 0..400 {
            if !browser.poll_tasks() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("requests did not settle");
    }

    fn last_toast(browser: &Browser) -> (ToastKind, String) {
        let toast = browser.toasts.last().expect("a toast");
        (toast.kind, toast.message.clone())
    }

    fn open_effect(style: &str, id: &str) -> OpenEffect {
        OpenEffect {
            key: EffectKey::new(style, id),
            detail: EffectDetail {
                xml_content: format!("<effect id=\"{id}\"/>"),
                ..Default::default()
            },
            preview: PreviewState::Missing,
        }
    }

    fn effect_json(id: &str, has_preview: bool) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("Effect {id}"),
            "description": "",
            "has_preview": has_preview,
            "preview_file": if has_preview { json!(format!("previews/shake/{id}_preview.mp4")) } else { json!(null) }
        })
    }

    #[tokio::test]
    async fn test_select_style_with_no_effects_shows_call_to_action() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/shake"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.dispatch(BrowserAction::SelectStyle("shake".into()));
        assert!(browser.overlay.is_visible());
        settle(&mut browser).await;

        assert_eq!(browser.effects, EffectsView::Empty { style: "shake".into() });
        assert!(browser.effects.cards().is_empty());
        assert!(browser.is_active_style("shake"));
        assert!(!browser.is_active_style("zoom"));
        assert_eq!(browser.effects_title, "〰 Shake effects");
        assert!(!browser.overlay.is_visible());
    }

    #[tokio::test]
    async fn test_load_effects_renders_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/shake"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([effect_json("e1", true), effect_json("e2", false)])),
            )
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.select_style("shake");
        settle(&mut browser).await;

        let cards = browser.effects.cards();
        assert_eq!(cards.len(), 2);
        assert!(cards[0].has_preview);
        assert_eq!(cards[1].title(), "Effect e2");
    }

    #[tokio::test]
    async fn test_load_effects_failure_keeps_previous_grid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/zoom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        let previous = EffectsView::from_effects(
            "shake".into(),
            vec![serde_json::from_value(effect_json("e1", false)).unwrap()],
        );
        browser.effects = previous.clone();

        browser.select_style("zoom");
        settle(&mut browser).await;

        assert_eq!(browser.effects, previous);
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Error, "Failed to load effects".to_string())
        );
        assert!(!browser.overlay.is_visible());
    }

    #[tokio::test]
    async fn test_stale_effects_response_is_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/shake"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([effect_json("slow", false)]))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/effects/zoom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.select_style("shake");
        browser.select_style("zoom");
        settle(&mut browser).await;
        tokio::time::sleep(Duration::from_millis(400)).await;
        browser.poll_tasks();

        assert_eq!(browser.effects, EffectsView::Empty { style: "zoom".into() });
        assert_eq!(browser.overlay.active_count(), 0);
    }

    #[tokio::test]
    async fn test_load_styles_failure_clears_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/styles"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.styles = vec![Style {
            name: "old".into(),
            effect_count: 1,
            preview_count: 0,
        }];
        browser.load_styles();
        settle(&mut browser).await;

        assert!(browser.styles.is_empty());
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Error, "Failed to load styles".to_string())
        );
    }

    #[tokio::test]
    async fn test_generate_for_current_style_reloads_styles_and_grid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/zoom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({"style": "zoom", "count": 5})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "generated_count": 5})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/styles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "zoom", "effect_count": 5, "preview_count": 0}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.select_style("zoom");
        settle(&mut browser).await;

        browser.dispatch(BrowserAction::GenerateEffects {
            style: "zoom".into(),
            count: 5,
        });
        settle(&mut browser).await;

        assert_eq!(browser.styles.len(), 1);
        assert_eq!(browser.styles[0].effect_count, 5);
        assert!(browser
            .toasts
            .iter()
            .any(|t| t.kind == ToastKind::Success && t.message == "Generated 5 effects"));
        assert!(!browser.is_generating_effects("zoom"));
    }

    #[tokio::test]
    async fn test_generate_for_other_style_only_reloads_styles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/zoom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/effects/shake"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "generated_count": 3})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/styles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.select_style("zoom");
        settle(&mut browser).await;

        browser.generate_effects("shake", 3);
        settle(&mut browser).await;

        assert_eq!(
            last_toast(&browser),
            (ToastKind::Success, "Generated 3 effects".to_string())
        );
    }

    #[tokio::test]
    async fn test_generate_rejected_shows_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "error": "unknown style"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/styles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.generate_effects("sparkle", 5);
        settle(&mut browser).await;

        assert_eq!(
            last_toast(&browser),
            (
                ToastKind::Error,
                "Failed to generate effects: unknown style".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_duplicate_generation_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "generated_count": 1}))
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/styles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.generate_effects("blur", 1);
        browser.generate_effects("blur", 1);
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Warning, "Already generating Blur effects".to_string())
        );
        settle(&mut browser).await;
    }

    #[tokio::test]
    async fn test_generate_without_style_is_refused() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);
        browser.generate_effects("", 5);

        assert!(!browser.has_pending());
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Warning, "Choose a style".to_string())
        );
    }

    #[tokio::test]
    async fn test_single_preview_falls_back_to_open_effect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate_preview"))
            .and(body_json(json!({"style": "zoom", "effect_id": "e9"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "preview_file": "previews/zoom/e9_preview.mp4",
                "demo_file": "demos/zoom_e9_demo.mp4"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.session.current_effect = Some(open_effect("zoom", "e9"));

        browser.dispatch(BrowserAction::GenerateSinglePreview(None));
        settle(&mut browser).await;

        let open = browser.session.current_effect.as_ref().unwrap();
        assert_eq!(
            open.preview,
            PreviewState::Available("previews/zoom/e9_preview.mp4".into())
        );
        let (kind, message) = last_toast(&browser);
        assert_eq!(kind, ToastKind::Success);
        assert!(message.contains("demos/zoom_e9_demo.mp4"));
    }

    #[tokio::test]
    async fn test_single_preview_without_target_reports_error() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);

        browser.generate_single_preview(None);

        assert!(!browser.has_pending());
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Error, "Missing style or effect id".to_string())
        );
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_single_preview_for_current_style_reloads_grid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/shake"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([effect_json("e1", false)])))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate_preview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "preview_file": "previews/shake/e1_preview.mp4"
            })))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.select_style("shake");
        settle(&mut browser).await;

        // A different effect is open, so its preview must stay untouched
        browser.session.current_effect = Some(open_effect("shake", "e2"));
        browser.generate_single_preview(Some(EffectKey::new("shake", "e1")));
        assert!(browser.is_generating_preview(&EffectKey::new("shake", "e1")));
        settle(&mut browser).await;

        assert_eq!(
            browser.session.current_effect.as_ref().unwrap().preview,
            PreviewState::Missing
        );
        assert!(!browser.is_generating_preview(&EffectKey::new("shake", "e1")));
    }

    #[tokio::test]
    async fn test_batch_preview_requires_style() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);

        browser.request_batch_preview();
        assert!(browser.confirm.is_none());
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Warning, "Select a style first".to_string())
        );
    }

    #[tokio::test]
    async fn test_batch_preview_after_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effects/glitch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate_batch_preview"))
            .and(body_json(json!({"style": "glitch"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "generated_count": 3,
                "total_effects": 4,
                "demos_saved_to": "/srv/fx/demos"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.select_style("glitch");
        settle(&mut browser).await;

        browser.dispatch(BrowserAction::RequestBatchPreview);
        assert_eq!(
            browser.confirm,
            Some(PendingConfirm::BatchPreview { style: "glitch".into() })
        );
        assert!(!browser.has_pending());

        browser.dispatch(BrowserAction::Confirm);
        assert!(browser.confirm.is_none());
        settle(&mut browser).await;

        let (kind, message) = last_toast(&browser);
        assert_eq!(kind, ToastKind::Success);
        assert!(message.contains("3/4"));
        assert!(message.contains("/srv/fx/demos"));
    }

    #[tokio::test]
    async fn test_cancelled_batch_preview_sends_nothing() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);
        browser.session.current_style = Some("blur".into());

        browser.request_batch_preview();
        browser.dispatch(BrowserAction::CancelConfirm);
        browser.confirm();

        assert!(!browser.has_pending());
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_show_effect_details_without_preview() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effect/shake/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "e1",
                "name": "",
                "description": "Handheld wobble",
                "author": "",
                "xml_content": "<effect id=\"e1\"/>"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/previews/shake/e1_preview.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.dispatch(BrowserAction::ShowDetails(EffectKey::new("shake", "e1")));
        assert!(!browser.detail_open);
        settle(&mut browser).await;

        assert!(browser.detail_open);
        let open = browser.session.current_effect.as_ref().unwrap();
        assert_eq!(open.name(), "e1");
        assert_eq!(open.description(), "Handheld wobble");
        assert_eq!(open.author(), "Unknown");
        assert_eq!(open.preview, PreviewState::Missing);
        assert!(!browser.overlay.is_visible());
    }

    #[tokio::test]
    async fn test_show_effect_details_with_preview() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effect/zoom/e9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Punch",
                "xml_content": "<effect/>"
            })))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/previews/zoom/e9_preview.mp4"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.show_effect_details(EffectKey::new("zoom", "e9"));
        settle(&mut browser).await;

        let open = browser.session.current_effect.as_ref().unwrap();
        assert_eq!(
            open.preview,
            PreviewState::Available("previews/zoom/e9_preview.mp4".into())
        );
    }

    #[tokio::test]
    async fn test_show_effect_details_failure_keeps_window_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/effect/zoom/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Effect not found"})))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.show_effect_details(EffectKey::new("zoom", "gone"));
        settle(&mut browser).await;

        assert!(!browser.detail_open);
        assert!(browser.session.current_effect.is_none());
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Error, "Failed to load effect details".to_string())
        );
    }

    #[tokio::test]
    async fn test_download_and_copy_need_open_effect() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);

        browser.dispatch(BrowserAction::DownloadEffect);
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Warning, "No effect selected".to_string())
        );

        browser.dispatch(BrowserAction::CopyXml);
        assert_eq!(browser.toasts.iter().count(), 2);
        assert_eq!(last_toast(&browser).0, ToastKind::Warning);

        assert!(browser.take_requests().is_empty());
        assert!(!browser.has_pending());
    }

    #[tokio::test]
    async fn test_download_and_copy_open_effect() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);
        browser.session.current_effect = Some(open_effect("shake", "e1"));

        browser.download_effect();
        browser.copy_xml();

        let requests = browser.take_requests();
        assert_eq!(
            requests,
            vec![
                PlatformRequest::SaveFile {
                    url: format!("{}/effect/shake/e1.xml", server.uri()),
                    file_name: "e1.xml".into(),
                },
                PlatformRequest::CopyText("<effect id=\"e1\"/>".into()),
            ]
        );
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Success, "XML copied to clipboard".to_string())
        );
        assert!(browser.take_requests().is_empty());
    }

    #[tokio::test]
    async fn test_show_demos_and_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/demos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"path": "demos/Shake_01.mp4", "filename": "Shake_01.mp4", "style": "shake",
                 "effect_id": "e1", "size": 2097152, "created": 1700000000.5},
                {"path": "demos/Zoom_02.mp4", "filename": "Zoom_02.mp4", "style": "zoom",
                 "effect_id": "e2", "size": 1024, "created": 1690000000.0}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.dispatch(BrowserAction::ShowDemos);
        settle(&mut browser).await;

        assert!(browser.demos_open);
        assert_eq!(browser.visible_demos().len(), 2);

        browser.dispatch(BrowserAction::SetDemoFilter("SHAKE".into()));
        let visible = browser.visible_demos();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].filename, "Shake_01.mp4");
        // Filtering never refetches
        assert!(!browser.has_pending());
    }

    #[tokio::test]
    async fn test_demo_actions() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);

        browser.dispatch(BrowserAction::PlayDemo("demos/a.mp4".into()));
        browser.dispatch(BrowserAction::DownloadDemo {
            path: "demos/a.mp4".into(),
            filename: "a.mp4".into(),
        });

        assert_eq!(
            browser.take_requests(),
            vec![
                PlatformRequest::OpenUrl(format!("{}/demos/a.mp4", server.uri())),
                PlatformRequest::SaveFile {
                    url: format!("{}/demos/a.mp4", server.uri()),
                    file_name: "a.mp4".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_play_preview_opens_clip_url() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);

        let clip = ApiClient::preview_path("zoom", "e9");
        browser.dispatch(BrowserAction::PlayPreview(clip));

        assert_eq!(
            browser.take_requests(),
            vec![PlatformRequest::OpenUrl(format!(
                "{}/previews/zoom/e9_preview.mp4",
                server.uri()
            ))]
        );
    }

    #[tokio::test]
    async fn test_delete_and_bulk_download_are_stubs() {
        let server = MockServer::start().await;
        let mut browser = browser(&server);

        browser.dispatch(BrowserAction::RequestDeleteDemo {
            path: "demos/a.mp4".into(),
            filename: "a.mp4".into(),
        });
        assert!(matches!(browser.confirm, Some(PendingConfirm::DeleteDemo { .. })));
        browser.dispatch(BrowserAction::Confirm);
        assert_eq!(last_toast(&browser).0, ToastKind::Info);

        browser.dispatch(BrowserAction::DownloadAllDemos);
        assert_eq!(last_toast(&browser).0, ToastKind::Info);

        assert!(!browser.has_pending());
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_all_announces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/styles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.dispatch(BrowserAction::RefreshAll);
        settle(&mut browser).await;

        assert_eq!(
            last_toast(&browser),
            (ToastKind::Success, "Data refreshed".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_all_reloads_current_style() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/styles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "zoom", "effect_count": 1, "preview_count": 0}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/effects/zoom"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([effect_json("z1", false)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.session.current_style = Some("zoom".into());
        browser.dispatch(BrowserAction::RefreshAll);
        settle(&mut browser).await;

        assert_eq!(browser.styles.len(), 1);
        assert_eq!(browser.effects.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_show_demos_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/demos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.dispatch(BrowserAction::ShowDemos);
        settle(&mut browser).await;

        assert!(browser.demos_open);
        assert!(browser.visible_demos().is_empty());
        assert!(browser.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_show_demos_failure_opens_gallery_and_keeps_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/demos"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.session.all_demos = vec![crate::api::Demo {
            path: "demos/Blur_01.mp4".into(),
            filename: "Blur_01.mp4".into(),
            style: "blur".into(),
            effect_id: "b1".into(),
            size: 1024,
            created: 1_700_000_000.0,
        }];
        browser.dispatch(BrowserAction::ShowDemos);
        settle(&mut browser).await;

        assert!(browser.demos_open);
        assert_eq!(
            last_toast(&browser),
            (ToastKind::Error, "Failed to load demos".to_string())
        );
        assert_eq!(browser.visible_demos().len(), 1);
        assert_eq!(browser.overlay.active_count(), 0);
    }

    #[tokio::test]
    async fn test_save_to_downloads_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/demos/a.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.mp4");
        let mut browser = browser(&server);
        browser.dispatch(BrowserAction::SaveTo {
            url: format!("{}/demos/a.mp4", server.uri()),
            dest: dest.clone(),
        });
        settle(&mut browser).await;

        assert_eq!(std::fs::metadata(&dest).unwrap().len(), 64);
        assert_eq!(last_toast(&browser).0, ToastKind::Success);
    }
}
