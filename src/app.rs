use eframe::egui;

use crate::api::{ApiClient, ApiError};
use crate::browser::{Browser, BrowserAction};
use crate::config::{Config, DEFAULT_SERVER_URL};
use crate::state::{PlatformRequest, UiState};
use crate::ui::{
    render_about_dialog, render_confirm_dialog, render_demos_window, render_detail_window,
    render_effects_panel, render_loading_overlay, render_settings_window, render_styles_panel,
    render_toasts,
};

/// Main application state
pub struct EffectBrowserApp {
    /// Application configuration
    pub config: Config,
    /// Server state and in-flight requests
    pub browser: Browser,
    /// UI-only state
    pub ui: UiState,
}

impl EffectBrowserApp {
    /// Create the application and start loading styles
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        server_url: String,
    ) -> Result<Self, ApiError> {
        let toast_lifetime = config.ui.toast_duration();
        let timeout = config.server.timeout();

        let (api, connect_error) = match ApiClient::new(&server_url, timeout) {
            Ok(api) => (api, None),
            Err(e) => {
                tracing::error!("Invalid server URL {}: {}", server_url, e);
                (ApiClient::new(DEFAULT_SERVER_URL, timeout)?, Some(e))
            }
        };

        let ui = UiState::new(
            config.ui.theme.theme(),
            config.ui.default_generate_count,
            api.base_url().to_string(),
        );

        let mut browser = Browser::new(api, toast_lifetime);
        if let Some(e) = connect_error {
            browser.toasts.error(format!("{}; using {}", e, DEFAULT_SERVER_URL));
        }

        tracing::info!("Connecting to {}", browser.api().base_url());
        browser.dispatch(BrowserAction::LoadStyles);

        Ok(Self { config, browser, ui })
    }

    /// Reconnect to the URL typed into the settings window
    pub fn apply_server_url(&mut self) {
        let url = self.ui.server_url_input.trim().to_string();
        match ApiClient::new(&url, self.config.server.timeout()) {
            Ok(api) => {
                self.config.server.base_url = url;
                self.save_config();
                self.browser.reconnect(api);
            }
            Err(e) => {
                tracing::warn!("Rejected server URL {}: {}", url, e);
                self.browser.toasts.error(e.to_string());
            }
        }
    }

    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    /// Carry out requests that need the window system
    fn handle_platform_requests(&mut self, ctx: &egui::Context) {
        for request in self.browser.take_requests() {
            match request {
                PlatformRequest::OpenUrl(url) => {
                    tracing::debug!("Opening {}", url);
                    if let Err(e) = open::that(&url) {
                        tracing::error!("Failed to open {}: {}", url, e);
                        self.browser.toasts.error("Failed to open video");
                    }
                }
                PlatformRequest::CopyText(text) => {
                    ctx.copy_text(text);
                }
                PlatformRequest::SaveFile { url, file_name } => {
                    let mut dialog = rfd::FileDialog::new()
                        .set_title("Save as")
                        .set_file_name(&file_name);
                    if let Some(dir) = self.config.downloads.resolve_directory() {
                        dialog = dialog.set_directory(dir);
                    }

                    match dialog.save_file() {
                        Some(dest) => self.browser.dispatch(BrowserAction::SaveTo { url, dest }),
                        None => tracing::debug!("Save of {} cancelled", file_name),
                    }
                }
            }
        }
    }
}

impl eframe::App for EffectBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        self.browser.poll(ctx);
        self.handle_platform_requests(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Settings").clicked() {
                        self.ui.show_settings = true;
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Refresh").clicked() {
                        self.browser.dispatch(BrowserAction::RefreshAll);
                    }
                    if ui.button("Demo videos").clicked() {
                        self.browser.dispatch(BrowserAction::ShowDemos);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let theme = &self.ui.current_theme;
                ui.label(
                    egui::RichText::new(format!("Server: {}", self.browser.api().base_url()))
                        .color(theme.text_muted)
                        .size(11.0),
                );
                if self.browser.has_pending() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.spinner();
                    });
                }
            });
        });

        egui::SidePanel::left("styles_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                render_styles_panel(self, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_effects_panel(self, ui);
        });

        render_detail_window(self, ctx);
        render_demos_window(self, ctx);
        render_confirm_dialog(self, ctx);
        render_settings_window(self, ctx);
        render_about_dialog(self, ctx);

        let theme = self.ui.current_theme.clone();
        render_loading_overlay(ctx, &self.browser.overlay, &theme);
        if let Some(id) = render_toasts(ctx, &self.browser.toasts, &theme) {
            self.browser.dispatch(BrowserAction::DismissToast(id));
        }
    }
}
