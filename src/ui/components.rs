//! Shared UI components

use eframe::egui::{self, Color32, RichText, Stroke};

use crate::app::EffectBrowserApp;
use crate::state::{LoadingOverlay, Toasts};
use crate::ui::theme::Theme;

/// Render a titled panel section
pub fn render_section_frame<R>(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .stroke(Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
            ui.add_space(12.0);
            content(ui)
        })
        .inner
}

/// Small colored pill, e.g. "Has preview"
pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    egui::Frame::new()
        .fill(color.gamma_multiply(0.2))
        .corner_radius(4.0)
        .inner_margin(egui::vec2(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(color).size(11.0).strong());
        });
}

/// Dim the window and block input while any request holds the overlay
pub fn render_loading_overlay(ctx: &egui::Context, overlay: &LoadingOverlay, theme: &Theme) {
    let Some(message) = overlay.message() else {
        return;
    };

    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("loading_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            // Swallow clicks meant for the widgets underneath
            ui.allocate_rect(screen, egui::Sense::click_and_drag());
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(150));

            let card = egui::Rect::from_center_size(screen.center(), egui::vec2(260.0, 110.0));
            ui.scope_builder(egui::UiBuilder::new().max_rect(card), |ui| {
                egui::Frame::new()
                    .fill(theme.bg_dark)
                    .corner_radius(8.0)
                    .inner_margin(16.0)
                    .stroke(Stroke::new(1.0, theme.border))
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.add_space(8.0);
                            ui.label(RichText::new(&message).color(theme.text_primary));
                            if overlay.active_count() > 1 {
                                ui.label(
                                    RichText::new(format!(
                                        "{} requests in progress",
                                        overlay.active_count()
                                    ))
                                    .color(theme.text_muted)
                                    .size(11.0),
                                );
                            }
                        });
                    });
            });
        });
}

/// Stack toasts in the bottom-right corner. Returns the id of a clicked toast.
pub fn render_toasts(ctx: &egui::Context, toasts: &Toasts, theme: &Theme) -> Option<u64> {
    if toasts.is_empty() {
        return None;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -36.0))
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            for toast in toasts.iter() {
                let color = theme.toast_color(toast.kind);
                let response = egui::Frame::new()
                    .fill(theme.bg_medium)
                    .corner_radius(6.0)
                    .inner_margin(egui::vec2(12.0, 8.0))
                    .stroke(Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&toast.message).color(theme.text_primary));
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_text("Click to dismiss");

                if response.clicked() {
                    dismissed = Some(toast.id);
                }
                ui.add_space(6.0);
            }
        });

    dismissed
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut EffectBrowserApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let server = app.browser.api().base_url().to_string();

    egui::Window::new("About Effect Browser")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 220.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Effect Browser")
                        .size(24.0)
                        .strong()
                        .color(theme.accent),
                );
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Browse, preview, and generate video effects")
                        .color(theme.text_secondary),
                );

                ui.add_space(8.0);
                if ui.link(&server).clicked() {
                    if let Err(e) = open::that(&server) {
                        tracing::warn!("Failed to open {}: {}", server, e);
                    }
                }

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }
                ui.add_space(8.0);
            });
        });
}
