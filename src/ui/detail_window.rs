//! Effect detail window

use eframe::egui::{self, RichText};

use crate::app::EffectBrowserApp;
use crate::browser::BrowserAction;
use crate::state::PreviewState;
use crate::styles::style_display_name;
use crate::ui::components::badge;

/// Render the detail window for the open effect
pub fn render_detail_window(app: &mut EffectBrowserApp, ctx: &egui::Context) {
    if !app.browser.detail_open {
        return;
    }
    let Some(open) = &app.browser.session.current_effect else {
        return;
    };

    let theme = app.ui.current_theme.clone();
    let mut actions = Vec::new();
    let mut window_open = true;

    egui::Window::new(open.name())
        .id(egui::Id::new("effect_detail"))
        .open(&mut window_open)
        .collapsible(false)
        .default_size([560.0, 520.0])
        .show(ctx, |ui| {
            egui::Grid::new("effect_meta")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Style").color(theme.text_muted));
                    ui.label(style_display_name(&open.key.style));
                    ui.end_row();

                    ui.label(RichText::new("Effect id").color(theme.text_muted));
                    ui.label(&open.key.effect_id);
                    ui.end_row();

                    ui.label(RichText::new("Author").color(theme.text_muted));
                    ui.label(open.author());
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.label(RichText::new(open.description()).color(theme.text_secondary));
            ui.add_space(12.0);

            ui.horizontal(|ui| match &open.preview {
                PreviewState::Available(path) => {
                    badge(ui, "Preview ready", theme.success);
                    if ui.button("▶ Play preview").clicked() {
                        actions.push(BrowserAction::PlayPreview(path.clone()));
                    }
                }
                PreviewState::Missing => {
                    badge(ui, "No preview", theme.text_muted);
                    let busy = app.browser.is_generating_preview(&open.key);
                    if ui
                        .add_enabled(!busy, egui::Button::new("Generate preview"))
                        .clicked()
                    {
                        actions.push(BrowserAction::GenerateSinglePreview(None));
                    }
                }
            });

            ui.add_space(12.0);
            ui.label(RichText::new("XML").color(theme.accent).size(13.0).strong());
            egui::ScrollArea::vertical()
                .id_salt("effect_xml")
                .max_height(300.0)
                .show(ui, |ui| {
                    let mut xml = open.xml();
                    ui.add(
                        egui::TextEdit::multiline(&mut xml)
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Download XML").clicked() {
                    actions.push(BrowserAction::DownloadEffect);
                }
                if ui.button("Copy XML").clicked() {
                    actions.push(BrowserAction::CopyXml);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        actions.push(BrowserAction::CloseDetails);
                    }
                });
            });
        });

    if !window_open {
        actions.push(BrowserAction::CloseDetails);
    }
    for action in actions {
        app.browser.dispatch(action);
    }
}
