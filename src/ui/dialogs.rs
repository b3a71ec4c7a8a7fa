//! Confirmation and settings windows

use eframe::egui::{self, RichText, Vec2};

use crate::app::EffectBrowserApp;
use crate::browser::BrowserAction;
use crate::ui::components::render_section_frame;
use crate::ui::theme::ThemePreset;

/// Render the pending confirmation, if any
pub fn render_confirm_dialog(app: &mut EffectBrowserApp, ctx: &egui::Context) {
    let Some(pending) = &app.browser.confirm else {
        return;
    };

    let theme = app.ui.current_theme.clone();
    let mut action = None;

    egui::Window::new(pending.title())
        .id(egui::Id::new("confirm_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new(pending.prompt()).color(theme.text_primary));
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Confirm").clicked() {
                    action = Some(BrowserAction::Confirm);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(BrowserAction::CancelConfirm);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = Some(BrowserAction::CancelConfirm);
    }
    if let Some(action) = action {
        app.browser.dispatch(action);
    }
}

/// Render the settings window
pub fn render_settings_window(app: &mut EffectBrowserApp, ctx: &egui::Context) {
    if !app.ui.show_settings {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let mut window_open = true;
    let mut changed = false;
    let mut apply_server = false;

    egui::Window::new("Settings")
        .id(egui::Id::new("settings"))
        .open(&mut window_open)
        .collapsible(false)
        .default_width(440.0)
        .show(ctx, |ui| {
            render_section_frame(ui, &theme, "Server", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("URL:").color(theme.text_muted));
                    ui.add(
                        egui::TextEdit::singleline(&mut app.ui.server_url_input)
                            .desired_width(240.0),
                    );
                    if ui.button("Connect").clicked() {
                        apply_server = true;
                    }
                });
                ui.label(
                    RichText::new(format!("Connected to {}", app.browser.api().base_url()))
                        .color(theme.text_muted)
                        .size(11.0),
                );
            });

            ui.add_space(12.0);

            render_section_frame(ui, &theme, "Appearance", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Theme:").color(theme.text_muted));
                    egui::ComboBox::from_id_salt("theme_select")
                        .selected_text(app.config.ui.theme.name())
                        .show_ui(ui, |ui| {
                            for preset in ThemePreset::all() {
                                if ui
                                    .selectable_label(app.config.ui.theme == *preset, preset.name())
                                    .clicked()
                                {
                                    app.config.ui.theme = *preset;
                                    app.ui.current_theme = preset.theme();
                                    app.ui.theme_dirty = true;
                                    changed = true;
                                }
                            }
                        });
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Preview:").color(theme.text_muted));
                    ui.add_space(8.0);
                    for color in [theme.bg_dark, theme.accent, theme.success, theme.warning, theme.error] {
                        let (rect, _) = ui.allocate_exact_size(Vec2::splat(20.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, color);
                        ui.add_space(4.0);
                    }
                });
            });

            ui.add_space(12.0);

            render_section_frame(ui, &theme, "Behavior", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Notification duration (s):").color(theme.text_muted));
                    changed |= ui
                        .add(egui::DragValue::new(&mut app.config.ui.toast_secs).range(1..=30))
                        .changed();
                });
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Default effect count:").color(theme.text_muted));
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut app.config.ui.default_generate_count)
                                .range(1..=50),
                        )
                        .changed();
                });
                ui.label(
                    RichText::new("  Changes to notification duration apply on next start")
                        .color(theme.text_muted)
                        .size(11.0),
                );
            });

            ui.add_space(12.0);

            render_section_frame(ui, &theme, "Downloads", |ui| {
                ui.horizontal(|ui| {
                    let dir = app
                        .config
                        .downloads
                        .resolve_directory()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "Not set".to_string());
                    ui.label(RichText::new("Save dialogs open in:").color(theme.text_muted));
                    ui.label(RichText::new(dir).color(theme.text_primary));
                });
                ui.horizontal(|ui| {
                    if ui.button("Browse...").clicked() {
                        if let Some(dir) = rfd::FileDialog::new()
                            .set_title("Select download folder")
                            .pick_folder()
                        {
                            app.config.downloads.directory = Some(dir);
                            changed = true;
                        }
                    }
                    if app.config.downloads.directory.is_some() && ui.button("Reset").clicked() {
                        app.config.downloads.directory = None;
                        changed = true;
                    }
                });
            });
        });

    if apply_server {
        app.apply_server_url();
    }
    if changed {
        app.save_config();
    }
    if !window_open {
        app.ui.show_settings = false;
    }
}
