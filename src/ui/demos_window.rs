//! Demo gallery window

use eframe::egui::{self, RichText};

use crate::api::Demo;
use crate::app::EffectBrowserApp;
use crate::browser::BrowserAction;
use crate::demos::{format_created, format_demo_size};
use crate::styles::{style_display_name, style_icon};
use crate::ui::theme::Theme;

/// Render the gallery of saved demo clips
pub fn render_demos_window(app: &mut EffectBrowserApp, ctx: &egui::Context) {
    if !app.browser.demos_open {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let mut actions = Vec::new();
    let mut window_open = true;
    let mut filter = app.browser.session.demo_filter.clone();

    egui::Window::new("Demo Videos")
        .id(egui::Id::new("demo_gallery"))
        .open(&mut window_open)
        .default_size([640.0, 520.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Search:").color(theme.text_muted));
                ui.add(
                    egui::TextEdit::singleline(&mut filter)
                        .hint_text("filename, style, or effect id")
                        .desired_width(240.0),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Download all").clicked() {
                        actions.push(BrowserAction::DownloadAllDemos);
                    }
                    if ui.button("Refresh").clicked() {
                        actions.push(BrowserAction::RefreshDemos);
                    }
                });
            });
            ui.add_space(8.0);

            let visible = app.browser.visible_demos();
            ui.label(
                RichText::new(format!(
                    "{} of {} demos",
                    visible.len(),
                    app.browser.session.all_demos.len()
                ))
                .color(theme.text_muted)
                .size(11.0),
            );
            ui.separator();

            if visible.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label(RichText::new("No demos found").color(theme.text_secondary));
                });
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("demos_scroll")
                .show(ui, |ui| {
                    for demo in visible {
                        render_demo_row(ui, &theme, demo, &mut actions);
                        ui.add_space(6.0);
                    }
                });
        });

    if filter != app.browser.session.demo_filter {
        actions.push(BrowserAction::SetDemoFilter(filter));
    }
    if !window_open {
        actions.push(BrowserAction::CloseDemos);
    }
    for action in actions {
        app.browser.dispatch(action);
    }
}

fn render_demo_row(ui: &mut egui::Ui, theme: &Theme, demo: &Demo, actions: &mut Vec<BrowserAction>) {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(6.0)
        .inner_margin(10.0)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&demo.filename).color(theme.text_primary).strong());
                    ui.label(
                        RichText::new(format!(
                            "{} {} · {} · {} · {}",
                            style_icon(&demo.style),
                            style_display_name(&demo.style),
                            demo.effect_id,
                            format_demo_size(demo.size),
                            format_created(demo.created)
                        ))
                        .color(theme.text_muted)
                        .size(11.0),
                    );
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("🗑").on_hover_text("Delete").clicked() {
                        actions.push(BrowserAction::RequestDeleteDemo {
                            path: demo.path.clone(),
                            filename: demo.filename.clone(),
                        });
                    }
                    if ui.button("⬇").on_hover_text("Download").clicked() {
                        actions.push(BrowserAction::DownloadDemo {
                            path: demo.path.clone(),
                            filename: demo.filename.clone(),
                        });
                    }
                    if ui.button("▶").on_hover_text("Play").clicked() {
                        actions.push(BrowserAction::PlayDemo(demo.path.clone()));
                    }
                });
            });
        });
}
