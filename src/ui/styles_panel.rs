//! Style sidebar and the effect generation form

use eframe::egui::{self, RichText, Vec2};

use crate::app::EffectBrowserApp;
use crate::browser::BrowserAction;
use crate::state::GenerateForm;
use crate::styles::{style_display_name, style_icon};
use crate::ui::components::render_section_frame;

/// Largest batch the form offers; the server caps requests itself
const MAX_GENERATE_COUNT: u32 = 50;

/// Render the style list and generation form
pub fn render_styles_panel(app: &mut EffectBrowserApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let mut actions = Vec::new();

    egui::ScrollArea::vertical()
        .id_salt("styles_scroll")
        .show(ui, |ui| {
            render_section_frame(ui, &theme, "Styles", |ui| {
                if app.browser.styles.is_empty() {
                    ui.label(RichText::new("No styles loaded").color(theme.text_muted));
                }

                for style in &app.browser.styles {
                    let is_active = app.browser.is_active_style(&style.name);
                    let (bg, text_color) = if is_active {
                        (theme.selection, theme.accent)
                    } else {
                        (egui::Color32::TRANSPARENT, theme.text_primary)
                    };

                    let label = format!(
                        "{} {}",
                        style_icon(&style.name),
                        style_display_name(&style.name)
                    );
                    let button = egui::Button::new(RichText::new(label).color(text_color))
                        .fill(bg)
                        .corner_radius(6.0)
                        .min_size(Vec2::new(ui.available_width(), 30.0));

                    if ui.add(button).clicked() {
                        actions.push(BrowserAction::SelectStyle(style.name.clone()));
                    }

                    ui.horizontal(|ui| {
                        ui.add_space(28.0);
                        ui.label(
                            RichText::new(format!(
                                "{} effects · {} previews",
                                style.effect_count, style.preview_count
                            ))
                            .color(theme.text_muted)
                            .size(11.0),
                        );
                    });
                    ui.add_space(2.0);
                }

                ui.add_space(8.0);
                if ui.button("Refresh").clicked() {
                    actions.push(BrowserAction::RefreshAll);
                }
            });

            ui.add_space(12.0);

            render_section_frame(ui, &theme, "Generate Effects", |ui| {
                let form = &mut app.ui.generate_form;

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Style:").color(theme.text_muted));
                    let selected = if form.style.is_empty() {
                        "Choose a style".to_string()
                    } else {
                        style_display_name(&form.style).to_string()
                    };
                    egui::ComboBox::from_id_salt("generate_style")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for name in GenerateForm::choices() {
                                let label = format!("{} {}", style_icon(name), style_display_name(name));
                                ui.selectable_value(&mut form.style, name.to_string(), label);
                            }
                        });
                });

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Count:").color(theme.text_muted));
                    ui.add(egui::DragValue::new(&mut form.count).range(1..=MAX_GENERATE_COUNT));
                });

                ui.add_space(8.0);
                let busy = app.browser.is_generating_effects(&form.style);
                if ui
                    .add_enabled(!busy, egui::Button::new("Generate"))
                    .clicked()
                {
                    actions.push(BrowserAction::GenerateEffects {
                        style: form.style.clone(),
                        count: form.count,
                    });
                }
            });
        });

    for action in actions {
        app.browser.dispatch(action);
    }
}
