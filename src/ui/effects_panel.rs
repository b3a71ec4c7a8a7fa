//! Effect grid for the current style

use eframe::egui::{self, RichText, Vec2};

use crate::api::{non_empty, ApiClient, EffectSummary};
use crate::app::EffectBrowserApp;
use crate::browser::{Browser, BrowserAction};
use crate::state::{EffectKey, EffectsView};
use crate::styles::style_display_name;
use crate::ui::components::badge;
use crate::ui::theme::Theme;

const CARD_SIZE: Vec2 = Vec2::new(250.0, 150.0);

/// Render the header, toolbar, and effect cards
pub fn render_effects_panel(app: &mut EffectBrowserApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let default_count = app.config.ui.default_generate_count;
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.label(
            RichText::new(&app.browser.effects_title)
                .color(theme.text_primary)
                .size(20.0)
                .strong(),
        );
        let count = app.browser.effects.cards().len();
        if count > 0 {
            ui.label(RichText::new(format!("({})", count)).color(theme.text_muted));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Demos").clicked() {
                actions.push(BrowserAction::ShowDemos);
            }
            if ui
                .button("Preview All")
                .on_hover_text("Render preview clips for every effect of this style")
                .clicked()
            {
                actions.push(BrowserAction::RequestBatchPreview);
            }
        });
    });
    ui.add_space(12.0);

    match &app.browser.effects {
        EffectsView::NoSelection => {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Pick a style on the left to browse its effects")
                        .color(theme.text_muted),
                );
            });
        }
        EffectsView::Empty { style } => {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(
                    RichText::new(format!(
                        "No {} effects yet",
                        style_display_name(style)
                    ))
                    .color(theme.text_secondary)
                    .size(16.0),
                );
                ui.add_space(12.0);
                let busy = app.browser.is_generating_effects(style);
                if ui
                    .add_enabled(
                        !busy,
                        egui::Button::new(format!("Generate {} effects", default_count)),
                    )
                    .clicked()
                {
                    actions.push(BrowserAction::GenerateEffects {
                        style: style.clone(),
                        count: default_count,
                    });
                }
            });
        }
        EffectsView::Grid { style, effects } => {
            egui::ScrollArea::vertical()
                .id_salt("effects_scroll")
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = Vec2::splat(12.0);
                        for effect in effects {
                            render_effect_card(ui, &app.browser, &theme, style, effect, &mut actions);
                        }
                    });
                });
        }
    }

    for action in actions {
        app.browser.dispatch(action);
    }
}

fn render_effect_card(
    ui: &mut egui::Ui,
    browser: &Browser,
    theme: &Theme,
    style: &str,
    effect: &EffectSummary,
    actions: &mut Vec<BrowserAction>,
) {
    let key = EffectKey::new(style, &effect.id);

    ui.allocate_ui(CARD_SIZE, |ui| {
        egui::Frame::new()
            .fill(theme.bg_medium)
            .corner_radius(8.0)
            .inner_margin(12.0)
            .stroke(egui::Stroke::new(1.0, theme.border))
            .show(ui, |ui| {
                ui.set_width(CARD_SIZE.x - 24.0);
                ui.set_min_height(CARD_SIZE.y - 24.0);

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(effect.title())
                            .color(theme.text_primary)
                            .size(15.0)
                            .strong(),
                    );
                    if effect.has_preview {
                        badge(ui, "Preview", theme.success);
                    }
                });

                let description = non_empty(effect.description.as_deref()).unwrap_or("No description");
                ui.label(RichText::new(description).color(theme.text_secondary).size(12.0));
                ui.label(RichText::new(&effect.id).color(theme.text_muted).size(11.0));

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Details").clicked() {
                        actions.push(BrowserAction::ShowDetails(key.clone()));
                    }

                    if effect.has_preview {
                        let path = effect
                            .preview_file
                            .clone()
                            .unwrap_or_else(|| ApiClient::preview_path(style, &effect.id));
                        if ui
                            .button("▶ Play")
                            .on_hover_text(format!("Open {} in your video player", path))
                            .clicked()
                        {
                            actions.push(BrowserAction::PlayPreview(path));
                        }
                    } else {
                        let busy = browser.is_generating_preview(&key);
                        if ui
                            .add_enabled(!busy, egui::Button::new("Generate preview"))
                            .clicked()
                        {
                            actions.push(BrowserAction::GenerateSinglePreview(Some(key.clone())));
                        }
                    }
                });
            });
    });
}
