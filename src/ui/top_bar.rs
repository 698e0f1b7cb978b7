//! Top bar UI: app title, dataset note, and status.

use crate::state::{AppEvent, AppState};
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &AppState, events: &mut Vec<AppEvent>) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("Route Atlas")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                let meta = &state.dataset().meta;
                let provenance: Vec<&str> = [meta.source.as_deref(), meta.note.as_deref()]
                    .into_iter()
                    .flatten()
                    .filter(|s| !s.is_empty())
                    .collect();
                if !provenance.is_empty() {
                    ui.separator();
                    ui.label(
                        RichText::new(provenance.join(" · "))
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                }

                ui.separator();

                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reset view").clicked() {
                        events.push(AppEvent::Reset);
                    }
                });
            });
        });
}
