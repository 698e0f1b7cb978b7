//! Left panel UI: filters, view controls and the selected airport.

use crate::state::{
    available_airlines, available_continents, AppEvent, AppState, FilterCriteria, RenderFrame,
    Selector,
};
use crate::ui::colors;
use eframe::egui::{self, RichText};

pub fn render_left_panel(
    ctx: &egui::Context,
    state: &AppState,
    frame: &RenderFrame,
    events: &mut Vec<AppEvent>,
) {
    egui::SidePanel::left("left_panel")
        .resizable(true)
        .default_width(230.0)
        .min_width(200.0)
        .max_width(360.0)
        .show(ctx, |ui| {
            ui.heading("Filters");
            ui.separator();

            render_filter_section(ui, state, events);
            ui.add_space(10.0);

            render_view_section(ui, frame, events);
            ui.add_space(10.0);

            render_selection_section(ui, state, frame, events);
        });
}

fn render_filter_section(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppEvent>) {
    let current = state.criteria();
    let mut continent = current.continent.clone();
    let mut airline = current.airline.clone();

    selector_combo(
        ui,
        "continent_selector",
        "Continent",
        &mut continent,
        &available_continents(state.dataset()),
    );
    selector_combo(
        ui,
        "airline_selector",
        "Airline",
        &mut airline,
        &available_airlines(state.dataset()),
    );

    let criteria = FilterCriteria { continent, airline };
    if criteria != *current {
        events.push(AppEvent::SetFilter(criteria));
    }

    ui.add_enabled_ui(!current.is_identity(), |ui| {
        if ui.button("Clear filters").clicked() {
            events.push(AppEvent::SetFilter(FilterCriteria::default()));
        }
    });
}

fn selector_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    selector: &mut Selector,
    options: &[String],
) {
    ui.label(RichText::new(label).small().color(colors::ui::LABEL));
    egui::ComboBox::from_id_salt(id)
        .selected_text(selector.label().to_string())
        .width(180.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(selector, Selector::Any, "All");
            for option in options {
                ui.selectable_value(selector, Selector::Only(option.clone()), option.as_str());
            }
        });
}

fn render_view_section(ui: &mut egui::Ui, frame: &RenderFrame, events: &mut Vec<AppEvent>) {
    egui::CollapsingHeader::new(RichText::new("View").strong())
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("+").on_hover_text("Zoom in").clicked() {
                    events.push(AppEvent::ZoomIn);
                }
                if ui.button("\u{2212}").on_hover_text("Zoom out").clicked() {
                    events.push(AppEvent::ZoomOut);
                }
                if ui.button("Reset").clicked() {
                    events.push(AppEvent::Reset);
                }
            });
            ui.label(
                RichText::new(format!(
                    "{:.0} x {:.0} at ({:.0}, {:.0})",
                    frame.viewport.width(),
                    frame.viewport.height(),
                    frame.viewport.origin.x,
                    frame.viewport.origin.y
                ))
                .small()
                .monospace()
                .color(colors::ui::LABEL),
            );
        });
}

fn render_selection_section(
    ui: &mut egui::Ui,
    state: &AppState,
    frame: &RenderFrame,
    events: &mut Vec<AppEvent>,
) {
    egui::CollapsingHeader::new(RichText::new("Selected Airport").strong())
        .default_open(true)
        .show(ui, |ui| {
            let Some(id) = frame.selection.as_deref() else {
                ui.label(RichText::new("Click an airport to focus it").small().italics());
                return;
            };

            ui.group(|ui| {
                ui.label(RichText::new(id).strong().monospace().color(colors::ui::ACTIVE));
                if let Some(airport) = state.dataset().airport(id) {
                    if !airport.name.is_empty() {
                        ui.label(&airport.name);
                    }
                    ui.label(
                        RichText::new(format!("{}, {}", airport.display_city(), airport.country))
                            .small(),
                    );
                }

                let connected = frame.highlighted_routes().count();
                ui.label(
                    RichText::new(format!("{} connected routes", connected))
                        .small()
                        .color(colors::ui::VALUE),
                );
                for route in frame.highlighted_routes().take(8) {
                    ui.label(
                        RichText::new(format!("{} \u{2192} {}", route.origin, route.destination))
                            .small()
                            .monospace(),
                    );
                }

                if ui.small_button("Clear").clicked() {
                    events.push(AppEvent::ClickAirport(id.to_string()));
                }
            });
        });
}
