//! Right panel UI: animated KPIs and dashboard charts.

use crate::data::{HaulCategory, NamedValue};
use crate::state::{AppState, RenderFrame};
use crate::ui::colors;
use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Vec2};

pub fn render_right_panel(ctx: &egui::Context, state: &AppState, frame: &RenderFrame) {
    egui::SidePanel::right("right_panel")
        .resizable(true)
        .default_width(260.0)
        .min_width(220.0)
        .max_width(380.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Network");
                ui.separator();

                render_kpi_section(ui, frame);
                ui.add_space(5.0);

                render_signature_section(ui, frame);
                ui.add_space(5.0);

                render_top_airlines_section(ui, frame);
                ui.add_space(5.0);

                render_haul_section(ui, state);
                ui.add_space(5.0);

                render_domestic_section(ui, &state.dataset().domestic_vs_international);
            });
        });
}

fn render_kpi_section(ui: &mut egui::Ui, frame: &RenderFrame) {
    egui::CollapsingHeader::new(RichText::new("Key Figures").strong())
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("kpi_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for (kpi, value) in &frame.kpis {
                        ui.label(RichText::new(kpi.label()).small().color(colors::ui::LABEL));
                        ui.label(
                            RichText::new(kpi.format(*value))
                                .monospace()
                                .strong()
                                .color(colors::ui::VALUE),
                        );
                        ui.end_row();
                    }
                });

            if let Some(hub) = &frame.metrics.top_hub {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Busiest hub: {} ({} routes)", hub.key, hub.count))
                        .small()
                        .color(colors::ui::ACTIVE),
                );
            }
        });
}

fn render_signature_section(ui: &mut egui::Ui, frame: &RenderFrame) {
    egui::CollapsingHeader::new(RichText::new("Signature Routes").strong())
        .default_open(true)
        .show(ui, |ui| {
            let routes = &frame.metrics.signature_routes;
            if routes.is_empty() {
                ui.label(RichText::new("No routes match the filters").small().italics());
                return;
            }
            let longest = routes.first().map_or(0.0, |r| r.distance_km);
            for route in routes {
                let label = format!(
                    "{} \u{2192} {}  {}  {:.0} km",
                    route.origin, route.destination, route.airline, route.distance_km
                );
                bar_row(ui, &label, fraction(route.distance_km, longest), colors::chart::BAR);
            }
        });
}

fn render_top_airlines_section(ui: &mut egui::Ui, frame: &RenderFrame) {
    egui::CollapsingHeader::new(RichText::new("Top Airlines").strong())
        .default_open(true)
        .show(ui, |ui| {
            let entities = &frame.metrics.top_entities;
            let max = entities.iter().map(|e| e.count).max().unwrap_or(0) as f64;
            for entity in entities {
                let label = format!("{}  {}", entity.key, crate::anim::format_thousands(entity.count as f64));
                bar_row(ui, &label, fraction(entity.count as f64, max), colors::chart::BAR);
            }
        });
}

fn render_haul_section(ui: &mut egui::Ui, state: &AppState) {
    egui::CollapsingHeader::new(RichText::new("Haul Distribution").strong())
        .default_open(false)
        .show(ui, |ui| {
            let buckets = &state.dataset().haul_distribution;
            let total: u64 = buckets.iter().map(|b| b.count).sum();
            for bucket in buckets {
                let color = match bucket.category() {
                    HaulCategory::Short => colors::chart::SHORT_HAUL,
                    HaulCategory::Medium => colors::chart::MEDIUM_HAUL,
                    HaulCategory::Long => colors::chart::LONG_HAUL,
                    HaulCategory::Other => colors::chart::OTHER,
                };
                let share = fraction(bucket.count as f64, total as f64);
                let label = format!("{}  {:.1} %", bucket.label, share * 100.0);
                bar_row(ui, &label, share, color);
            }
        });
}

fn render_domestic_section(ui: &mut egui::Ui, breakdown: &[NamedValue]) {
    egui::CollapsingHeader::new(RichText::new("Domestic vs International").strong())
        .default_open(false)
        .show(ui, |ui| {
            let total: u64 = breakdown.iter().map(|v| v.value).sum();
            for entry in breakdown {
                let share = fraction(entry.value as f64, total as f64);
                let label = format!(
                    "{}  {}",
                    entry.name,
                    crate::anim::format_thousands(entry.value as f64)
                );
                bar_row(ui, &label, share, colors::chart::BAR);
            }
        });
}

fn fraction(value: f64, max: f64) -> f32 {
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0) as f32
    } else {
        0.0
    }
}

/// A text label above a horizontal bar filled to `fraction`.
fn bar_row(ui: &mut egui::Ui, label: &str, fraction: f32, color: Color32) {
    ui.label(RichText::new(label).small().monospace());
    let width = ui.available_width().max(40.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 6.0), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 2.0, colors::chart::BAR_BACKGROUND);
    let mut filled = rect;
    filled.set_width(rect.width() * fraction);
    painter.rect_filled(filled, 2.0, color);
    ui.add_space(2.0);
}
