//! Central canvas UI: the route map.

use crate::geo::{render_map, unproject, MapTransform};
use crate::state::{AppEvent, AppState, RenderFrame};
use crate::ui::colors;
use eframe::egui::{self, Rect, RichText, Sense, Vec2};
use glam::DVec2;

pub fn render_canvas(
    ctx: &egui::Context,
    state: &AppState,
    frame: &RenderFrame,
    events: &mut Vec<AppEvent>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;
            let transform = MapTransform::new(frame.viewport, rect);

            render_map(&painter, frame, &transform);
            draw_overlay_info(ui, &rect, frame, &transform, response.hover_pos());

            handle_canvas_interaction(&response, state, frame, &transform, events);
        });
}

fn draw_overlay_info(
    ui: &mut egui::Ui,
    rect: &Rect,
    frame: &RenderFrame,
    transform: &MapTransform,
    hover: Option<egui::Pos2>,
) {
    let overlay_rect = Rect::from_min_size(rect.left_top() + Vec2::new(10.0, 10.0), Vec2::new(220.0, 70.0));

    ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(format!(
                    "Zoom: {:.1}x  Routes: {}",
                    transform.zoom_level(),
                    frame.routes.len()
                ))
                .monospace()
                .size(12.0)
                .color(colors::ui::VALUE),
            );

            if let Some(pos) = hover {
                let coord = unproject(transform.to_logical(pos));
                ui.label(
                    RichText::new(format!("Lat {:>7.2}  Lon {:>8.2}", coord.y, coord.x))
                        .monospace()
                        .size(12.0)
                        .color(colors::ui::LABEL),
                );
            }

            if frame.unplaced_routes > 0 {
                ui.label(
                    RichText::new(format!("{} routes without coordinates", frame.unplaced_routes))
                        .size(11.0)
                        .color(colors::ui::WARNING),
                );
            }
        });
    });
}

fn handle_canvas_interaction(
    response: &egui::Response,
    state: &AppState,
    frame: &RenderFrame,
    transform: &MapTransform,
    events: &mut Vec<AppEvent>,
) {
    let rect = response.rect;
    let surface_size = transform.screen_size();
    let to_dvec = |p: egui::Pos2| DVec2::new(p.x as f64, p.y as f64);

    // Drags that wander off the map end the pan
    let pointer = response.ctx.input(|i| i.pointer.hover_pos());
    if state.is_panning() && pointer_left_surface(pointer, rect) {
        events.push(AppEvent::PointerLeave);
    } else if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(AppEvent::PointerDown {
                position: to_dvec(pos),
            });
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(AppEvent::PointerMove {
                position: to_dvec(pos),
                surface_size,
            });
        }
    }
    if response.drag_stopped() {
        events.push(AppEvent::PointerUp);
    }

    if response.hovered() {
        let scroll = response.ctx.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            events.push(AppEvent::Zoom(
                state.settings().scroll_zoom_factor(scroll as f64),
            ));
        }
    }

    if response.double_clicked() {
        events.push(AppEvent::Reset);
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let tolerance = transform.pixels_to_logical(state.settings().airport_hit_radius_px);
            if let Some(marker) = frame.pick_airport(transform.to_logical(pos), tolerance) {
                events.push(AppEvent::ClickAirport(marker.id.clone()));
            }
        }
    }
}

/// True when the pointer is outside `rect`. No position means the pointer
/// has left the window, which is outside too.
fn pointer_left_surface(pointer: Option<egui::Pos2>, rect: Rect) -> bool {
    pointer.map_or(true, |p| !rect.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Pos2;

    #[test]
    fn test_pointer_outside_window_counts_as_left() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, 400.0));
        assert!(!pointer_left_surface(Some(Pos2::new(100.0, 100.0)), rect));
        assert!(pointer_left_surface(Some(Pos2::new(900.0, 100.0)), rect));
        assert!(pointer_left_surface(None, rect));
    }
}
