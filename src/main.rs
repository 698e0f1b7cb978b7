#![warn(clippy::all)]

//! Route Atlas - an interactive flight route map and network dashboard.
//!
//! Loads a route network (or the embedded demo), then shows it on a
//! pannable, zoomable world map next to animated network metrics.

use clap::Parser;
use eframe::egui;

use route_atlas::anim::{Clock, SystemClock};
use route_atlas::cli::Cli;
use route_atlas::data::Dataset;
use route_atlas::state::{AppEvent, AppState, AtlasSettings};
use route_atlas::ui;

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let settings = match &cli.settings {
        Some(path) => AtlasSettings::load(path),
        None => AtlasSettings::default(),
    };

    let dataset = match &cli.dataset {
        Some(path) => Dataset::load(path).unwrap_or_else(|e| {
            log::error!("Failed to load dataset: {}; using demo network", e);
            Dataset::demo()
        }),
        None => {
            log::info!("No dataset given, using demo network");
            Dataset::demo()
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 820.0])
            .with_min_inner_size([900.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Route Atlas",
        native_options,
        Box::new(|_cc| Ok(Box::new(AtlasApp::new(dataset, settings)))),
    )
}

/// Main application state and logic.
struct AtlasApp {
    state: AppState,
    clock: SystemClock,
}

impl AtlasApp {
    fn new(dataset: Dataset, settings: AtlasSettings) -> Self {
        log::info!("Starting with {}", dataset.summary());
        Self {
            state: AppState::new(dataset, settings),
            clock: SystemClock::new(),
        }
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.refresh(self.clock.now_ms());
        let frame = self.state.frame();

        let mut events: Vec<AppEvent> = Vec::new();

        // Side panels must be added before the central panel
        ui::render_top_bar(ctx, &self.state, &mut events);
        ui::render_left_panel(ctx, &self.state, &frame, &mut events);
        ui::render_right_panel(ctx, &self.state, &frame);
        ui::render_canvas(ctx, &self.state, &frame, &mut events);

        let changed = !events.is_empty();
        for event in events {
            if let Err(e) = self.state.apply(event) {
                log::debug!("Event rejected: {}", e);
            }
        }

        // Draw state changes and in-flight KPI transitions on the next frame
        if changed || self.state.needs_repaint() {
            ctx.request_repaint();
        }
    }
}
