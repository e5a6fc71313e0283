//! GUI implementation with egui/eframe
//!
//! This module provides the single-screen user interface for Herald.

mod app;
pub mod components;
mod state;
mod theme;

pub use app::HeraldApp;
pub use state::{AppState, DebugInfo, SubmissionState};
pub use theme::Theme;

/// Run the Herald application
pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([400.0, 480.0])
            .with_title("Herald"),
        ..Default::default()
    };

    eframe::run_native(
        "Herald",
        options,
        Box::new(|cc| Ok(Box::new(HeraldApp::new(cc)))),
    )
}
