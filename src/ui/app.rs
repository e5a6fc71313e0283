//! Main application struct and eframe integration
//!
//! This module contains the HeraldApp that implements eframe::App and
//! wires the dispatcher and narrator pipelines to the UI state.

use crate::config::HeraldConfig;
use crate::dispatch::{DispatchCommand, DispatchPipeline};
use crate::speech::{NarratorCommand, NarratorPipeline, SystemSpeech};
use crate::ui::components::{DebugPanel, InputBar, ResponsePanel, ShortcutBar};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::time::Duration;
use tracing::{error, warn};

/// Main Herald application
pub struct HeraldApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    /// Whether the first-frame setup has run
    initialized: bool,
}

impl HeraldApp {
    /// Create a new Herald application with the default configuration
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(cc, HeraldConfig::default())
    }

    /// Create a new Herald application with a custom configuration
    pub fn with_config(cc: &eframe::CreationContext<'_>, config: HeraldConfig) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        if let Err(e) = config.validate() {
            warn!("Invalid configuration: {}", e);
        }

        let mut state = AppState::new();

        let dispatch = DispatchPipeline::new(config.backend.clone());
        let dispatch_tx = dispatch.command_sender();
        let dispatch_rx = dispatch.event_receiver();
        if let Err(e) = dispatch.start_worker() {
            error!("Failed to start dispatcher pipeline: {}", e);
        }
        state.attach_dispatch(dispatch_tx, dispatch_rx);

        let narrator = NarratorPipeline::new(config.narrator.clone());
        let narrator_tx = narrator.command_sender();
        let narrator_rx = narrator.event_receiver();
        if let Err(e) = narrator.start_worker(Box::new(SystemSpeech::new())) {
            error!("Failed to start narrator pipeline: {}", e);
        }
        state.attach_narrator(narrator_tx, narrator_rx);

        Self {
            state,
            theme,
            initialized: false,
        }
    }

    /// First-frame setup: commit the greeting so it is narrated
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.state.greet();
        self.state
            .debug_info
            .add_log("Herald UI initialized".to_string());
        self.initialized = true;
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("🎤 Herald")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("Voice Assistant")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🔍").on_hover_text("Toggle Debug Panel").clicked() {
                            self.state.show_debug_panel = !self.state.show_debug_panel;
                        }
                    });
                });
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    ShortcutBar::new(&mut self.state, &self.theme).show(ui);

                    ui.add_space(self.theme.spacing_sm);

                    InputBar::new(&mut self.state, &self.theme).show(ui);
                });
            });
    }

    fn show_debug_panel(&mut self, ctx: &egui::Context) {
        if !self.state.show_debug_panel {
            return;
        }

        SidePanel::right("debug_panel")
            .resizable(true)
            .default_width(300.0)
            .min_width(250.0)
            .max_width(500.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                DebugPanel::new(&self.state, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new("Type a command or use your microphone")
                            .size(13.0)
                            .color(self.theme.text_muted),
                    );

                    ui.add_space(self.theme.spacing_sm);

                    ResponsePanel::new(&self.state, &self.theme).show(ui);
                });
            });
    }
}

impl eframe::App for HeraldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.initialize();

        // Drain pipeline events
        self.state.poll_events();

        self.show_header(ctx);
        self.show_debug_panel(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // Keep polling while a submission is outstanding; otherwise a
        // slow idle tick is enough to pick up narrator events
        if self.state.is_busy() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(tx) = &self.state.dispatch_tx {
            let _ = tx.send(DispatchCommand::Shutdown);
        }
        if let Some(tx) = &self.state.narrator_tx {
            let _ = tx.send(NarratorCommand::Shutdown);
        }
    }
}
