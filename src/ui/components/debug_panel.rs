//! Debug panel component
//!
//! Displays internal state information for debugging.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, ScrollArea};

/// Debug panel component
pub struct DebugPanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> DebugPanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new("Debug Panel")
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.separator();

                    egui::Grid::new("debug_stats")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            self.stat_row(ui, "Submission", &self.submission_status());
                            self.stat_row(ui, "Active request", &self.active_request());
                            self.stat_row(ui, "Dispatcher", &self.state.debug_info.dispatcher_status);
                            self.stat_row(ui, "Narrator", &self.state.debug_info.narrator_status);
                        });

                    if let Some(error) = &self.state.last_error {
                        ui.add_space(self.theme.spacing_sm);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("⚠").color(self.theme.error));
                            ui.label(RichText::new(error).size(12.0).color(self.theme.error));
                        });
                    }

                    ui.add_space(self.theme.spacing_sm);
                    ui.separator();

                    ui.label(
                        RichText::new("Recent Logs")
                            .size(12.0)
                            .strong()
                            .color(self.theme.text_secondary),
                    );

                    ScrollArea::vertical()
                        .id_salt("debug_logs")
                        .max_height(160.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for message in &self.state.debug_info.log_messages {
                                ui.label(
                                    RichText::new(message)
                                        .size(11.0)
                                        .family(egui::FontFamily::Monospace)
                                        .color(self.theme.text_muted),
                                );
                            }
                        });
                });
            });
    }

    fn submission_status(&self) -> String {
        if self.state.is_busy() {
            "Busy".to_string()
        } else {
            "Idle".to_string()
        }
    }

    fn active_request(&self) -> String {
        self.state
            .active_request
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string())
    }

    fn stat_row(&self, ui: &mut egui::Ui, label: &str, value: &str) {
        ui.label(
            RichText::new(label)
                .size(12.0)
                .color(self.theme.text_muted),
        );
        ui.label(
            RichText::new(value)
                .size(12.0)
                .family(egui::FontFamily::Monospace)
                .color(self.theme.text_secondary),
        );
        ui.end_row();
    }
}
