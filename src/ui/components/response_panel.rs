//! Response panel component
//!
//! Shows a transient status while a submission is in flight; otherwise
//! the transcript (only when non-empty) and the assistant reply.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Transient status shown in place of transcript and reply while busy
pub const BUSY_STATUS: &str = "🕐 Listening or processing...";

/// Response panel component
pub struct ResponsePanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> ResponsePanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if self.state.is_busy() {
                            self.show_busy_status(ui);
                        } else {
                            self.show_result(ui);
                        }
                    });
            });
    }

    fn show_busy_status(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new(BUSY_STATUS)
                .italics()
                .color(self.theme.text_muted),
        );
    }

    fn show_result(&self, ui: &mut egui::Ui) {
        if !self.state.transcript.is_empty() {
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    RichText::new("You said:")
                        .strong()
                        .color(self.theme.text_muted),
                );
                ui.label(
                    RichText::new(&self.state.transcript).color(self.theme.text_secondary),
                );
            });

            ui.add_space(self.theme.spacing_sm);
        }

        ui.horizontal_wrapped(|ui| {
            ui.label(
                RichText::new("Assistant:")
                    .strong()
                    .color(self.theme.primary),
            );
            ui.label(
                RichText::new(&self.state.assistant_reply).color(self.theme.text_primary),
            );
        });
    }
}
