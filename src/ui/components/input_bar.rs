//! Input bar component
//!
//! Text entry, send control, and the microphone trigger. None of the
//! affordances is disabled while a submission is in flight; new
//! submissions are allowed and stale results are discarded upstream.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Input bar component for text and microphone submissions
pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_text_input(ui);

                    ui.add_space(self.theme.spacing_sm);

                    self.show_send_button(ui);

                    ui.add_space(self.theme.spacing_sm);

                    self.show_mic_button(ui);
                });
            });
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        // Reserve space for the send and mic buttons
        let available_width = ui.available_width() - 120.0;

        let text_edit = egui::TextEdit::singleline(&mut self.state.command_text)
            .hint_text("e.g. \"time\" or \"play shape of you\"")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        let response = ui.add(text_edit);

        // Enter submits even when empty so the instructional hint shows
        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            self.state.submit(false);
            response.request_focus();
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(RichText::new("➤").size(18.0).color(egui::Color32::WHITE))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding)
            .fill(self.theme.primary);

        let response = ui.add(button);

        if response.clicked() {
            self.state.submit(false);
        }

        response.on_hover_text("Send command (Enter)");
    }

    fn show_mic_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(RichText::new("🎤").size(20.0).color(self.theme.primary))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding)
            .fill(self.theme.bg_tertiary);

        let response = ui.add(button);

        if response.clicked() {
            self.state.submit(true);
        }

        response.on_hover_text("Speak a command");
    }
}
