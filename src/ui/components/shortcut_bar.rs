//! Shortcut bar component
//!
//! Three quick commands that replace the current text and submit
//! immediately.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Fixed shortcut commands: display label and submitted literal
pub const SHORTCUTS: [(&str, &str); 3] = [
    ("🕐 Time", "time"),
    ("📅 Date", "date"),
    ("📖 Wiki", "wikipedia India"),
];

/// Shortcut bar component
pub struct ShortcutBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ShortcutBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (label, command) in SHORTCUTS {
                let button = egui::Button::new(
                    RichText::new(label)
                        .size(13.0)
                        .color(self.theme.text_secondary),
                )
                .rounding(self.theme.button_rounding)
                .fill(self.theme.bg_tertiary);

                if ui.add(button).on_hover_text(command).clicked() {
                    self.state.submit_shortcut(command);
                }
            }
        });
    }
}
