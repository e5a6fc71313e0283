//! UI components for Herald
//!
//! This module contains the reusable pieces of the single screen.

mod debug_panel;
mod input_bar;
mod response_panel;
mod shortcut_bar;

pub use debug_panel::DebugPanel;
pub use input_bar::InputBar;
pub use response_panel::{ResponsePanel, BUSY_STATUS};
pub use shortcut_bar::{ShortcutBar, SHORTCUTS};
