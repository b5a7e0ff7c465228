//! Terminal User Interface components

mod app;
mod keyboard_visual;
pub mod theme;
mod widgets;

pub use app::{App, AppState, AppView, FeedbackEvent};
pub use keyboard_visual::{KeyHighlights, KeyLook, KeyboardVisual};
pub use theme::ThemeColors;
pub use widgets::*;
