//! Terminal frontend for the lot drawer

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::{run, App, SessionOutcome};
pub use theme::Theme;
