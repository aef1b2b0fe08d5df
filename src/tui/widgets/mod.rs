//! TUI widgets

pub mod help;
pub mod lot_table;
pub mod notice;
pub mod size_picker;
pub mod size_summary;
