//! lotsize: lot-size drawer for a seller catalogue
//!
//! A lot records, per size, how many sets were made and their gross and net
//! weight. [`services::LotSizeAggregator`] keeps the rows, derives per-set
//! averages and totals, and keeps sizes unique; [`services::LotDrawer`] wraps
//! it in the open/closed lifecycle a host drives; [`tui`] is a terminal host.

pub mod logging;
pub mod services;
pub mod tui;
pub mod types;
