//! Type definitions for lotsize

mod error;
mod lot;

pub use error::*;
pub use lot::*;
