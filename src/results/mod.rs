//! Result types produced by every engine
//!
//! Engines normalize whatever their backend returns into [`TextResult`] values.

mod types;

pub use types::*;
