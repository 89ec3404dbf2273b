//! Search engine module
//!
//! Defines the Engine contract, the selector-table interpreter shared by
//! markup backends, and the registry holding loaded engines.

mod loader;
mod registry;
mod selectors;
mod traits;

// Engine implementations
pub mod baidu;
pub mod sogou;

pub use loader::EngineLoader;
pub use registry::EngineRegistry;
pub use selectors::{Extract, Field, SelectorTable, SelectorTableBuilder};
pub use traits::*;
