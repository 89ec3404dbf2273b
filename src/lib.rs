//! Search Adapters: one engine contract over heterogeneous web search backends
//!
//! Every backend is an [`Engine`] that builds a request payload, issues it
//! through a [`Transport`](network::Transport), and turns the response into
//! normalized [`TextResult`] values. Backends that are blocked or return
//! garbage degrade to zero results instead of failing the caller.

pub mod config;
pub mod engines;
pub mod error;
pub mod logging;
pub mod network;
pub mod query;
pub mod results;

pub use config::Settings;
pub use engines::{Engine, EngineLoader, EngineRegistry};
pub use error::{Error, Result};
pub use network::{HttpClient, Transport};
pub use query::{SafeSearch, SearchRequest, TimeRange};
pub use results::TextResult;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
