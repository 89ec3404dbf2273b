//! Error types for search adapters
//!
//! Only transport faults are meant to reach callers of `Engine::search`.
//! Everything else a backend can do wrong degrades to an empty result list.

/// Errors raised by the adapter layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP client failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-reqwest transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A selector in an engine's selector table did not parse.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// No built-in engine matches the requested type.
    #[error("unknown engine type: {0}")]
    UnknownEngine(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error came from the transport boundary.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Transport(_))
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
