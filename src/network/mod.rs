//! HTTP networking module
//!
//! Defines the transport boundary engines talk to, and the reqwest-backed
//! client that implements it.

mod client;
mod transport;
mod user_agent;

pub use client::HttpClient;
pub use transport::{Transport, TransportResponse};
pub use user_agent::random_user_agent;
