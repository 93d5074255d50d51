//! Domain layer for the static policy plugin.

pub mod client;
pub mod service;

pub use service::{PluginConfigError, Service};
