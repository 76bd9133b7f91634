#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![forbid(unsafe_code)]

pub mod api;
pub mod client;
mod config;
pub mod service;

pub use client::OvhClient;
pub use config::{
    ClientConfig, ConfigError, DebugConfig, DynAppConfig, InvalidEndpoint, NamedEndpoint,
    OvhEndpoint,
};
pub use service::{ProjectId, SearchCriteria};

pub use async_trait;
pub use tokio;
pub use tracing;
