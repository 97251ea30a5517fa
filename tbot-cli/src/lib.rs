//! # tbot-cli
//!
//! CLI foundation: argument parsing, environment config, wiring of store, object store, gateway
//! and handler chain.

pub mod app;
pub mod cli;
pub mod config;

pub use app::{build_handler_chain, run};
pub use cli::{Cli, Commands};
pub use config::AppConfig;
