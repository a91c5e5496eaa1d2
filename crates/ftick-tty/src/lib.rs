#![forbid(unsafe_code)]

//! Terminal host for the FrankenTicker engine.
//!
//! Parses the command line, takes over the terminal, lays `N` windows out
//! across it and drives `ftick-core` once per frame until the user quits.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod messages;
pub mod screen;
pub mod terminal;

pub use cli::run_from_env;
pub use error::{HostError, Result};
