//! Everything that touches the outside world: threads, stdin/stdout, logging, config.
mod app;
pub mod config;
mod effects;
pub mod logging;
mod ui;

pub use app::run_app;
