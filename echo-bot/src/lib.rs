//! # echo-bot
//!
//! Sample bot application: echoes inbound messages and serves the roster commands
//! ("show members", "show channels", "show details") over a webhook endpoint. Wires
//! activity-router, ebot-connector, and the handlers; loads config from env and runs the
//! axum server.

pub mod cli;
pub mod handlers;
pub mod runner;
pub mod server;

pub use cli::{Cli, Commands};
pub use handlers::{EchoHandler, EventNoticeHandler};
pub use runner::run;
pub use server::{build_router, serve, AppState};
