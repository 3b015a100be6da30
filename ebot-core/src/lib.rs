//! # ebot-core
//!
//! Core types and traits for the echo bot: the [`Bot`] send capability, the [`Directory`]
//! roster-lookup capability, the activity wire model, batched reply delivery, and tracing
//! initialization. Transport-agnostic; used by ebot-connector and activity-router.

pub mod batch;
pub mod bot;
pub mod directory;
pub mod error;
pub mod logger;
pub mod mention;
pub mod types;

pub use batch::{send_in_batches, send_in_batches_with, DEFAULT_BATCH_SIZE, LINE_SEPARATOR};
pub use bot::Bot;
pub use directory::Directory;
pub use error::{EbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Activity, ActivityKind, ChannelAccount, ChannelInfo, ConversationAccount, Entity, Member,
    TeamDetails,
};
