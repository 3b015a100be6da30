//! Bot abstraction for sending outbound messages.
//!
//! [`Bot`] is transport-agnostic; the connector crate implements it against the
//! platform's REST surface, and tests substitute capture doubles.

use crate::error::Result;
use crate::types::Activity;
use async_trait::async_trait;

/// Capability to send text into a conversation. The inbound activity is the conversation
/// handle: implementations read the service URL and conversation id from it.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply into the conversation the activity arrived on, threaded to the
    /// activity where the transport supports it.
    async fn reply_to(&self, activity: &Activity, text: &str) -> Result<()>;

    /// Sends a standalone message to the activity's conversation.
    async fn send_to_conversation(&self, activity: &Activity, text: &str) -> Result<()>;
}
