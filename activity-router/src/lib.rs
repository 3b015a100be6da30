//! # Activity router
//!
//! Routes each inbound activity to the handler registered for its kind. One handler per
//! kind plus an optional fallback; the first registration for a kind wins. Handler errors
//! propagate to the caller unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ebot_core::{Activity, ActivityKind, Result};
use tracing::{info, instrument, warn};

/// A handler for one kind of inbound activity.
#[async_trait]
pub trait ActivityHandler: Send + Sync {
    /// Processes one inbound activity.
    async fn handle(&self, activity: &Activity) -> Result<()>;
}

/// Outcome of a dispatch: whether any handler ran for the activity's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Unhandled,
}

/// Dispatch table from activity kind to handler, with an optional fallback for kinds
/// that have no dedicated registration.
#[derive(Clone, Default)]
pub struct ActivityRouter {
    routes: HashMap<ActivityKind, Arc<dyn ActivityHandler>>,
    fallback: Option<Arc<dyn ActivityHandler>>,
}

impl ActivityRouter {
    /// Creates an empty router (no routes, no fallback).
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: None,
        }
    }

    /// Registers a handler for an activity kind. The first registration for a kind wins;
    /// later registrations for the same kind are ignored.
    pub fn on(mut self, kind: ActivityKind, handler: Arc<dyn ActivityHandler>) -> Self {
        self.routes.entry(kind).or_insert(handler);
        self
    }

    /// Sets the handler used for kinds with no dedicated registration.
    pub fn fallback(mut self, handler: Arc<dyn ActivityHandler>) -> Self {
        self.fallback = Some(handler);
        self
    }

    /// Looks up the handler for the activity's kind (or the fallback) and runs it.
    /// Returns [`Dispatch::Unhandled`] when neither exists.
    #[instrument(skip(self, activity))]
    pub async fn dispatch(&self, activity: &Activity) -> Result<Dispatch> {
        info!(
            kind = %activity.kind,
            activity_id = ?activity.id,
            "step: dispatch started"
        );

        let handler = self.routes.get(&activity.kind).or(self.fallback.as_ref());
        let Some(handler) = handler else {
            warn!(kind = %activity.kind, "step: no handler registered, activity ignored");
            return Ok(Dispatch::Unhandled);
        };

        let name = std::any::type_name_of_val(handler.as_ref());
        info!(kind = %activity.kind, handler = %name, "step: handler selected");

        handler.handle(activity).await?;

        info!(kind = %activity.kind, handler = %name, "step: dispatch finished");
        Ok(Dispatch::Handled)
    }
}

// Unit/integration tests live in tests/activity_router_test.rs
