//! Batched reply delivery.
//!
//! Groups a sequence of pre-rendered text lines into fixed-size batches and hands each
//! batch to a send capability as one joined message, preserving input order. This is the
//! delivery path for roster listings too long to send as a single message.

use std::future::Future;

use tracing::debug;

use crate::error::Result;

/// Lines per outbound message.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Join token between the lines of one message. HTML-rendering chat clients display it
/// as a line break; it is part of the rendered wire contract.
pub const LINE_SEPARATOR: &str = "<br>";

/// Sends `lines` as the fewest messages of at most [`DEFAULT_BATCH_SIZE`] lines each,
/// joined with [`LINE_SEPARATOR`]. See [`send_in_batches_with`].
pub async fn send_in_batches<I, F, Fut>(lines: I, send: F) -> Result<()>
where
    I: IntoIterator<Item = String>,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    send_in_batches_with(lines, DEFAULT_BATCH_SIZE, LINE_SEPARATOR, send).await
}

/// Consumes `lines` in order, flushing one message to `send` every `max_batch_size`
/// lines and once more for a non-empty remainder. Invokes `send` exactly
/// `ceil(n / max_batch_size)` times for `n` lines; zero times for empty input.
///
/// A failed send propagates immediately: remaining lines are not sent and the failed
/// batch is not kept for retry. `max_batch_size` must be at least 1.
pub async fn send_in_batches_with<I, F, Fut>(
    lines: I,
    max_batch_size: usize,
    separator: &str,
    mut send: F,
) -> Result<()>
where
    I: IntoIterator<Item = String>,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    debug_assert!(max_batch_size > 0, "batch size must be positive");

    let mut batch: Vec<String> = Vec::with_capacity(max_batch_size);
    for line in lines {
        batch.push(line);

        if batch.len() == max_batch_size {
            debug!(lines = batch.len(), "step: flushing full batch");
            send(batch.join(separator)).await?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        debug!(lines = batch.len(), "step: flushing final batch");
        send(batch.join(separator)).await?;
    }

    Ok(())
}
