//! Replaying recorded actions.
//!
//! A recording is JSON lines: one wire action per line, blank lines ignored.

use crate::types::TodoAction;
use crate::view::TodoStore;
use anyhow::Context;
use redux_lite_core::Action;
use std::io::BufRead;

/// Decode one line of a recording
///
/// # Errors
///
/// Returns an error if the line is not a valid wire action.
pub fn parse_action(line: &str) -> anyhow::Result<TodoAction> {
    serde_json::from_str(line).with_context(|| format!("invalid action: {line}"))
}

/// Dispatch every action in `reader` to `store`, in order
///
/// Returns the number of actions dispatched. Stops at the first line that
/// cannot be read, decoded or dispatched.
///
/// # Errors
///
/// Returns an error naming the offending line number.
pub fn replay<B: BufRead>(store: &TodoStore, reader: B) -> anyhow::Result<usize> {
    let mut dispatched = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let action = parse_action(&line).with_context(|| format!("line {line_number}"))?;
        tracing::debug!(line = line_number, action_type = action.action_type(), "Replaying");
        store
            .dispatch(action)
            .with_context(|| format!("line {line_number}"))?;
        dispatched += 1;
    }

    tracing::info!(dispatched, "Replay complete");
    Ok(dispatched)
}
