use tracing::debug;

use super::errors::FireEventError;
use crate::dom::{Element, Event};

/// Dispatch `event` on `node`, returning false when a listener cancelled it.
pub fn dispatch_event(node: Option<&Element>, event: Option<Event>) -> Result<bool, FireEventError> {
    let event = event.ok_or(FireEventError::MissingEvent)?;
    let node = node.ok_or_else(|| FireEventError::MissingTarget {
        event_type: event.event_type().to_string(),
    })?;

    debug!(
        target: "synthetic_events",
        event = event.event_type(),
        node = node.local_name(),
        "dispatching event"
    );
    Ok(node.dispatch_event(event))
}
