use tracing::trace;

use super::element::Element;
use super::event::{Event, EventPhase};

/// Runs the capture, target and bubble phases over `target` and its
/// ancestors. Returns false when a listener cancelled the event.
pub(crate) fn dispatch(target: &Element, event: Event) -> bool {
    let path = target.inclusive_ancestors();
    event.begin_dispatch(target);

    for node in path.iter().skip(1).rev() {
        if event.propagation_stopped() {
            break;
        }
        invoke(node, &event, EventPhase::Capturing);
    }

    if !event.propagation_stopped() {
        invoke(target, &event, EventPhase::AtTarget);
    }

    if event.bubbles() {
        for node in path.iter().skip(1) {
            if event.propagation_stopped() {
                break;
            }
            invoke(node, &event, EventPhase::Bubbling);
        }
    }

    event.end_dispatch();
    !event.default_prevented()
}

fn invoke(node: &Element, event: &Event, phase: EventPhase) {
    event.enter(node, phase);
    // Snapshot so listeners can add or remove listeners on this node.
    for listener in node.listeners_for(event.event_type(), phase) {
        if listener.is_removed() {
            continue;
        }
        if listener.once() {
            node.remove_event_listener(listener.id());
        }
        trace!(
            target: "synthetic_events",
            event = event.event_type(),
            node = node.local_name(),
            ?phase,
            "invoking listener"
        );
        listener.invoke(event);
        if event.immediate_propagation_stopped() {
            break;
        }
    }
}
