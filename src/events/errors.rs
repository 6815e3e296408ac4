use thiserror::Error;

/// Failures surfaced to the test author. None are recovered from internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireEventError {
    #[error("Unable to fire an event - please provide an event object.")]
    MissingEvent,
    #[error("Unable to fire a \"{event_type}\" event - please provide a DOM element.")]
    MissingTarget { event_type: String },
    #[error("The given element does not have a value setter")]
    UnsupportedTarget,
    #[error("unknown event name \"{0}\"")]
    UnknownEvent(String),
}
