use std::fmt;

use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::debug;

use crate::catalog::EventSpec;
use crate::dom::coerce::is_truthy;
use crate::dom::{Environment, Event, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionStrategy {
    /// `new <Class>(type, init)`.
    Direct,
    /// `document.createEvent(<Class>)` followed by `initEvent`.
    Legacy,
}

impl fmt::Display for ConstructionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// How a realm turns a catalog entry and a target-free init into an event.
pub trait EventBuilder {
    fn strategy(&self) -> ConstructionStrategy;

    /// Interface the event will be created as in `window`.
    fn resolve_class<'s>(&self, window: &Window, spec: &'s EventSpec) -> &'s str;

    fn construct(
        &self,
        window: &Window,
        spec: &EventSpec,
        event_type: &str,
        init: JsonMap<String, JsonValue>,
    ) -> Event;
}

/// Picks the strategy for a realm. Realms exposing any event constructor
/// construct directly; realms with none go through the legacy initializer.
pub fn select_builder(environment: &Environment) -> Box<dyn EventBuilder> {
    if !environment.event_constructors.is_empty() {
        Box::new(DirectConstruction)
    } else {
        Box::new(LegacyInitializer)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectConstruction;

impl EventBuilder for DirectConstruction {
    fn strategy(&self) -> ConstructionStrategy {
        ConstructionStrategy::Direct
    }

    /// The catalog class when exposed, else `Event`. With neither exposed the
    /// event is created as the catalog class through the legacy path.
    fn resolve_class<'s>(&self, window: &Window, spec: &'s EventSpec) -> &'s str {
        if window.exposes_event_constructor(spec.class()) {
            spec.class()
        } else if window.exposes_event_constructor("Event") {
            "Event"
        } else {
            spec.class()
        }
    }

    fn construct(
        &self,
        window: &Window,
        spec: &EventSpec,
        event_type: &str,
        init: JsonMap<String, JsonValue>,
    ) -> Event {
        if window.exposes_event_constructor(spec.class())
            || window.exposes_event_constructor("Event")
        {
            return Event::construct(self.resolve_class(window, spec), event_type, init);
        }
        debug!(
            target: "synthetic_events",
            class = spec.class(),
            "no constructor for class or Event, initializing instead"
        );
        LegacyInitializer.construct(window, spec, event_type, init)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyInitializer;

impl EventBuilder for LegacyInitializer {
    fn strategy(&self) -> ConstructionStrategy {
        ConstructionStrategy::Legacy
    }

    fn resolve_class<'s>(&self, _window: &Window, spec: &'s EventSpec) -> &'s str {
        spec.class()
    }

    fn construct(
        &self,
        window: &Window,
        spec: &EventSpec,
        event_type: &str,
        mut init: JsonMap<String, JsonValue>,
    ) -> Event {
        let mut event = window.create_event(spec.class());
        let bubbles = is_truthy(init.remove("bubbles").as_ref());
        let cancelable = is_truthy(init.remove("cancelable").as_ref());
        let detail = init.remove("detail");
        event.init_event(event_type, bubbles, cancelable, detail);
        for (name, value) in init {
            event.set_property(&name, value);
        }
        event
    }
}
