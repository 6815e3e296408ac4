use serde_json::Value as JsonValue;

use super::dispatch::dispatch_event;
use super::errors::FireEventError;
use super::factory::EventFactory;
use crate::catalog::{AliasKey, EventCatalog, EventKey};
use crate::dom::{Element, Event};

/// `create`/`fire` bound to one catalog.
#[derive(Debug, Clone, Copy)]
pub struct EventSynthesizer<'c> {
    catalog: &'c EventCatalog,
}

impl Default for EventSynthesizer<'static> {
    fn default() -> Self {
        Self::new(EventCatalog::builtin())
    }
}

impl<'c> EventSynthesizer<'c> {
    pub fn new(catalog: &'c EventCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c EventCatalog {
        self.catalog
    }

    /// Build the event for `key` without dispatching it. Target mutations
    /// requested by `init` are applied to `node` immediately.
    pub fn create(
        &self,
        key: EventKey,
        node: Option<&Element>,
        init: Option<JsonValue>,
    ) -> Result<Event, FireEventError> {
        EventFactory::new(self.catalog).build(key, node, init)
    }

    /// Build and dispatch; true unless a listener cancelled the event.
    pub fn fire(
        &self,
        key: EventKey,
        node: Option<&Element>,
        init: Option<JsonValue>,
    ) -> Result<bool, FireEventError> {
        let event = self.create(key, node, init)?;
        dispatch_event(node, Some(event))
    }
}

pub fn create<'a>(
    key: EventKey,
    node: impl Into<Option<&'a Element>>,
    init: Option<JsonValue>,
) -> Result<Event, FireEventError> {
    EventSynthesizer::default().create(key, node.into(), init)
}

pub fn fire<'a>(
    key: EventKey,
    node: impl Into<Option<&'a Element>>,
    init: Option<JsonValue>,
) -> Result<bool, FireEventError> {
    EventSynthesizer::default().fire(key, node.into(), init)
}

pub fn fire_alias<'a>(
    alias: AliasKey,
    node: impl Into<Option<&'a Element>>,
    init: Option<JsonValue>,
) -> Result<bool, FireEventError> {
    EventSynthesizer::default().fire_alias(alias, node.into(), init)
}

pub fn fire_by_name<'a>(
    name: &str,
    node: impl Into<Option<&'a Element>>,
    init: Option<JsonValue>,
) -> Result<bool, FireEventError> {
    EventSynthesizer::default().fire_by_name(name, node.into(), init)
}

macro_rules! define_create_functions {
    ($(($variant:ident, $label:literal, $snake:ident)),* $(,)?) => {
        $(
            #[doc = concat!("Build a `", $label, "` event without dispatching it.")]
            pub fn $snake<'a>(
                node: impl Into<Option<&'a Element>>,
                init: Option<JsonValue>,
            ) -> Result<Event, FireEventError> {
                super::create(EventKey::$variant, node, init)
            }
        )*
    };
}

macro_rules! define_fire_functions {
    ($(($variant:ident, $label:literal, $snake:ident)),* $(,)?) => {
        $(
            #[doc = concat!("Build and dispatch a `", $label, "` event.")]
            pub fn $snake<'a>(
                node: impl Into<Option<&'a Element>>,
                init: Option<JsonValue>,
            ) -> Result<bool, FireEventError> {
                super::fire(EventKey::$variant, node, init)
            }
        )*
    };
}

macro_rules! define_alias_fire_functions {
    ($(($variant:ident, $label:literal, $snake:ident)),* $(,)?) => {
        $(
            #[doc = concat!("`", $label, "`: forwards to the event the catalog aliases it to.")]
            pub fn $snake<'a>(
                node: impl Into<Option<&'a Element>>,
                init: Option<JsonValue>,
            ) -> Result<bool, FireEventError> {
                super::fire_alias(AliasKey::$variant, node, init)
            }
        )*
    };
}

/// One builder per catalog entry, using the built-in catalog.
pub mod create_event {
    use serde_json::Value as JsonValue;

    use super::FireEventError;
    use crate::catalog::{with_event_keys, EventKey};
    use crate::dom::{Element, Event};

    with_event_keys!(define_create_functions);
}

/// One build-and-dispatch function per catalog entry and alias, using the
/// built-in catalog.
pub mod fire_event {
    use serde_json::Value as JsonValue;

    use super::FireEventError;
    use crate::catalog::{with_alias_keys, with_event_keys, AliasKey, EventKey};
    use crate::dom::Element;

    with_event_keys!(define_fire_functions);
    with_alias_keys!(define_alias_fire_functions);
}
