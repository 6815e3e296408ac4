use std::str::FromStr;

use serde_json::Value as JsonValue;

use super::api::EventSynthesizer;
use super::errors::FireEventError;
use crate::catalog::{AliasKey, EventCatalog, EventKey};
use crate::dom::Element;

/// Canonical key for a catalog or alias name.
pub fn resolve_name(catalog: &EventCatalog, name: &str) -> Option<EventKey> {
    EventKey::from_str(name)
        .ok()
        .or_else(|| AliasKey::from_str(name).ok().map(|alias| catalog.resolve_alias(alias)))
}

impl<'c> EventSynthesizer<'c> {
    /// Same arguments and result as firing the alias's canonical key.
    pub fn fire_alias(
        &self,
        alias: AliasKey,
        node: Option<&Element>,
        init: Option<JsonValue>,
    ) -> Result<bool, FireEventError> {
        self.fire(self.catalog().resolve_alias(alias), node, init)
    }

    /// Fire by catalog or alias name, e.g. `"keyDown"` or `"doubleClick"`.
    pub fn fire_by_name(
        &self,
        name: &str,
        node: Option<&Element>,
        init: Option<JsonValue>,
    ) -> Result<bool, FireEventError> {
        let key = resolve_name(self.catalog(), name)
            .ok_or_else(|| FireEventError::UnknownEvent(name.to_string()))?;
        self.fire(key, node, init)
    }
}
