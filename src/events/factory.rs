use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{debug, warn};

use super::errors::FireEventError;
use super::value::set_native_value;
use crate::catalog::{EventCatalog, EventKey};
use crate::dom::{
    window_from_node, DataTransfer, Element, Event, NativeDataTransfer, PropertyDescriptor, Window,
};

/// Builds catalog events for a target, applying the target mutations the
/// init payload asks for first.
#[derive(Debug, Clone, Copy)]
pub struct EventFactory<'c> {
    catalog: &'c EventCatalog,
}

impl<'c> EventFactory<'c> {
    pub fn new(catalog: &'c EventCatalog) -> Self {
        Self { catalog }
    }

    pub fn build(
        &self,
        key: EventKey,
        node: Option<&Element>,
        init: Option<JsonValue>,
    ) -> Result<Event, FireEventError> {
        let node = node.ok_or_else(|| FireEventError::MissingTarget {
            event_type: key.name().to_string(),
        })?;
        let spec = self.catalog.spec(key);

        let mut event_init = merge_init(spec.default_init(), init);
        if let Some(target) = event_init.remove("target") {
            apply_target_properties(node, target)?;
        }

        let window = window_from_node(node);
        let data_transfer = event_init.get("dataTransfer").cloned();
        let builder = window.event_builder();
        debug!(
            target: "synthetic_events",
            key = %key,
            class = builder.resolve_class(&window, spec),
            strategy = %builder.strategy(),
            "building event"
        );
        let mut event = builder.construct(&window, spec, &key.event_type(), event_init);

        match data_transfer {
            Some(JsonValue::Object(fields)) => {
                event.attach_data_transfer(data_transfer_for(&window, fields));
            }
            // Arrays are objects too; their own keys are the indices.
            Some(JsonValue::Array(items)) => {
                let fields = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect();
                event.attach_data_transfer(data_transfer_for(&window, fields));
            }
            _ => {}
        }

        Ok(event)
    }
}

/// Shallow merge; caller keys replace catalog defaults.
fn merge_init(
    defaults: &JsonMap<String, JsonValue>,
    init: Option<JsonValue>,
) -> JsonMap<String, JsonValue> {
    let mut merged = defaults.clone();
    match init {
        None | Some(JsonValue::Null) => {}
        Some(JsonValue::Object(fields)) => merged.extend(fields),
        Some(other) => {
            warn!(target: "synthetic_events", init = %other, "ignoring non-object event init");
        }
    }
    merged
}

fn apply_target_properties(node: &Element, target: JsonValue) -> Result<(), FireEventError> {
    let mut properties = match target {
        JsonValue::Object(properties) => properties,
        other => {
            debug!(target: "synthetic_events", target_init = %other, "ignoring non-object target init");
            return Ok(());
        }
    };

    if let Some(value) = properties.remove("value") {
        set_native_value(node, value)?;
    }
    // `files` is read-only on inputs, so it is redefined as an own data property.
    if let Some(files) = properties.remove("files") {
        node.define_own_property("files", PropertyDescriptor::data(files));
    }
    for (name, value) in properties {
        node.set(&name, value);
    }
    Ok(())
}

fn data_transfer_for(window: &Window, fields: JsonMap<String, JsonValue>) -> DataTransfer {
    if window.has_data_transfer_constructor() {
        let mut native = NativeDataTransfer::new();
        native.assign(fields);
        DataTransfer::Native(native)
    } else {
        DataTransfer::Plain(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Environment;
    use serde_json::json;

    #[test]
    fn caller_fields_override_defaults() {
        let JsonValue::Object(defaults) = json!({"bubbles": true, "button": 0}) else {
            unreachable!()
        };
        let merged = merge_init(&defaults, Some(json!({"button": 2, "shiftKey": true})));
        assert_eq!(
            JsonValue::Object(merged),
            json!({"bubbles": true, "button": 2, "shiftKey": true})
        );
    }

    #[test]
    fn non_object_init_contributes_nothing() {
        let JsonValue::Object(defaults) = json!({"bubbles": true}) else {
            unreachable!()
        };
        assert_eq!(merge_init(&defaults, Some(json!("oops"))), defaults);
        assert_eq!(merge_init(&defaults, Some(json!(null))), defaults);
        assert_eq!(merge_init(&defaults, None), defaults);
    }

    #[test]
    fn target_value_null_is_still_applied() {
        let window = Window::new(Environment::modern());
        let input = window.create_element("input");
        input.set("value", json!("before"));
        apply_target_properties(&input, json!({"value": null})).unwrap();
        assert_eq!(input.value().as_deref(), Some(""));
    }

    #[test]
    fn non_object_target_is_ignored() {
        let window = Window::new(Environment::modern());
        let input = window.create_element("input");
        apply_target_properties(&input, json!("nope")).unwrap();
        assert!(input.own_keys().is_empty());
    }

    #[test]
    fn value_without_setter_fails_before_other_properties() {
        let window = Window::new(Environment::modern());
        let div = window.create_element("div");
        let err = apply_target_properties(&div, json!({"value": "x", "title": "t"})).unwrap_err();
        assert_eq!(err, FireEventError::UnsupportedTarget);
        assert_eq!(div.get("title"), Some(json!("")));
    }
}
