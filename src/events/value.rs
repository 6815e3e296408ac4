use serde_json::Value as JsonValue;

use super::errors::FireEventError;
use crate::dom::Element;

/// Write `value` through the element's native `value` setter.
///
/// Frameworks such as React install their own `value` accessor on the
/// instance to track programmatic writes. Calling that one would only update
/// the tracker, so when the prototype's setter differs from the own setter
/// the prototype's is invoked with the element as receiver.
pub fn set_native_value(element: &Element, value: JsonValue) -> Result<(), FireEventError> {
    let value_setter = element
        .own_property_descriptor("value")
        .and_then(|descriptor| descriptor.setter().cloned());
    let prototype_value_setter = element
        .prototype()
        .own_property_descriptor("value")
        .and_then(|descriptor| descriptor.setter().cloned());

    match (prototype_value_setter, value_setter) {
        (Some(prototype_setter), own) if own.as_ref() != Some(&prototype_setter) => {
            prototype_setter.call(element, value);
            Ok(())
        }
        (_, Some(own_setter)) => {
            own_setter.call(element, value);
            Ok(())
        }
        _ => Err(FireEventError::UnsupportedTarget),
    }
}
