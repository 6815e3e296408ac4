use serde_json::{Map as JsonMap, Value as JsonValue};

use super::coerce::to_dom_string;

const DROP_EFFECTS: &[&str] = &["none", "copy", "link", "move"];
const EFFECTS_ALLOWED: &[&str] = &[
    "none",
    "copy",
    "copyLink",
    "copyMove",
    "link",
    "linkMove",
    "move",
    "all",
    "uninitialized",
];

/// The `dataTransfer` carried by drag and clipboard events.
///
/// Realms without a `DataTransfer` constructor get the caller's plain object
/// attached as-is, so assertions read the same property either way.
#[derive(Debug, Clone, PartialEq)]
pub enum DataTransfer {
    Native(NativeDataTransfer),
    Plain(JsonMap<String, JsonValue>),
}

impl DataTransfer {
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    pub fn get(&self, name: &str) -> Option<JsonValue> {
        match self {
            Self::Native(native) => native.get(name),
            Self::Plain(fields) => fields.get(name).cloned(),
        }
    }

    /// The `files` list, empty when absent.
    pub fn files(&self) -> Vec<JsonValue> {
        match self.get("files") {
            Some(JsonValue::Array(files)) => files,
            _ => Vec::new(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Native(native) => native.to_json(),
            Self::Plain(fields) => JsonValue::Object(fields.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NativeDataTransfer {
    drop_effect: String,
    effect_allowed: String,
    overrides: JsonMap<String, JsonValue>,
}

impl Default for NativeDataTransfer {
    fn default() -> Self {
        Self {
            drop_effect: "none".to_string(),
            effect_allowed: "none".to_string(),
            overrides: JsonMap::new(),
        }
    }
}

impl NativeDataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy caller fields onto the object. `dropEffect` and `effectAllowed`
    /// go through their setters (unknown keywords are ignored); read-only
    /// attributes such as `files` and `types` are overridden by own values.
    pub fn assign(&mut self, fields: JsonMap<String, JsonValue>) {
        for (name, value) in fields {
            match name.as_str() {
                "dropEffect" => {
                    let effect = to_dom_string(&value);
                    if DROP_EFFECTS.contains(&effect.as_str()) {
                        self.drop_effect = effect;
                    }
                }
                "effectAllowed" => {
                    let effect = to_dom_string(&value);
                    if EFFECTS_ALLOWED.contains(&effect.as_str()) {
                        self.effect_allowed = effect;
                    }
                }
                _ => {
                    self.overrides.insert(name, value);
                }
            }
        }
    }

    pub fn drop_effect(&self) -> &str {
        &self.drop_effect
    }

    pub fn effect_allowed(&self) -> &str {
        &self.effect_allowed
    }

    pub fn get(&self, name: &str) -> Option<JsonValue> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        match name {
            "dropEffect" => Some(JsonValue::String(self.drop_effect.clone())),
            "effectAllowed" => Some(JsonValue::String(self.effect_allowed.clone())),
            // A synthetic transfer carries no drag data store of its own.
            "files" | "items" | "types" => Some(JsonValue::Array(Vec::new())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let mut object = JsonMap::new();
        for name in ["dropEffect", "effectAllowed", "files", "items", "types"] {
            if let Some(value) = self.get(name) {
                object.insert(name.to_string(), value);
            }
        }
        for (name, value) in &self.overrides {
            object.insert(name.clone(), value.clone());
        }
        JsonValue::Object(object)
    }
}
