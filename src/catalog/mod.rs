//! The event catalog: which native class each event key constructs and the
//! init fields it starts from.

mod keys;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error;

pub use keys::{AliasKey, EventKey, UnknownKey};
pub(crate) use keys::{with_alias_keys, with_event_keys};

const BUILTIN_CATALOG: &str = include_str!("events.yaml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read event catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("event catalog has no entry for \"{0}\"")]
    MissingEvent(EventKey),
    #[error("event catalog has no target for alias \"{0}\"")]
    MissingAlias(AliasKey),
}

/// Native event class plus the init fields every event of this kind starts from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventSpec {
    class: String,
    #[serde(default, rename = "init")]
    default_init: JsonMap<String, JsonValue>,
}

impl EventSpec {
    pub fn new(class: impl Into<String>, default_init: JsonMap<String, JsonValue>) -> Self {
        Self {
            class: class.into(),
            default_init,
        }
    }

    /// Name of the DOM interface, e.g. `MouseEvent`.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn default_init(&self) -> &JsonMap<String, JsonValue> {
        &self.default_init
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    events: HashMap<EventKey, EventSpec>,
    #[serde(default)]
    aliases: HashMap<AliasKey, EventKey>,
}

/// Read-only lookup tables indexed by [`EventKey`] and [`AliasKey`].
#[derive(Debug, Clone)]
pub struct EventCatalog {
    specs: Vec<EventSpec>,
    aliases: Vec<EventKey>,
}

impl EventCatalog {
    /// The catalog shipped with the crate, parsed on first use.
    pub fn builtin() -> &'static EventCatalog {
        static BUILTIN: OnceLock<EventCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            EventCatalog::from_yaml_str(BUILTIN_CATALOG).expect("built-in event catalog is valid")
        })
    }

    /// Load a catalog from `config_path` when it exists, otherwise use the built-in one.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, CatalogError> {
        match config_path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)?;
                Self::from_yaml_str(&contents)
            }
            _ => Ok(Self::builtin().clone()),
        }
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let mut file: CatalogFile = serde_yaml::from_str(contents)?;

        let specs = EventKey::ALL
            .iter()
            .map(|key| {
                file.events
                    .remove(key)
                    .ok_or(CatalogError::MissingEvent(*key))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let aliases = AliasKey::ALL
            .iter()
            .map(|alias| {
                file.aliases
                    .remove(alias)
                    .ok_or(CatalogError::MissingAlias(*alias))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { specs, aliases })
    }

    pub fn spec(&self, key: EventKey) -> &EventSpec {
        &self.specs[key.index()]
    }

    pub fn resolve_alias(&self, alias: AliasKey) -> EventKey {
        self.aliases[alias.index()]
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (EventKey, &EventSpec)> + '_ {
        EventKey::ALL.iter().map(move |key| (*key, self.spec(*key)))
    }

    pub fn aliases(&self) -> impl Iterator<Item = (AliasKey, EventKey)> + '_ {
        AliasKey::ALL
            .iter()
            .map(move |alias| (*alias, self.resolve_alias(*alias)))
    }
}
