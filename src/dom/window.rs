use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::document::Document;
use super::element::Element;
use super::event::Event;
use super::interface::{interface_for_tag, native_interfaces, Interface};
use crate::events::builder::{select_builder, EventBuilder};

const MODERN_EVENT_CONSTRUCTORS: &[&str] = &[
    "Event",
    "CustomEvent",
    "UIEvent",
    "MouseEvent",
    "KeyboardEvent",
    "FocusEvent",
    "InputEvent",
    "CompositionEvent",
    "ClipboardEvent",
    "DragEvent",
    "PointerEvent",
    "WheelEvent",
    "TouchEvent",
    "AnimationEvent",
    "TransitionEvent",
    "ProgressEvent",
];

/// jsdom ships neither drag, clipboard, pointer, animation nor transition events.
const JSDOM_EVENT_CONSTRUCTORS: &[&str] = &[
    "Event",
    "CustomEvent",
    "UIEvent",
    "MouseEvent",
    "KeyboardEvent",
    "FocusEvent",
    "InputEvent",
    "CompositionEvent",
    "WheelEvent",
    "TouchEvent",
    "ProgressEvent",
];

/// Which globals a realm exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    /// Event interfaces callable with `new`.
    #[serde(default)]
    pub event_constructors: BTreeSet<String>,
    /// Whether `new DataTransfer()` is available.
    #[serde(default)]
    pub data_transfer: bool,
}

impl Environment {
    /// A current browser.
    pub fn modern() -> Self {
        Self::with_constructors("modern", MODERN_EVENT_CONSTRUCTORS, true)
    }

    /// A headless DOM such as jsdom.
    pub fn jsdom() -> Self {
        Self::with_constructors("jsdom", JSDOM_EVENT_CONSTRUCTORS, false)
    }

    /// No constructible events at all; only `document.createEvent` + `initEvent`.
    pub fn legacy() -> Self {
        Self::with_constructors("legacy", &[], false)
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "jsdom" => Some(Self::jsdom()),
            "legacy" => Some(Self::legacy()),
            _ => None,
        }
    }

    pub fn has_event_constructor(&self, class: &str) -> bool {
        self.event_constructors.contains(class)
    }

    fn with_constructors(name: &str, constructors: &[&str], data_transfer: bool) -> Self {
        Self {
            name: name.to_string(),
            event_constructors: constructors.iter().map(|c| c.to_string()).collect(),
            data_transfer,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::modern()
    }
}

/// A realm: owns the interface prototypes and the event construction
/// strategy, which is picked once from the environment.
pub struct Window {
    environment: Environment,
    interfaces: HashMap<String, Rc<Interface>>,
    builder: Box<dyn EventBuilder>,
}

impl Window {
    pub fn new(environment: Environment) -> Rc<Self> {
        let builder = select_builder(&environment);
        Rc::new(Self {
            environment,
            interfaces: native_interfaces(),
            builder,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn exposes_event_constructor(&self, class: &str) -> bool {
        self.environment.has_event_constructor(class)
    }

    pub fn has_data_transfer_constructor(&self) -> bool {
        self.environment.data_transfer
    }

    pub fn event_builder(&self) -> &dyn EventBuilder {
        self.builder.as_ref()
    }

    /// Prototype object for `name`, e.g. `HTMLInputElement`.
    pub fn interface(&self, name: &str) -> Option<Rc<Interface>> {
        self.interfaces.get(name).cloned()
    }

    /// `document.createElement(local_name)`.
    pub fn create_element(self: &Rc<Self>, local_name: &str) -> Element {
        let lowered = local_name.to_ascii_lowercase();
        let interface = Rc::clone(&self.interfaces[interface_for_tag(&lowered)]);
        Element::new(Rc::clone(self), &lowered, interface)
    }

    /// `document.createEvent(interface)`: an event awaiting `initEvent`.
    pub fn create_event(&self, interface: &str) -> Event {
        Event::uninitialized(interface)
    }

    pub fn parse_html(self: &Rc<Self>, html: &str) -> Document {
        Document::parse(self, html)
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("environment", &self.environment.name)
            .field("strategy", &self.builder.strategy())
            .finish()
    }
}

/// The realm owning `node`, used to look up constructors.
pub fn window_from_node(node: &Element) -> Rc<Window> {
    node.window()
}
