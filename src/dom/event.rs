use std::cell::{Cell, RefCell};

use serde_json::{Map as JsonMap, Value as JsonValue};

use super::coerce::is_truthy;
use super::data_transfer::DataTransfer;
use super::element::Element;

/// Attributes an `Event` exposes as getters only; assignments to them are dropped.
const READ_ONLY_ATTRIBUTES: &[&str] = &[
    "type",
    "target",
    "currentTarget",
    "srcElement",
    "eventPhase",
    "bubbles",
    "cancelable",
    "composed",
    "defaultPrevented",
    "isTrusted",
    "timeStamp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

#[derive(Debug)]
pub struct Event {
    interface: String,
    event_type: String,
    initialized: bool,
    bubbles: bool,
    cancelable: bool,
    composed: bool,
    fields: JsonMap<String, JsonValue>,
    data_transfer: Option<DataTransfer>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
    phase: Cell<EventPhase>,
    target: RefCell<Option<Element>>,
    current_target: RefCell<Option<Element>>,
}

impl Event {
    /// `new Event("name")`.
    pub fn new(event_type: &str) -> Self {
        Self::construct("Event", event_type, JsonMap::new())
    }

    /// `new <interface>(event_type, init)`: the init dictionary's
    /// `bubbles`, `cancelable` and `composed` become flags, every other
    /// member is kept as an init field.
    pub fn construct(
        interface: &str,
        event_type: &str,
        mut init: JsonMap<String, JsonValue>,
    ) -> Self {
        let bubbles = is_truthy(init.remove("bubbles").as_ref());
        let cancelable = is_truthy(init.remove("cancelable").as_ref());
        let composed = is_truthy(init.remove("composed").as_ref());
        let mut event = Self::uninitialized(interface);
        event.event_type = event_type.to_string();
        event.initialized = true;
        event.bubbles = bubbles;
        event.cancelable = cancelable;
        event.composed = composed;
        event.fields = init;
        event
    }

    /// Result of `document.createEvent(interface)` before `initEvent`.
    pub(crate) fn uninitialized(interface: &str) -> Self {
        Self {
            interface: interface.to_string(),
            event_type: String::new(),
            initialized: false,
            bubbles: false,
            cancelable: false,
            composed: false,
            fields: JsonMap::new(),
            data_transfer: None,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
            phase: Cell::new(EventPhase::None),
            target: RefCell::new(None),
            current_target: RefCell::new(None),
        }
    }

    /// Legacy `initEvent(type, bubbles, cancelable, detail)`.
    pub fn init_event(
        &mut self,
        event_type: &str,
        bubbles: bool,
        cancelable: bool,
        detail: Option<JsonValue>,
    ) {
        self.event_type = event_type.to_string();
        self.bubbles = bubbles;
        self.cancelable = cancelable;
        self.initialized = true;
        self.default_prevented.set(false);
        self.propagation_stopped.set(false);
        self.immediate_propagation_stopped.set(false);
        if let Some(detail) = detail {
            self.fields.insert("detail".to_string(), detail);
        }
    }

    /// Plain assignment `event[name] = value`.
    pub fn set_property(&mut self, name: &str, value: JsonValue) {
        if READ_ONLY_ATTRIBUTES.contains(&name) {
            return;
        }
        if name == "dataTransfer" && self.data_transfer.is_some() {
            return;
        }
        self.fields.insert(name.to_string(), value);
    }

    /// Attach `dataTransfer` as a read-only property, replacing any raw init field.
    pub fn attach_data_transfer(&mut self, data_transfer: DataTransfer) {
        self.fields.remove("dataTransfer");
        self.data_transfer = Some(data_transfer);
    }

    /// Name of the interface the event was created as, e.g. `MouseEvent`.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn composed(&self) -> bool {
        self.composed
    }

    pub fn detail(&self) -> Option<&JsonValue> {
        self.fields.get("detail")
    }

    pub fn field(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }

    /// Own init fields beyond the core flags.
    pub fn init_fields(&self) -> &JsonMap<String, JsonValue> {
        &self.fields
    }

    pub fn data_transfer(&self) -> Option<&DataTransfer> {
        self.data_transfer.as_ref()
    }

    /// Property read covering the core attributes and init fields.
    pub fn get(&self, name: &str) -> Option<JsonValue> {
        match name {
            "type" => Some(JsonValue::String(self.event_type.clone())),
            "bubbles" => Some(JsonValue::Bool(self.bubbles)),
            "cancelable" => Some(JsonValue::Bool(self.cancelable)),
            "composed" => Some(JsonValue::Bool(self.composed)),
            "defaultPrevented" => Some(JsonValue::Bool(self.default_prevented())),
            "isTrusted" => Some(JsonValue::Bool(false)),
            "dataTransfer" if self.data_transfer.is_some() => {
                self.data_transfer.as_ref().map(DataTransfer::to_json)
            }
            other => self.fields.get(other).cloned(),
        }
    }

    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn stop_immediate_propagation(&self) {
        self.propagation_stopped.set(true);
        self.immediate_propagation_stopped.set(true);
    }

    pub fn event_phase(&self) -> EventPhase {
        self.phase.get()
    }

    pub fn target(&self) -> Option<Element> {
        self.target.borrow().clone()
    }

    pub fn current_target(&self) -> Option<Element> {
        self.current_target.borrow().clone()
    }

    pub(crate) fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get()
    }

    pub(crate) fn begin_dispatch(&self, target: &Element) {
        *self.target.borrow_mut() = Some(target.clone());
    }

    pub(crate) fn enter(&self, node: &Element, phase: EventPhase) {
        self.phase.set(phase);
        *self.current_target.borrow_mut() = Some(node.clone());
    }

    pub(crate) fn end_dispatch(&self) {
        self.phase.set(EventPhase::None);
        *self.current_target.borrow_mut() = None;
    }
}
