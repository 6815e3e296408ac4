use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::debug;

use super::coerce::to_dom_string;
use super::dispatch;
use super::event::{Event, EventPhase};
use super::interface::{Interface, PropertyDescriptor};
use super::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub once: bool,
}

#[derive(Clone)]
pub(crate) struct Listener {
    id: ListenerId,
    event_type: String,
    options: ListenerOptions,
    callback: Rc<dyn Fn(&Event)>,
    removed: Rc<Cell<bool>>,
}

impl Listener {
    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }

    pub(crate) fn once(&self) -> bool {
        self.options.once
    }

    pub(crate) fn is_removed(&self) -> bool {
        self.removed.get()
    }

    pub(crate) fn invoke(&self, event: &Event) {
        (self.callback)(event)
    }
}

struct ElementInner {
    window: Rc<Window>,
    local_name: String,
    interface: Rc<Interface>,
    attributes: RefCell<BTreeMap<String, String>>,
    slots: RefCell<JsonMap<String, JsonValue>>,
    own_properties: RefCell<BTreeMap<String, PropertyDescriptor>>,
    parent: RefCell<Weak<ElementInner>>,
    children: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<Listener>>,
    next_listener_id: Cell<u64>,
}

/// Shared handle to a DOM element. Clones refer to the same node.
#[derive(Clone)]
pub struct Element(Rc<ElementInner>);

impl Element {
    pub(crate) fn new(window: Rc<Window>, local_name: &str, interface: Rc<Interface>) -> Self {
        Self(Rc::new(ElementInner {
            window,
            local_name: local_name.to_ascii_lowercase(),
            interface,
            attributes: RefCell::new(BTreeMap::new()),
            slots: RefCell::new(JsonMap::new()),
            own_properties: RefCell::new(BTreeMap::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(1),
        }))
    }

    pub fn local_name(&self) -> &str {
        &self.0.local_name
    }

    /// The realm that created this element.
    pub fn window(&self) -> Rc<Window> {
        Rc::clone(&self.0.window)
    }

    /// `Object.getPrototypeOf(element)`.
    pub fn prototype(&self) -> Rc<Interface> {
        Rc::clone(&self.0.interface)
    }

    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        self.0
            .attributes
            .borrow_mut()
            .insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn id(&self) -> Option<String> {
        self.get_attribute("id")
    }

    /// Internal state read by native accessors.
    pub fn slot(&self, name: &str) -> Option<JsonValue> {
        self.0.slots.borrow().get(name).cloned()
    }

    pub fn set_slot(&self, name: &str, value: JsonValue) {
        self.0.slots.borrow_mut().insert(name.to_string(), value);
    }

    pub fn own_property_descriptor(&self, name: &str) -> Option<PropertyDescriptor> {
        self.0.own_properties.borrow().get(name).cloned()
    }

    /// `Object.defineProperty(element, name, descriptor)`.
    pub fn define_own_property(&self, name: &str, descriptor: PropertyDescriptor) {
        self.0
            .own_properties
            .borrow_mut()
            .insert(name.to_string(), descriptor);
    }

    /// Names of enumerable own properties, in key order.
    pub fn own_keys(&self) -> Vec<String> {
        self.0
            .own_properties
            .borrow()
            .iter()
            .filter(|(_, descriptor)| descriptor.is_enumerable())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Property read (`element[name]`): own properties first, then the prototype chain.
    pub fn get(&self, name: &str) -> Option<JsonValue> {
        match self.own_property_descriptor(name) {
            Some(PropertyDescriptor::Data { value, .. }) => return Some(value),
            Some(PropertyDescriptor::Accessor(accessor)) => {
                return Some(
                    accessor
                        .get
                        .map(|getter| getter.call(self))
                        .unwrap_or(JsonValue::Null),
                );
            }
            None => {}
        }

        self.0
            .interface
            .find_accessor(name)
            .map(|accessor| match accessor.get {
                Some(getter) => getter.call(self),
                None => JsonValue::Null,
            })
    }

    /// Plain property assignment (`element[name] = value`).
    ///
    /// Setters run with this element as receiver. Writes to read-only
    /// properties are dropped.
    pub fn set(&self, name: &str, value: JsonValue) {
        match self.own_property_descriptor(name) {
            Some(PropertyDescriptor::Data { writable: true, .. }) => {
                if let Some(PropertyDescriptor::Data { value: slot, .. }) =
                    self.0.own_properties.borrow_mut().get_mut(name)
                {
                    *slot = value;
                }
                return;
            }
            Some(PropertyDescriptor::Data { .. }) => {
                debug!(target: "synthetic_events", property = name, "ignored write to read-only own property");
                return;
            }
            Some(PropertyDescriptor::Accessor(accessor)) => {
                match accessor.set {
                    Some(setter) => setter.call(self, value),
                    None => {
                        debug!(target: "synthetic_events", property = name, "ignored write to getter-only own property")
                    }
                }
                return;
            }
            None => {}
        }

        match self.0.interface.find_accessor(name) {
            Some(accessor) => match accessor.set {
                Some(setter) => setter.call(self, value),
                None => {
                    debug!(target: "synthetic_events", property = name, "ignored write to read-only native property")
                }
            },
            None => self.define_own_property(name, PropertyDescriptor::data(value)),
        }
    }

    /// Current `value` as a DOMString, if the element has one.
    pub fn value(&self) -> Option<String> {
        self.get("value").map(|value| to_dom_string(&value))
    }

    pub fn files(&self) -> Option<JsonValue> {
        self.get("files")
    }

    pub fn append_child(&self, child: &Element) {
        if let Some(previous) = child.parent() {
            previous
                .0
                .children
                .borrow_mut()
                .retain(|existing| !existing.ptr_eq(child));
        }
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    pub fn parent(&self) -> Option<Element> {
        self.0.parent.borrow().upgrade().map(Element)
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.children.borrow().clone()
    }

    /// This element followed by its ancestors, nearest first.
    pub fn inclusive_ancestors(&self) -> Vec<Element> {
        let mut path = vec![self.clone()];
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            path.push(node);
        }
        path
    }

    pub fn add_event_listener(
        &self,
        event_type: &str,
        callback: impl Fn(&Event) + 'static,
    ) -> ListenerId {
        self.add_event_listener_with_options(event_type, ListenerOptions::default(), callback)
    }

    pub fn add_event_listener_with_options(
        &self,
        event_type: &str,
        options: ListenerOptions,
        callback: impl Fn(&Event) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.0.next_listener_id.get());
        self.0.next_listener_id.set(id.0 + 1);
        self.0.listeners.borrow_mut().push(Listener {
            id,
            event_type: event_type.to_string(),
            options,
            callback: Rc::new(callback),
            removed: Rc::new(Cell::new(false)),
        });
        id
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.0.listeners.borrow_mut();
        match listeners.iter().position(|listener| listener.id == id) {
            Some(position) => {
                let listener = listeners.remove(position);
                listener.removed.set(true);
                true
            }
            None => false,
        }
    }

    /// Snapshot of listeners that should see `event_type` in `phase`.
    pub(crate) fn listeners_for(&self, event_type: &str, phase: EventPhase) -> Vec<Listener> {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.event_type == event_type)
            .filter(|listener| match phase {
                EventPhase::Capturing => listener.options.capture,
                EventPhase::Bubbling => !listener.options.capture,
                EventPhase::AtTarget | EventPhase::None => true,
            })
            .cloned()
            .collect()
    }

    /// `element.dispatchEvent(event)`: true unless a listener cancelled the event.
    pub fn dispatch_event(&self, event: Event) -> bool {
        dispatch::dispatch(self, event)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Element");
        debug.field("local_name", &self.0.local_name);
        if let Some(id) = self.id() {
            debug.field("id", &id);
        }
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::interface::{Accessor, Getter, Setter};
    use crate::dom::{Environment, Window};
    use serde_json::json;

    fn input() -> Element {
        Window::new(Environment::modern()).create_element("input")
    }

    #[test]
    fn native_value_accessor_round_trips() {
        let element = input();
        assert_eq!(element.value().as_deref(), Some(""));
        element.set("value", json!(12));
        assert_eq!(element.value().as_deref(), Some("12"));
        assert_eq!(element.slot("value"), Some(json!("12")));
    }

    #[test]
    fn writes_to_read_only_native_are_dropped() {
        let element = input();
        element.set("files", json!(["a.txt"]));
        assert_eq!(element.files(), Some(json!(null)));
        assert!(element.own_property_descriptor("files").is_none());
    }

    #[test]
    fn unknown_properties_become_own_data() {
        let element = input();
        element.set("scrollTop", json!(40));
        assert_eq!(element.get("scrollTop"), Some(json!(40)));
        assert_eq!(element.own_keys(), vec!["scrollTop".to_string()]);
    }

    #[test]
    fn own_accessor_shadows_prototype() {
        let element = input();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        element.define_own_property(
            "value",
            PropertyDescriptor::Accessor(Accessor::new(
                Some(Getter::new(|_| json!("shadow"))),
                Some(Setter::new(move |_, value| log.borrow_mut().push(value))),
            )),
        );
        element.set("value", json!("typed"));
        assert_eq!(element.get("value"), Some(json!("shadow")));
        assert_eq!(*seen.borrow(), vec![json!("typed")]);
        assert_eq!(element.slot("value"), None);
    }

    #[test]
    fn non_writable_own_data_is_kept() {
        let element = input();
        element.define_own_property(
            "answer",
            PropertyDescriptor::Data {
                value: json!(42),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        );
        element.set("answer", json!(1));
        assert_eq!(element.get("answer"), Some(json!(42)));
        assert!(element.own_keys().is_empty());
    }

    #[test]
    fn reflected_attributes() {
        let element = input();
        element.set("id", json!("email"));
        element.set("className", json!("wide"));
        assert_eq!(element.id().as_deref(), Some("email"));
        assert_eq!(element.get_attribute("class").as_deref(), Some("wide"));
        assert_eq!(element.get("type"), Some(json!("text")));
    }

    #[test]
    fn tree_links() {
        let window = Window::new(Environment::modern());
        let form = window.create_element("form");
        let first = window.create_element("div");
        let child = window.create_element("input");
        first.append_child(&child);
        form.append_child(&child);
        assert!(first.children().is_empty());
        assert_eq!(child.parent(), Some(form.clone()));
        let path = child.inclusive_ancestors();
        assert_eq!(path.len(), 2);
        assert!(path[1].ptr_eq(&form));
    }

    #[test]
    fn removing_listeners() {
        let element = input();
        let id = element.add_event_listener("click", |_| {});
        assert_eq!(element.listeners_for("click", EventPhase::AtTarget).len(), 1);
        assert!(element.remove_event_listener(id));
        assert!(!element.remove_event_listener(id));
        assert!(element.listeners_for("click", EventPhase::AtTarget).is_empty());
    }
}
