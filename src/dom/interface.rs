use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value as JsonValue;

use super::coerce::{is_truthy, to_dom_string};
use super::element::Element;

type GetterFn = dyn Fn(&Element) -> JsonValue;
type SetterFn = dyn Fn(&Element, JsonValue);

/// Accessor getter. Two getters are equal only if they are the same function object.
#[derive(Clone)]
pub struct Getter(Rc<GetterFn>);

impl Getter {
    pub fn new(get: impl Fn(&Element) -> JsonValue + 'static) -> Self {
        Self(Rc::new(get))
    }

    pub fn call(&self, receiver: &Element) -> JsonValue {
        (self.0)(receiver)
    }
}

impl PartialEq for Getter {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Getter({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Accessor setter, compared by identity like [`Getter`].
#[derive(Clone)]
pub struct Setter(Rc<SetterFn>);

impl Setter {
    pub fn new(set: impl Fn(&Element, JsonValue) + 'static) -> Self {
        Self(Rc::new(set))
    }

    /// Invoke the setter with `receiver` bound as `this`.
    pub fn call(&self, receiver: &Element, value: JsonValue) {
        (self.0)(receiver, value)
    }
}

impl PartialEq for Setter {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setter({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub get: Option<Getter>,
    pub set: Option<Setter>,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Accessor {
    pub fn new(get: Option<Getter>, set: Option<Setter>) -> Self {
        Self {
            get,
            set,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn read_only(get: Getter) -> Self {
        Self::new(Some(get), None)
    }
}

/// Result of `getOwnPropertyDescriptor`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDescriptor {
    Data {
        value: JsonValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor(Accessor),
}

impl PropertyDescriptor {
    /// A writable, enumerable, configurable data property.
    pub fn data(value: JsonValue) -> Self {
        Self::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn setter(&self) -> Option<&Setter> {
        match self {
            Self::Accessor(accessor) => accessor.set.as_ref(),
            Self::Data { .. } => None,
        }
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            Self::Data { enumerable, .. } => *enumerable,
            Self::Accessor(accessor) => accessor.enumerable,
        }
    }
}

/// A prototype object: a DOM interface with native accessors and a parent interface.
pub struct Interface {
    name: String,
    parent: Option<Rc<Interface>>,
    accessors: RefCell<HashMap<String, Accessor>>,
}

impl Interface {
    pub fn new(name: impl Into<String>, parent: Option<Rc<Interface>>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            parent,
            accessors: RefCell::new(HashMap::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<Interface>> {
        self.parent.as_ref()
    }

    /// Descriptor defined directly on this prototype, ignoring the chain.
    pub fn own_property_descriptor(&self, name: &str) -> Option<PropertyDescriptor> {
        self.accessors
            .borrow()
            .get(name)
            .cloned()
            .map(PropertyDescriptor::Accessor)
    }

    /// Install or replace an accessor on this prototype.
    pub fn define_accessor(&self, name: impl Into<String>, accessor: Accessor) {
        self.accessors.borrow_mut().insert(name.into(), accessor);
    }

    /// Nearest accessor for `name` along the prototype chain.
    pub fn find_accessor(&self, name: &str) -> Option<Accessor> {
        let mut current = Some(self);
        while let Some(interface) = current {
            if let Some(accessor) = interface.accessors.borrow().get(name) {
                return Some(accessor.clone());
            }
            current = interface.parent.as_deref();
        }
        None
    }

    /// Whether this interface is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        let mut current = Some(self);
        while let Some(interface) = current {
            if interface.name == name {
                return true;
            }
            current = interface.parent.as_deref();
        }
        false
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name.clone()))
            .finish()
    }
}

/// Builds the native prototype chain shared by every element of a realm.
pub(crate) fn native_interfaces() -> HashMap<String, Rc<Interface>> {
    let event_target = Interface::new("EventTarget", None);
    let node = Interface::new("Node", Some(Rc::clone(&event_target)));
    node.define_accessor("textContent", string_slot("textContent"));

    let element = Interface::new("Element", Some(Rc::clone(&node)));
    element.define_accessor("id", reflected_attribute("id"));
    element.define_accessor("className", reflected_attribute("class"));

    let html_element = Interface::new("HTMLElement", Some(Rc::clone(&element)));
    html_element.define_accessor("title", reflected_attribute("title"));

    let input = Interface::new("HTMLInputElement", Some(Rc::clone(&html_element)));
    input.define_accessor("value", string_slot("value"));
    input.define_accessor("checked", boolean_slot("checked"));
    input.define_accessor(
        "files",
        Accessor::read_only(Getter::new(|element| {
            element.slot("files").unwrap_or(JsonValue::Null)
        })),
    );
    input.define_accessor("name", reflected_attribute("name"));
    input.define_accessor(
        "type",
        Accessor::new(
            Some(Getter::new(|element| {
                JsonValue::String(
                    element
                        .get_attribute("type")
                        .map(|kind| kind.to_ascii_lowercase())
                        .unwrap_or_else(|| "text".to_string()),
                )
            })),
            Some(Setter::new(|element, value| {
                element.set_attribute("type", to_dom_string(&value))
            })),
        ),
    );

    let textarea = Interface::new("HTMLTextAreaElement", Some(Rc::clone(&html_element)));
    textarea.define_accessor("value", string_slot("value"));

    let select = Interface::new("HTMLSelectElement", Some(Rc::clone(&html_element)));
    select.define_accessor("value", string_slot("value"));

    let form = Interface::new("HTMLFormElement", Some(Rc::clone(&html_element)));

    [
        event_target,
        node,
        element,
        html_element,
        input,
        textarea,
        select,
        form,
    ]
    .into_iter()
    .map(|interface| (interface.name().to_string(), interface))
    .collect()
}

/// Interface name an element with `local_name` is created with.
pub(crate) fn interface_for_tag(local_name: &str) -> &'static str {
    match local_name {
        "input" => "HTMLInputElement",
        "textarea" => "HTMLTextAreaElement",
        "select" => "HTMLSelectElement",
        "form" => "HTMLFormElement",
        _ => "HTMLElement",
    }
}

fn string_slot(slot: &'static str) -> Accessor {
    Accessor::new(
        Some(Getter::new(move |element| {
            JsonValue::String(
                element
                    .slot(slot)
                    .map(|value| to_dom_string(&value))
                    .unwrap_or_default(),
            )
        })),
        Some(Setter::new(move |element, value| {
            element.set_slot(slot, JsonValue::String(to_dom_string(&value)))
        })),
    )
}

fn boolean_slot(slot: &'static str) -> Accessor {
    Accessor::new(
        Some(Getter::new(move |element| {
            JsonValue::Bool(is_truthy(element.slot(slot).as_ref()))
        })),
        Some(Setter::new(move |element, value| {
            element.set_slot(slot, JsonValue::Bool(is_truthy(Some(&value))))
        })),
    )
}

fn reflected_attribute(attribute: &'static str) -> Accessor {
    Accessor::new(
        Some(Getter::new(move |element| {
            JsonValue::String(element.get_attribute(attribute).unwrap_or_default())
        })),
        Some(Setter::new(move |element, value| {
            element.set_attribute(attribute, to_dom_string(&value))
        })),
    )
}
