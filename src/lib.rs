// Library exports for tests and the catalog inspection binary

pub mod catalog;
pub mod dom;
pub mod events;

pub use catalog::{AliasKey, CatalogError, EventCatalog, EventKey, EventSpec};
pub use dom::{
    window_from_node, DataTransfer, Document, Element, Environment, Event, PropertyDescriptor,
    Window,
};
pub use events::{
    create, create_event, dispatch_event, fire, fire_alias, fire_by_name, fire_event,
    EventSynthesizer, FireEventError,
};
