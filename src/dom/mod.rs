//! In-memory DOM object model the event engine mutates and dispatches into.
//!
//! Elements carry own properties on top of a prototype chain of interfaces
//! with native accessors, so page code can shadow a native `value` the same
//! way UI frameworks do in a browser.

pub mod coerce;
mod data_transfer;
mod dispatch;
mod document;
mod element;
mod event;
mod interface;
mod window;

pub use data_transfer::{DataTransfer, NativeDataTransfer};
pub use document::Document;
pub use element::{Element, ListenerId, ListenerOptions};
pub use event::{Event, EventPhase};
pub use interface::{Accessor, Getter, Interface, PropertyDescriptor, Setter};
pub use window::{window_from_node, Environment, Window};
