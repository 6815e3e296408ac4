//! Event construction and dispatch.
//!
//! Control flow for every call: alias resolution (if any), then
//! [`EventFactory::build`] which mutates the target and constructs the event
//! through the realm's [`EventBuilder`], then [`dispatch_event`].

mod alias;
mod api;
pub mod builder;
mod dispatch;
mod errors;
mod factory;
mod value;

pub use alias::resolve_name;
pub use api::{
    create, create_event, fire, fire_alias, fire_by_name, fire_event, EventSynthesizer,
};
pub use builder::{
    select_builder, ConstructionStrategy, DirectConstruction, EventBuilder, LegacyInitializer,
};
pub use dispatch::dispatch_event;
pub use errors::FireEventError;
pub use factory::EventFactory;
pub use value::set_native_value;
