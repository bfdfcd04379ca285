//! Concept graph for the API metamodel.
//!
//! The graph describes one API model: services own versions, versions own
//! types and resources, types own attributes or enum values, and resources
//! own methods and locators. Entities live in a single [`Model`] arena and
//! refer to each other through copyable handles ([`TypeId`],
//! [`ResourceId`], ...). Ownership flows strictly from parent to child;
//! the child to parent edge is recorded once, when the child is added, and
//! can be read back with [`Model::owner`].
//!
//! # Architecture
//!
//! ```text
//! model files → parser (external) → Model (this crate) → codegen backends
//! ```
//!
//! The parser builds the model through the `add_*` methods, which keep every
//! collection in its deterministic order. After that the model is shared
//! read-only with the generators.

mod handle;
pub mod lint;
mod model;
pub mod nomenclator;
mod resource;
mod service;
mod types;

pub use handle::{
    AttributeId, Child, EnumValueId, LocatorId, MethodId, ParameterId, ResourceId, ServiceId,
    TypeId, VersionId,
};
pub use model::Model;
pub use resource::{Direction, Locator, Method, Parameter, Resource, Verb};
pub use service::{Service, Version};
pub use types::{Attribute, EnumValue, Members, ScalarKind, Type, TypeKind};
