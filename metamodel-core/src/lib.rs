//! Core primitives for the API metamodel code generator.
//!
//! This crate provides the [`Name`] identifier primitive shared by the
//! concept graph and every backend, the word-case helpers that render names
//! into source identifiers, and the atomic file writer used by the
//! generation engine.

mod file;
mod name;
mod utils;

pub use file::{File, WriteResult};
pub use name::Name;
pub use utils::{
    WordCase, capitalize, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case,
};
