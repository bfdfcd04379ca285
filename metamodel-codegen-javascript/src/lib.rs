//! JavaScript generator for the API metamodel.
//!
//! This crate generates ES module sources from a [`Model`](metamodel_concepts::Model):
//!
//! - `metadataType.js` - The `Metadata` class of each version
//! - `<type>Type.js` - A constants object per enumerated type, or a class
//!   per struct or class type together with its list class
//! - `<resource>Resource.js` - A client class per resource, with one method
//!   per model method and one accessor per locator
//!
//! Files are laid out by package, `<service>/<version>/`, under the output
//! directory.
//!
//! # Usage
//!
//! ```ignore
//! use metamodel_codegen::LanguageCodegen;
//! use metamodel_codegen_javascript::JavaScriptCodegen;
//! use std::path::Path;
//!
//! let generator = JavaScriptCodegen::new(model);
//! let result = generator.generate(Path::new("generated"))?;
//! ```

mod codegen;
mod helpers;
mod resources_generator;
mod templates;
mod types;
mod types_generator;

pub use codegen::JavaScriptCodegen;
pub use helpers::{NAMES as HELPER_NAMES, helpers};
pub use metamodel_codegen::{GenerateResult, LanguageCodegen};
pub use resources_generator::ResourcesBackend;
pub use types::JavaScriptTypes;
pub use types_generator::TypesBackend;
