//! Shared code generation engine for the API metamodel.
//!
//! This crate provides the language-agnostic pieces every backend is built
//! from:
//!
//! - [`Reporter`] - Counted `tracing` reporting shared by every component
//! - [`NamesCalculator`], [`PackagesCalculator`], [`TypesCalculator`] - What
//!   identifiers, packages and type references look like in a target language
//! - [`Helper`], [`Helpers`] - Typed template helpers exposed as filters
//! - [`views`] - Serializable template contexts built from the model
//! - [`Buffer`] - Renders template fragments into one output file
//! - [`Generator`], [`Backend`] - The run loop over services, versions, types
//!   and resources
//! - [`BackendSettings`] - TOML configuration of a backend run
//! - [`LanguageCodegen`] - Entry point for tooling

mod buffer;
mod config;
mod error;
mod generator;
mod helpers;
mod language;
mod naming;
mod packages;
mod reporter;
mod template;
pub mod types;
pub mod views;

pub use buffer::{Buffer, BufferConfig, format_body};
pub use config::BackendSettings;
pub use error::{
    BufferError, ConfigError, GenerateError, HelperError, SettingsError, TypesError,
};
pub use generator::{
    Backend, Calculators, FragmentContext, GenerateResult, Generator, GeneratorConfig, Unit,
};
pub use helpers::{EntityFn, Helper, Helpers, TextFn, line_comment};
pub use language::LanguageCodegen;
pub use naming::{
    FileNaming, GO_NAMING, JAVASCRIPT_NAMING, NamesCalculator, NamingConvention, PASCAL_NAMING,
};
pub use packages::{PackagesCalculator, PackagesConfig};
pub use reporter::Reporter;
pub use template::Template;
pub use types::{TypeReference, TypesCalculator};
