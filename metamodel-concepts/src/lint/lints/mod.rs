//! Built-in model lints.

mod collection_cycle;
mod collection_element;
mod empty_doc;
mod unresolved_type;
mod variable_locators;

pub use collection_cycle::CollectionCycleLint;
pub use collection_element::CollectionElementLint;
pub use empty_doc::EmptyDocLint;
pub use unresolved_type::UnresolvedTypeLint;
pub use variable_locators::VariableLocatorsLint;
