//! Entry point for tooling that drives a backend.

use std::path::Path;

use eyre::Result;

use crate::GenerateResult;

/// Trait for language-specific code generators.
///
/// Errors are [`eyre::Report`]s wrapping the typed error of the run, so
/// callers can downcast to [`GenerateError`](crate::GenerateError) and read
/// the number of failed units.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "javascript", "go")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "js", "go")
    fn file_extension(&self) -> &'static str;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}
