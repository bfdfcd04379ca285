//! Backend settings loaded from TOML.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{
    FileNaming, NamesCalculator, NamingConvention, PackagesCalculator, PackagesConfig,
    SettingsError,
};

/// Settings of one backend run, usually read from a `metamodel.toml`:
///
/// ```toml
/// output = "generated"
/// base_package = "api"
///
/// [files]
/// separator = "-"
/// case = "lower"
/// extension = "mjs"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSettings {
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub base_package: String,
    pub word_separator: Option<String>,
    /// Overrides the file naming of the backend's convention.
    pub files: Option<FileNaming>,
}

impl FromStr for BackendSettings {
    type Err = Box<SettingsError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_filename(s, "metamodel.toml")
    }
}

impl BackendSettings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<SettingsError>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(SettingsError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse settings with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self, Box<SettingsError>> {
        toml::from_str(content).map_err(|e| SettingsError::parse(e, content, filename))
    }

    /// Names calculator for `convention`, with the file naming override applied.
    pub fn names(&self, convention: NamingConvention) -> NamesCalculator {
        let names = NamesCalculator::new(convention);
        match &self.files {
            Some(files) => names.with_files(files.clone()),
            None => names,
        }
    }

    pub fn packages(&self) -> PackagesCalculator {
        let mut config = PackagesConfig {
            base: self.base_package.clone(),
            ..Default::default()
        };
        if let Some(separator) = &self.word_separator {
            config.word_separator = separator.clone();
        }
        PackagesCalculator::new(config)
    }
}
