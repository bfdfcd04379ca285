//! Packages calculator: where the files of each version go.

use std::collections::HashMap;

use metamodel_concepts::{Model, ServiceId, VersionId};
use metamodel_core::{Name, WordCase};
use serde::Deserialize;

use crate::GenerateError;

fn default_word_separator() -> String {
    "_".to_string()
}

/// Base path and segment spelling for packages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    /// Prefix of every package, `/` separated. May be empty.
    #[serde(default)]
    pub base: String,
    /// Text placed between the words of a service or version name.
    #[serde(default = "default_word_separator")]
    pub word_separator: String,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            base: String::new(),
            word_separator: default_word_separator(),
        }
    }
}

/// Derives package paths: `base/service/version`.
#[derive(Debug, Clone, Default)]
pub struct PackagesCalculator {
    config: PackagesConfig,
}

impl PackagesCalculator {
    pub fn new(config: PackagesConfig) -> Self {
        Self { config }
    }

    /// The package that contains every service.
    pub fn root_package(&self) -> String {
        self.config.base.trim_matches('/').to_string()
    }

    pub fn service_package(&self, model: &Model, service: ServiceId) -> String {
        join(&self.root_package(), &self.segment(model.service(service).name()))
    }

    pub fn version_package(&self, model: &Model, version: VersionId) -> String {
        let service = self.service_package(model, model.owner(version));
        join(&service, &self.segment(model.version(version).name()))
    }

    /// Check that no two versions of the model share a package.
    pub fn check(&self, model: &Model) -> Result<(), GenerateError> {
        let mut seen: HashMap<String, VersionId> = HashMap::new();
        for &service in model.services() {
            for &version in model.service(service).versions() {
                let package = self.version_package(model, version);
                if let Some(&first) = seen.get(&package) {
                    return Err(GenerateError::PackageCollision {
                        package,
                        first: self.describe(model, first),
                        second: self.describe(model, version),
                    });
                }
                seen.insert(package, version);
            }
        }
        Ok(())
    }

    fn segment(&self, name: &Name) -> String {
        WordCase::Lower.join(name, &self.config.word_separator)
    }

    fn describe(&self, model: &Model, version: VersionId) -> String {
        let service = model.owner(version);
        format!(
            "{}/{}",
            model.service(service).name(),
            model.version(version).name()
        )
    }
}

fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", parent, segment)
    }
}
