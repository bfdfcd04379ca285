//! Services and versions.

use metamodel_core::Name;

use crate::{ResourceId, TypeId, VersionId};

/// An API service, the root of a subtree of the model.
#[derive(Debug, Clone)]
pub struct Service {
    name: Name,
    doc: String,
    pub(crate) versions: Vec<VersionId>,
}

impl Service {
    /// Create an empty service.
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            versions: Vec::new(),
        }
    }

    /// Set the documentation, builder style.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn set_doc(&mut self, doc: impl Into<String>) {
        self.doc = doc.into();
    }

    /// Versions of the service, sorted by name.
    pub fn versions(&self) -> &[VersionId] {
        &self.versions
    }
}

/// A version of a service, owning its types and resources.
#[derive(Debug, Clone)]
pub struct Version {
    name: Name,
    doc: String,
    pub(crate) types: Vec<TypeId>,
    pub(crate) resources: Vec<ResourceId>,
}

impl Version {
    /// Create an empty version.
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            types: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn set_doc(&mut self, doc: impl Into<String>) {
        self.doc = doc.into();
    }

    /// Types of the version, sorted by name.
    pub fn types(&self) -> &[TypeId] {
        &self.types
    }

    /// Resources of the version, sorted by name.
    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }
}
