//! Consistency checks over a fully built model.
//!
//! The model accepts anything the parser gives it; lints find the parts that
//! will not generate cleanly (unresolved types, ambiguous locators) so they
//! can be reported before generation starts.

mod diagnostic;
mod lints;

pub use diagnostic::{Diagnostic, Severity};
pub use lints::{
    CollectionCycleLint, CollectionElementLint, EmptyDocLint, UnresolvedTypeLint,
    VariableLocatorsLint,
};

use crate::{Model, ResourceId, TypeId, VersionId};

/// A lint that checks the model for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Check the model and add any diagnostics.
    fn check(&self, model: &Model, diagnostics: &mut Vec<Diagnostic>);
}

/// A configurable set of lints.
pub struct Linter {
    lints: Vec<Box<dyn Lint>>,
}

impl Linter {
    /// Create a linter with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(VariableLocatorsLint),
                Box::new(UnresolvedTypeLint),
                Box::new(CollectionElementLint),
                Box::new(CollectionCycleLint),
                Box::new(EmptyDocLint),
            ],
        }
    }

    /// Create a linter with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Run every lint over the model.
    pub fn check(&self, model: &Model) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            lint.check(model, &mut diagnostics);
        }
        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the default lints over the model.
pub fn check(model: &Model) -> Vec<Diagnostic> {
    Linter::new().check(model)
}

/// Every version of every service, in model order.
pub(crate) fn versions(model: &Model) -> impl Iterator<Item = VersionId> + '_ {
    model
        .services()
        .iter()
        .flat_map(|id| model.service(*id).versions().iter().copied())
}

pub(crate) fn version_path(model: &Model, version: VersionId) -> String {
    let service = model.owner(version);
    format!(
        "{}/{}",
        model.service(service).name(),
        model.version(version).name()
    )
}

pub(crate) fn type_path(model: &Model, ty: TypeId) -> String {
    format!(
        "{}/{}",
        version_path(model, model.owner(ty)),
        model.ty(ty).name()
    )
}

pub(crate) fn resource_path(model: &Model, resource: ResourceId) -> String {
    format!(
        "{}/{}",
        version_path(model, model.owner(resource)),
        model.resource(resource).name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Service, Version};

    #[test]
    fn test_default_lints() {
        assert_eq!(
            Linter::new().lint_names(),
            [
                "variable-locators",
                "unresolved-type",
                "collection-element",
                "collection-cycle",
                "empty-doc"
            ]
        );
    }

    #[test]
    fn test_custom_lint() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn check(&self, _model: &Model, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("always-error", "forced error"));
            }
        }

        let diagnostics = Linter::empty().with_lint(AlwaysErrorLint).check(&Model::new());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
    }

    #[test]
    fn test_version_path() {
        let mut model = Model::new();
        let service = model.add_service(Service::new("ClustersMgmt")).unwrap();
        let version = model.add_version(service, Version::new("v1")).unwrap();

        assert_eq!(version_path(&model, version), "clusters_mgmt/v1");
        assert_eq!(versions(&model).collect::<Vec<_>>(), [version]);
    }
}
