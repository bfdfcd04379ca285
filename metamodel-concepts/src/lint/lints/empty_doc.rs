//! Lint for undocumented types and resources.

use super::super::{Diagnostic, Lint, resource_path, type_path, versions};
use crate::Model;

pub struct EmptyDocLint;

impl Lint for EmptyDocLint {
    fn name(&self) -> &'static str {
        "empty-doc"
    }

    fn check(&self, model: &Model, diagnostics: &mut Vec<Diagnostic>) {
        for version in versions(model) {
            for &id in model.version(version).types() {
                let ty = model.ty(id);
                // Scalars are built in and never documented.
                if ty.scalar().is_none() && ty.doc().trim().is_empty() {
                    diagnostics.push(
                        Diagnostic::info(
                            self.name(),
                            format!("type '{}' has no documentation", ty.name()),
                        )
                        .at(type_path(model, id)),
                    );
                }
            }
            for &id in model.version(version).resources() {
                let resource = model.resource(id);
                if resource.doc().trim().is_empty() {
                    diagnostics.push(
                        Diagnostic::info(
                            self.name(),
                            format!("resource '{}' has no documentation", resource.name()),
                        )
                        .at(resource_path(model, id)),
                    );
                }
            }
        }
    }
}
