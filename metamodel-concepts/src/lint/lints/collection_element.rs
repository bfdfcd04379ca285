//! Lint for list and map types without an element type.

use super::super::{Diagnostic, Lint, type_path, versions};
use crate::Model;

pub struct CollectionElementLint;

impl Lint for CollectionElementLint {
    fn name(&self) -> &'static str {
        "collection-element"
    }

    fn check(&self, model: &Model, diagnostics: &mut Vec<Diagnostic>) {
        for version in versions(model) {
            for &id in model.version(version).types() {
                let ty = model.ty(id);
                if (ty.is_list() || ty.is_map()) && ty.element().is_none() {
                    diagnostics.push(
                        Diagnostic::error(
                            self.name(),
                            format!(
                                "{} type '{}' has no element type",
                                ty.kind().as_str(),
                                ty.name()
                            ),
                        )
                        .at(type_path(model, id)),
                    );
                }
            }
        }
    }
}
