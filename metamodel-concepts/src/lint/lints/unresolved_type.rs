//! Lint for attributes and parameters whose type was never resolved.

use super::super::{Diagnostic, Lint, type_path, versions};
use crate::Model;

/// Reports attributes and method parameters without a value type. The
/// units that contain them can't be generated.
pub struct UnresolvedTypeLint;

impl Lint for UnresolvedTypeLint {
    fn name(&self) -> &'static str {
        "unresolved-type"
    }

    fn check(&self, model: &Model, diagnostics: &mut Vec<Diagnostic>) {
        for version in versions(model) {
            for &ty in model.version(version).types() {
                for &id in model.ty(ty).attributes() {
                    let attribute = model.attribute(id);
                    if attribute.value_type().is_none() {
                        diagnostics.push(
                            Diagnostic::error(
                                self.name(),
                                format!(
                                    "attribute '{}' of type '{}' has no type",
                                    attribute.name(),
                                    model.ty(ty).name()
                                ),
                            )
                            .at(format!("{}.{}", type_path(model, ty), attribute.name())),
                        );
                    }
                }
            }

            for &resource in model.version(version).resources() {
                for &method in model.resource(resource).methods() {
                    for &id in model.method(method).parameters() {
                        let parameter = model.parameter(id);
                        if parameter.value_type().is_none() {
                            diagnostics.push(Diagnostic::error(
                                self.name(),
                                format!(
                                    "parameter '{}' of method '{}' of resource '{}' has no type",
                                    parameter.name(),
                                    model.method(method).name(),
                                    model.resource(resource).name()
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }
}
