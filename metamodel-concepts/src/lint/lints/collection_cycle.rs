//! Lint for lists and maps whose element chain leads back to themselves.

use super::super::{Diagnostic, Lint, type_path, versions};
use crate::{Model, TypeId};

pub struct CollectionCycleLint;

impl CollectionCycleLint {
    /// Follow the element chain starting at `id` and tell whether it comes
    /// back to `id`. Chains entering a loop that doesn't include `id` are
    /// left to the lint run of the types in that loop.
    fn loops_back(model: &Model, id: TypeId) -> bool {
        let mut path = vec![id];
        let mut current = id;
        while let Some(next) = model.get_type(current).and_then(|ty| ty.element()) {
            if next == id {
                return true;
            }
            if path.contains(&next) {
                return false;
            }
            path.push(next);
            current = next;
        }
        false
    }
}

impl Lint for CollectionCycleLint {
    fn name(&self) -> &'static str {
        "collection-cycle"
    }

    fn check(&self, model: &Model, diagnostics: &mut Vec<Diagnostic>) {
        for version in versions(model) {
            for &id in model.version(version).types() {
                let ty = model.ty(id);
                if (ty.is_list() || ty.is_map()) && Self::loops_back(model, id) {
                    diagnostics.push(
                        Diagnostic::error(
                            self.name(),
                            format!(
                                "element of {} type '{}' leads back to the type itself",
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
