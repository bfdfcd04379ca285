//! Lint for resources with more than one variable locator.

use super::super::{Diagnostic, Lint, resource_path, versions};
use crate::Model;

/// Warns about resources with several variable locators. Only the first one,
/// in name order, is reachable through `Model::variable_locator`.
pub struct VariableLocatorsLint;

impl Lint for VariableLocatorsLint {
    fn name(&self) -> &'static str {
        "variable-locators"
    }

    fn check(&self, model: &Model, diagnostics: &mut Vec<Diagnostic>) {
        for version in versions(model) {
            for &resource in model.version(version).resources() {
                let variable: Vec<String> = model
                    .resource(resource)
                    .locators()
                    .iter()
                    .map(|id| model.locator(*id))
                    .filter(|locator| locator.is_variable())
                    .map(|locator| locator.name().to_string())
                    .collect();
                if variable.len() > 1 {
                    diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            format!(
                                "resource '{}' has {} variable locators ({}), only '{}' will be used",
                                model.resource(resource).name(),
                                variable.len(),
                                variable.join(", "),
                                variable[0],
                            ),
                        )
                        .at(resource_path(model, resource)),
                    );
                }
            }
        }
    }
}
