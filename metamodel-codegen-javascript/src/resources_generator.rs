//! Generator of the JavaScript resource clients.

use metamodel_codegen::{Backend, Calculators, Helpers, Unit, views::ResourceView};
use metamodel_concepts::{Model, ResourceId, nomenclator::RESOURCE};
use metamodel_core::Name;
use serde::Serialize;

use crate::{helpers, templates};

/// A client class the generated file imports.
#[derive(Debug, Serialize)]
struct Import {
    name: String,
    file: String,
}

#[derive(Serialize)]
struct ResourceContext {
    resource: ResourceView,
    imports: Vec<Import>,
}

/// Backend generating one `<resource>Resource.js` client per resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourcesBackend;

impl ResourcesBackend {
    /// Clients of the resources the locators lead to, once each, in the
    /// order the template uses them.
    fn imports(model: &Model, calculators: &Calculators, view: &ResourceView) -> Vec<Import> {
        let mut targets: Vec<ResourceId> = Vec::new();
        for locator in view.variable_locator.iter().chain(&view.constant_locators) {
            if let Some(target) = &locator.target
                && target.id != view.id
                && !targets.contains(&target.id)
            {
                targets.push(target.id);
            }
        }
        targets
            .into_iter()
            .map(|target| {
                let name = Name::cat([model.resource(target).name(), &*RESOURCE]);
                Import {
                    name: calculators.names.public(&name),
                    file: calculators.names.file(&name),
                }
            })
            .collect()
    }
}

impl Backend for ResourcesBackend {
    fn name(&self) -> &'static str {
        "javascript-resources"
    }

    fn helpers(&self, calculators: &Calculators) -> Helpers {
        helpers::helpers(calculators)
    }

    fn resource_unit(
        &self,
        model: &Model,
        calculators: &Calculators,
        resource: ResourceId,
    ) -> Option<Unit> {
        let view = ResourceView::deep(model, resource)?;
        let file = calculators.names.file(&Name::cat([&view.name, &*RESOURCE]));
        let imports = Self::imports(model, calculators, &view);
        Some(Unit::new(file).emit(
            templates::RESOURCE,
            &ResourceContext {
                resource: view,
                imports,
            },
        ))
    }
}
