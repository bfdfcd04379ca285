//! Template helpers of the JavaScript generators.

use std::sync::Arc;

use metamodel_codegen::{Calculators, Helper, Helpers, NamesCalculator, TypesError, types::lookup};
use metamodel_concepts::nomenclator::{LIST, RESOURCE};
use metamodel_core::Name;

/// Names of the helpers registered by [`helpers`].
pub const NAMES: &[&str] = &[
    "enum_name",
    "object_name",
    "list_name",
    "field_name",
    "field_type",
    "getter_name",
    "getter_type",
    "value_name",
    "value_tag",
    "resource_name",
    "method_name",
    "parameter_name",
    "parameter_type",
    "locator_name",
    "target_name",
];

/// Build the helpers shared by the types and resources generators.
pub fn helpers(calculators: &Calculators) -> Helpers {
    let names = &calculators.names;
    let types = &calculators.types;

    Helpers::new()
        .with("enum_name", type_name(names, |name| name.clone()))
        .with("object_name", type_name(names, |name| name.clone()))
        .with("list_name", type_name(names, |name| Name::cat([name, &*LIST])))
        .with("field_name", {
            let names = Arc::clone(names);
            Helper::attribute(move |model, id| Ok(names.property(model.attribute(id).name())))
        })
        .with("field_type", {
            let types = Arc::clone(types);
            Helper::attribute(move |model, id| Ok(types.field_type(model, id)?.to_string()))
        })
        .with("getter_name", {
            let names = Arc::clone(names);
            Helper::attribute(move |model, id| Ok(names.public(model.attribute(id).name())))
        })
        .with("getter_type", {
            let types = Arc::clone(types);
            Helper::attribute(move |model, id| Ok(types.getter_type(model, id)?.to_string()))
        })
        .with("value_name", {
            let names = Arc::clone(names);
            Helper::enum_value(move |model, id| {
                let owner = lookup(model, model.owner(id))?;
                Ok(names.public(&Name::cat([owner.name(), model.value(id).name()])))
            })
        })
        .with("value_tag", Helper::enum_value(|model, id| Ok(model.value(id).tag())))
        .with("resource_name", {
            let names = Arc::clone(names);
            Helper::resource(move |model, id| {
                Ok(names.public(&Name::cat([model.resource(id).name(), &*RESOURCE])))
            })
        })
        .with("method_name", {
            let names = Arc::clone(names);
            Helper::method(move |model, id| Ok(names.public(model.method(id).name())))
        })
        .with("parameter_name", {
            let names = Arc::clone(names);
            Helper::parameter(move |model, id| Ok(names.private(model.parameter(id).name())))
        })
        .with("parameter_type", {
            let types = Arc::clone(types);
            Helper::parameter(move |model, id| match model.parameter(id).value_type() {
                Some(ty) => Ok(types.nullable_reference(model, ty)?.to_string()),
                None => Ok("*".to_string()),
            })
        })
        .with("locator_name", {
            let names = Arc::clone(names);
            Helper::locator(move |model, id| Ok(names.public(model.locator(id).name())))
        })
        .with("target_name", {
            let names = Arc::clone(names);
            Helper::locator(move |model, id| {
                let target = model.locator(id).target();
                let target = model
                    .get_resource(target)
                    .ok_or_else(|| TypesError::Dangling {
                        entity: target.to_string(),
                    })?;
                Ok(names.public(&Name::cat([target.name(), &*RESOURCE])))
            })
        })
}

/// A type helper giving the public spelling of a name derived from the
/// type's name.
fn type_name(names: &Arc<NamesCalculator>, derive: fn(&Name) -> Name) -> Helper {
    let names = Arc::clone(names);
    Helper::ty(move |model, id| Ok(names.public(&derive(lookup(model, id)?.name()))))
}

#[cfg(test)]
mod tests {
    use metamodel_codegen::{JAVASCRIPT_NAMING, PackagesCalculator};

    use super::*;
    use crate::JavaScriptTypes;

    #[test]
    fn test_every_name_is_registered() {
        let names = Arc::new(metamodel_codegen::NamesCalculator::new(JAVASCRIPT_NAMING));
        let calculators = Calculators {
            names: Arc::clone(&names),
            packages: Arc::new(PackagesCalculator::default()),
            types: Arc::new(JavaScriptTypes::new(names)),
        };

        let helpers = helpers(&calculators);

        assert!(helpers.missing(NAMES).is_empty());
        assert!(helpers.contains("line_comment"));
    }
}
