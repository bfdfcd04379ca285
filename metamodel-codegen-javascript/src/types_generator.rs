//! Generator of the JavaScript types: one file per enum, struct or class
//! type, plus the metadata file of each version.

use metamodel_codegen::{
    Backend, Calculators, Helpers, Unit,
    views::{TypeView, VersionView},
};
use metamodel_concepts::{
    Model, TypeId, VersionId,
    nomenclator::{METADATA, TYPE},
};
use metamodel_core::Name;
use serde::Serialize;

use crate::{helpers, templates};

#[derive(Serialize)]
struct MetadataContext {
    version: VersionView,
}

#[derive(Serialize)]
struct EnumContext {
    enum_type: TypeView,
}

#[derive(Serialize)]
struct StructContext {
    object: TypeView,
}

/// Backend generating `metadataType.js` and `<type>Type.js` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypesBackend;

impl Backend for TypesBackend {
    fn name(&self) -> &'static str {
        "javascript-types"
    }

    fn helpers(&self, calculators: &Calculators) -> Helpers {
        helpers::helpers(calculators)
    }

    fn metadata_unit(
        &self,
        model: &Model,
        calculators: &Calculators,
        version: VersionId,
    ) -> Option<Unit> {
        let version = VersionView::new(model, version)?;
        let file = calculators.names.file(&Name::cat([&*METADATA, &*TYPE]));
        Some(Unit::new(file).emit(templates::METADATA, &MetadataContext { version }))
    }

    fn type_unit(&self, model: &Model, calculators: &Calculators, ty: TypeId) -> Option<Unit> {
        let view = TypeView::deep(model, ty)?;
        let file = calculators.names.file(&Name::cat([&view.name, &*TYPE]));
        if view.flags.is_enum {
            Some(Unit::new(file).emit(templates::ENUM, &EnumContext { enum_type: view }))
        } else if view.flags.is_struct {
            Some(Unit::new(file).emit(templates::STRUCT, &StructContext { object: view }))
        } else {
            None
        }
    }
}
