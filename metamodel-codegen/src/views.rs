//! Serializable views of model entities, used as template contexts.
//!
//! Every view carries the kind and handle of the entity it was built from,
//! so template helpers can resolve it back into the model:
//!
//! ```text
//! {{ attribute | field_name }}  ->  {"entity": "attribute", "id": 4, ...}
//! ```

use metamodel_concepts::{
    AttributeId, EnumValueId, LocatorId, MethodId, Model, ParameterId, ResourceId, TypeId,
    VersionId,
};
use metamodel_core::Name;
use serde::{Deserialize, Serialize};

/// Which arena a view's handle points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Version,
    Type,
    Attribute,
    EnumValue,
    Resource,
    Method,
    Parameter,
    Locator,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Version => "version",
            EntityKind::Type => "type",
            EntityKind::Attribute => "attribute",
            EntityKind::EnumValue => "enum_value",
            EntityKind::Resource => "resource",
            EntityKind::Method => "method",
            EntityKind::Parameter => "parameter",
            EntityKind::Locator => "locator",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionView {
    pub entity: EntityKind,
    pub id: VersionId,
    pub name: Name,
    pub service: Name,
    pub doc: String,
}

impl VersionView {
    pub fn new(model: &Model, id: VersionId) -> Option<Self> {
        let version = model.get_version(id)?;
        let service = model.get_service(model.owner(id))?;
        Some(Self {
            entity: EntityKind::Version,
            id,
            name: version.name().clone(),
            service: service.name().clone(),
            doc: version.doc().to_string(),
        })
    }
}

/// Flags describing the kind of a type, flattened into the views that
/// refer to a type so templates can branch without nesting.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct KindFlags {
    pub is_scalar: bool,
    pub is_enum: bool,
    pub is_struct: bool,
    pub is_class: bool,
    pub is_list: bool,
    pub is_map: bool,
}

impl KindFlags {
    fn of(model: &Model, ty: Option<TypeId>) -> Self {
        match ty.and_then(|id| model.get_type(id)) {
            Some(ty) => Self {
                is_scalar: ty.is_scalar(),
                is_enum: ty.is_enum(),
                is_struct: ty.is_struct(),
                is_class: ty.is_class(),
                is_list: ty.is_list(),
                is_map: ty.is_map(),
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeView {
    pub entity: EntityKind,
    pub id: TypeId,
    pub name: Name,
    pub doc: String,
    pub kind: &'static str,
    #[serde(flatten)]
    pub flags: KindFlags,
    /// Element of a list or map, shallow.
    pub element: Option<Box<TypeView>>,
    /// Attributes of a struct or class; empty in shallow views.
    pub attributes: Vec<AttributeView>,
    /// Values of an enum; empty in shallow views.
    pub values: Vec<EnumValueView>,
}

impl TypeView {
    /// A view without members, for references to the type.
    pub fn shallow(model: &Model, id: TypeId) -> Option<Self> {
        Self::shallow_along(model, id, &mut Vec::new())
    }

    /// Element chains stop at the first type already on `path`, so a list
    /// containing itself gets a view without element.
    fn shallow_along(model: &Model, id: TypeId, path: &mut Vec<TypeId>) -> Option<Self> {
        let ty = model.get_type(id)?;
        path.push(id);
        let element = ty
            .element()
            .filter(|element| !path.contains(element))
            .and_then(|element| Self::shallow_along(model, element, path))
            .map(Box::new);
        Some(Self {
            entity: EntityKind::Type,
            id,
            name: ty.name().clone(),
            doc: ty.doc().to_string(),
            kind: ty.kind().as_str(),
            flags: KindFlags::of(model, Some(id)),
            element,
            attributes: Vec::new(),
            values: Vec::new(),
        })
    }

    /// A view including attributes and enum values.
    pub fn deep(model: &Model, id: TypeId) -> Option<Self> {
        let ty = model.get_type(id)?;
        Some(Self {
            attributes: ty
                .attributes()
                .iter()
                .filter_map(|a| AttributeView::new(model, *a))
                .collect(),
            values: ty
                .values()
                .iter()
                .filter_map(|v| EnumValueView::new(model, *v))
                .collect(),
            ..Self::shallow(model, id)?
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeView {
    pub entity: EntityKind,
    pub id: AttributeId,
    pub name: Name,
    pub doc: String,
    pub link: bool,
    /// Flags of the value type; all false while the type is unresolved.
    #[serde(flatten)]
    pub flags: KindFlags,
    pub value_type: Option<TypeView>,
}

impl AttributeView {
    pub fn new(model: &Model, id: AttributeId) -> Option<Self> {
        let attribute = model.get_attribute(id)?;
        Some(Self {
            entity: EntityKind::Attribute,
            id,
            name: attribute.name().clone(),
            doc: attribute.doc().to_string(),
            link: attribute.link(),
            flags: KindFlags::of(model, attribute.value_type()),
            value_type: attribute
                .value_type()
                .and_then(|ty| TypeView::shallow(model, ty)),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumValueView {
    pub entity: EntityKind,
    pub id: EnumValueId,
    pub name: Name,
    pub doc: String,
    pub tag: String,
}

impl EnumValueView {
    pub fn new(model: &Model, id: EnumValueId) -> Option<Self> {
        let value = model.get_value(id)?;
        Some(Self {
            entity: EntityKind::EnumValue,
            id,
            name: value.name().clone(),
            doc: value.doc().to_string(),
            tag: value.tag(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceView {
    pub entity: EntityKind,
    pub id: ResourceId,
    pub name: Name,
    pub doc: String,
    pub methods: Vec<MethodView>,
    pub locators: Vec<LocatorView>,
    pub variable_locator: Option<LocatorView>,
    pub constant_locators: Vec<LocatorView>,
}

impl ResourceView {
    /// A view without methods or locators, for references to the resource.
    pub fn shallow(model: &Model, id: ResourceId) -> Option<Self> {
        let resource = model.get_resource(id)?;
        Some(Self {
            entity: EntityKind::Resource,
            id,
            name: resource.name().clone(),
            doc: resource.doc().to_string(),
            methods: Vec::new(),
            locators: Vec::new(),
            variable_locator: None,
            constant_locators: Vec::new(),
        })
    }

    pub fn deep(model: &Model, id: ResourceId) -> Option<Self> {
        let resource = model.get_resource(id)?;
        let locators = |ids: &[LocatorId]| -> Vec<LocatorView> {
            ids.iter()
                .filter_map(|l| LocatorView::new(model, *l))
                .collect()
        };
        Some(Self {
            methods: resource
                .methods()
                .iter()
                .filter_map(|m| MethodView::new(model, *m))
                .collect(),
            locators: locators(resource.locators()),
            variable_locator: model
                .variable_locator(id)
                .and_then(|l| LocatorView::new(model, l)),
            constant_locators: locators(&model.constant_locators(id)),
            ..Self::shallow(model, id)?
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodView {
    pub entity: EntityKind,
    pub id: MethodId,
    pub name: Name,
    pub doc: String,
    pub verb: &'static str,
    pub http_method: &'static str,
    pub has_request_body: bool,
    pub parameters: Vec<ParameterView>,
}

impl MethodView {
    pub fn new(model: &Model, id: MethodId) -> Option<Self> {
        let method = model.get_method(id)?;
        Some(Self {
            entity: EntityKind::Method,
            id,
            name: method.name().clone(),
            doc: method.doc().to_string(),
            verb: method.verb().as_str(),
            http_method: method.verb().http_method(),
            has_request_body: method.verb().has_request_body(),
            parameters: method
                .parameters()
                .iter()
                .filter_map(|p| ParameterView::new(model, *p))
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterView {
    pub entity: EntityKind,
    pub id: ParameterId,
    pub name: Name,
    pub doc: String,
    pub is_in: bool,
    pub is_out: bool,
    #[serde(flatten)]
    pub flags: KindFlags,
    pub value_type: Option<TypeView>,
}

impl ParameterView {
    pub fn new(model: &Model, id: ParameterId) -> Option<Self> {
        let parameter = model.get_parameter(id)?;
        Some(Self {
            entity: EntityKind::Parameter,
            id,
            name: parameter.name().clone(),
            doc: parameter.doc().to_string(),
            is_in: parameter.direction().is_in(),
            is_out: parameter.direction().is_out(),
            flags: KindFlags::of(model, parameter.value_type()),
            value_type: parameter
                .value_type()
                .and_then(|ty| TypeView::shallow(model, ty)),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocatorView {
    pub entity: EntityKind,
    pub id: LocatorId,
    pub name: Name,
    pub doc: String,
    pub variable: bool,
    pub target: Option<Box<ResourceView>>,
}

impl LocatorView {
    pub fn new(model: &Model, id: LocatorId) -> Option<Self> {
        let locator = model.get_locator(id)?;
        Some(Self {
            entity: EntityKind::Locator,
            id,
            name: locator.name().clone(),
            doc: locator.doc().to_string(),
            variable: locator.is_variable(),
            target: ResourceView::shallow(model, locator.target()).map(Box::new),
        })
    }
}
