//! Types calculator contract and the attribute typing rules every backend
//! shares.

use std::fmt;

use metamodel_concepts::{AttributeId, Model, Type, TypeId, TypeKind};
use serde::Serialize;

use crate::TypesError;

/// A reference to a type, spelled in the target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeReference {
    text: String,
}

impl TypeReference {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Maps model types to references in a target language.
///
/// Implementors supply the four kinds of references and the zero value; the
/// attribute rules in [`TypesCalculator::field_type`] and
/// [`TypesCalculator::getter_type`] are shared.
pub trait TypesCalculator: Send + Sync {
    /// The bare value, used where absence is never meaningful.
    fn value_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError>;

    /// A reference that may be absent.
    fn nullable_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError>;

    /// An ordered collection of the element of a list type.
    fn list_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError>;

    /// A string keyed collection of the element of a map type.
    fn map_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError>;

    /// An expression for the default value of the type.
    fn zero_value(&self, model: &Model, ty: TypeId) -> Result<String, TypesError>;

    /// Type of the storage field of an attribute.
    fn field_type(&self, model: &Model, attribute: AttributeId) -> Result<TypeReference, TypesError> {
        attribute_reference(self, model, attribute, Accessor::Field)
    }

    /// Type returned by the getter of an attribute.
    fn getter_type(&self, model: &Model, attribute: AttributeId) -> Result<TypeReference, TypesError> {
        attribute_reference(self, model, attribute, Accessor::Getter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor {
    Field,
    Getter,
}

fn attribute_reference<C: TypesCalculator + ?Sized>(
    calculator: &C,
    model: &Model,
    id: AttributeId,
    accessor: Accessor,
) -> Result<TypeReference, TypesError> {
    let attribute = model.get_attribute(id).ok_or_else(|| TypesError::Dangling {
        entity: id.to_string(),
    })?;
    let unclassifiable = || TypesError::Unclassifiable {
        attribute: match model.get_type(model.owner(id)) {
            Some(owner) => format!("{}.{}", owner.name(), attribute.name()),
            None => attribute.name().to_string(),
        },
    };
    let ty = attribute.value_type().ok_or_else(unclassifiable)?;
    let kind = model.get_type(ty).map(Type::kind).ok_or_else(unclassifiable)?;

    match kind {
        TypeKind::Scalar(_) | TypeKind::Enum(_) => match accessor {
            Accessor::Field => calculator.nullable_reference(model, ty),
            Accessor::Getter => calculator.value_reference(model, ty),
        },
        TypeKind::Struct(_) | TypeKind::Class(_) => calculator.nullable_reference(model, ty),
        TypeKind::List { .. } if attribute.link() => calculator.list_reference(model, ty),
        TypeKind::List { .. } => calculator.nullable_reference(model, ty),
        TypeKind::Map { .. } => calculator.nullable_reference(model, ty),
    }
}

/// Look up a type or fail with a dangling handle error.
pub fn lookup(model: &Model, ty: TypeId) -> Result<&Type, TypesError> {
    model.get_type(ty).ok_or_else(|| TypesError::Dangling {
        entity: ty.to_string(),
    })
}

/// The resolved element type of a list or map.
pub fn element(model: &Model, ty: TypeId) -> Result<TypeId, TypesError> {
    let collection = lookup(model, ty)?;
    collection.element().ok_or_else(|| TypesError::MissingElement {
        kind: collection.kind().as_str(),
        name: collection.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use metamodel_concepts::{Attribute, ScalarKind, Service, Version, VersionId};

    use super::*;

    /// Tags every reference with the kind of reference that was asked for.
    struct Tagging;

    impl TypesCalculator for Tagging {
        fn value_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
            Ok(TypeReference::new(format!("value:{}", lookup(model, ty)?.name())))
        }

        fn nullable_reference(
            &self,
            model: &Model,
            ty: TypeId,
        ) -> Result<TypeReference, TypesError> {
            Ok(TypeReference::new(format!("nullable:{}", lookup(model, ty)?.name())))
        }

        fn list_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
            Ok(TypeReference::new(format!("list:{}", lookup(model, ty)?.name())))
        }

        fn map_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
            Ok(TypeReference::new(format!("map:{}", lookup(model, ty)?.name())))
        }

        fn zero_value(&self, _model: &Model, _ty: TypeId) -> Result<String, TypesError> {
            Ok("zero".to_string())
        }
    }

    struct Fixture {
        model: Model,
        version: VersionId,
        cluster: TypeId,
    }

    fn fixture() -> Fixture {
        let mut model = Model::new();
        let service = model.add_service(Service::new("clusters_mgmt")).unwrap();
        let version = model.add_version(service, Version::new("v1")).unwrap();
        let cluster = model
            .add_type(version, Type::new("cluster", TypeKind::class()))
            .unwrap();
        Fixture {
            model,
            version,
            cluster,
        }
    }

    fn attribute(f: &mut Fixture, name: &str, kind: TypeKind, link: bool) -> AttributeId {
        let ty = f.model.add_type(f.version, Type::new(name, kind)).unwrap();
        f.model
            .add_attribute(f.cluster, Attribute::new(name, ty).with_link(link))
            .unwrap()
    }

    #[test]
    fn test_scalar_attribute() {
        let mut f = fixture();
        let name = attribute(&mut f, "name", TypeKind::Scalar(ScalarKind::String), false);
        let state = attribute(&mut f, "state", TypeKind::enumeration(), false);

        assert_eq!(Tagging.field_type(&f.model, name).unwrap().text(), "nullable:name");
        assert_eq!(Tagging.getter_type(&f.model, name).unwrap().text(), "value:name");
        assert_eq!(Tagging.getter_type(&f.model, state).unwrap().text(), "value:state");
    }

    #[test]
    fn test_struct_attribute() {
        let mut f = fixture();
        let flavour = attribute(&mut f, "flavour", TypeKind::class(), false);

        assert_eq!(Tagging.field_type(&f.model, flavour).unwrap().text(), "nullable:flavour");
        assert_eq!(Tagging.getter_type(&f.model, flavour).unwrap().text(), "nullable:flavour");
    }

    #[test]
    fn test_list_attribute_depends_on_link() {
        let mut f = fixture();
        let string = f
            .model
            .add_type(f.version, Type::new("string", TypeKind::Scalar(ScalarKind::String)))
            .unwrap();
        let groups = attribute(&mut f, "groups", TypeKind::list(string), true);
        let labels = attribute(&mut f, "labels", TypeKind::list(string), false);

        assert_eq!(Tagging.field_type(&f.model, groups).unwrap().text(), "list:groups");
        assert_eq!(Tagging.getter_type(&f.model, groups).unwrap().text(), "list:groups");
        assert_eq!(Tagging.field_type(&f.model, labels).unwrap().text(), "nullable:labels");
        assert_eq!(Tagging.getter_type(&f.model, labels).unwrap().text(), "nullable:labels");
    }

    #[test]
    fn test_map_attribute() {
        let mut f = fixture();
        let string = f
            .model
            .add_type(f.version, Type::new("string", TypeKind::Scalar(ScalarKind::String)))
            .unwrap();
        let properties = attribute(&mut f, "properties", TypeKind::map(string), true);

        assert_eq!(Tagging.getter_type(&f.model, properties).unwrap().text(), "nullable:properties");
    }

    #[test]
    fn test_unresolved_attribute_is_unclassifiable() {
        let mut f = fixture();
        let id = f
            .model
            .add_attribute(f.cluster, Attribute::unresolved("flavour"))
            .unwrap();

        let err = Tagging.field_type(&f.model, id).unwrap_err();
        assert!(matches!(
            err,
            TypesError::Unclassifiable { ref attribute } if attribute == "cluster.flavour"
        ));
    }

    #[test]
    fn test_element_of_unresolved_list() {
        let mut f = fixture();
        let list = f
            .model
            .add_type(f.version, Type::new("cluster_list", TypeKind::List { element: None }))
            .unwrap();

        assert_eq!(
            element(&f.model, list).unwrap_err().to_string(),
            "list type 'cluster_list' has no element type"
        );
    }
}
