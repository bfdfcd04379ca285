//! JavaScript types calculator.
//!
//! References are spelled the way JSDoc annotations expect them, so the
//! generated classes can be type checked by the closure compiler or by
//! TypeScript in `checkJs` mode.

use std::sync::Arc;

use metamodel_codegen::{
    NamesCalculator, TypeReference, TypesCalculator, TypesError,
    types::{element, lookup},
};
use metamodel_concepts::{Model, ScalarKind, TypeId, TypeKind, nomenclator::LIST};
use metamodel_core::Name;

/// The JSDoc reference meaning "any value".
const ANY: &str = "*";

/// Calculates JSDoc type references for model types.
#[derive(Debug, Clone)]
pub struct JavaScriptTypes {
    names: Arc<NamesCalculator>,
}

impl JavaScriptTypes {
    pub fn new(names: Arc<NamesCalculator>) -> Self {
        Self { names }
    }

    fn scalar(kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer | ScalarKind::Long | ScalarKind::Float => "number",
            ScalarKind::String => "string",
            ScalarKind::Date => "Date",
            ScalarKind::Interface => ANY,
        }
    }

    /// Spell `ty`, failing when the element chain comes back to a type
    /// already on `path`.
    fn reference(
        &self,
        model: &Model,
        ty: TypeId,
        path: &mut Vec<TypeId>,
    ) -> Result<String, TypesError> {
        let typ = lookup(model, ty)?;
        if path.contains(&ty) {
            return Err(TypesError::Cycle {
                kind: typ.kind().as_str(),
                name: typ.name().to_string(),
            });
        }
        path.push(ty);
        let text = match typ.kind() {
            TypeKind::Scalar(kind) => Self::scalar(*kind).to_string(),
            TypeKind::Enum(_) | TypeKind::Struct(_) | TypeKind::Class(_) => {
                self.names.public(typ.name())
            }
            TypeKind::List { .. } => {
                format!("Array<{}>", self.reference(model, element(model, ty)?, path)?)
            }
            TypeKind::Map { .. } => format!(
                "Object<string, {}>",
                self.reference(model, element(model, ty)?, path)?
            ),
        };
        Ok(text)
    }

    fn unsupported(reference: &'static str, model: &Model, ty: TypeId) -> TypesError {
        match lookup(model, ty) {
            Ok(ty) => TypesError::Unsupported {
                reference,
                kind: ty.kind().as_str(),
                name: ty.name().to_string(),
            },
            Err(err) => err,
        }
    }
}

impl TypesCalculator for JavaScriptTypes {
    fn value_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        Ok(TypeReference::new(self.reference(model, ty, &mut Vec::new())?))
    }

    fn nullable_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        let reference = self.value_reference(model, ty)?;
        if reference.text() == ANY {
            return Ok(reference);
        }
        Ok(TypeReference::new(format!("?{}", reference)))
    }

    /// Lists of structs have a companion list class (`ClusterList`); other
    /// lists are plain arrays.
    fn list_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        if !lookup(model, ty)?.is_list() {
            return Err(Self::unsupported("list", model, ty));
        }
        let element = lookup(model, element(model, ty)?)?;
        if element.is_struct() {
            let name = Name::cat([element.name(), &*LIST]);
            return Ok(TypeReference::new(self.names.public(&name)));
        }
        self.value_reference(model, ty)
    }

    fn map_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        if !lookup(model, ty)?.is_map() {
            return Err(Self::unsupported("map", model, ty));
        }
        self.value_reference(model, ty)
    }

    fn zero_value(&self, model: &Model, ty: TypeId) -> Result<String, TypesError> {
        let typ = lookup(model, ty)?;
        let text = match typ.kind() {
            TypeKind::Scalar(ScalarKind::Boolean) => "false".to_string(),
            TypeKind::Scalar(ScalarKind::Integer | ScalarKind::Long | ScalarKind::Float) => {
                "0".to_string()
            }
            TypeKind::Scalar(ScalarKind::String) => "\"\"".to_string(),
            TypeKind::Scalar(ScalarKind::Date | ScalarKind::Interface) | TypeKind::Enum(_) => {
                "null".to_string()
            }
            TypeKind::Struct(_) | TypeKind::Class(_) => {
                format!("new {}({{}})", self.names.public(typ.name()))
            }
            TypeKind::List { .. } => "[]".to_string(),
            TypeKind::Map { .. } => "{}".to_string(),
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use metamodel_codegen::JAVASCRIPT_NAMING;
    use metamodel_concepts::{Attribute, Service, Type, Version, VersionId};

    use super::*;

    struct Fixture {
        model: Model,
        version: VersionId,
        types: JavaScriptTypes,
    }

    impl Fixture {
        fn new() -> Self {
            let mut model = Model::new();
            let service = model.add_service(Service::new("clusters_mgmt")).unwrap();
            let version = model.add_version(service, Version::new("v1")).unwrap();
            Self {
                model,
                version,
                types: JavaScriptTypes::new(Arc::new(NamesCalculator::new(JAVASCRIPT_NAMING))),
            }
        }

        fn add(&mut self, name: &str, kind: TypeKind) -> TypeId {
            self.model.add_type(self.version, Type::new(name, kind)).unwrap()
        }
    }

    #[test]
    fn test_scalar_references() {
        let mut f = Fixture::new();
        let integer = f.add("integer", TypeKind::Scalar(ScalarKind::Integer));
        let date = f.add("date", TypeKind::Scalar(ScalarKind::Date));
        let interface = f.add("interface", TypeKind::Scalar(ScalarKind::Interface));

        assert_eq!(f.types.value_reference(&f.model, integer).unwrap().text(), "number");
        assert_eq!(f.types.nullable_reference(&f.model, date).unwrap().text(), "?Date");
        assert_eq!(f.types.nullable_reference(&f.model, interface).unwrap().text(), "*");
    }

    #[test]
    fn test_collection_references() {
        let mut f = Fixture::new();
        let string = f.add("string", TypeKind::Scalar(ScalarKind::String));
        let cluster = f.add("cluster_state", TypeKind::enumeration());
        let node = f.add("node_pool", TypeKind::class());
        let labels = f.add("labels", TypeKind::map(string));
        let states = f.add("states", TypeKind::list(cluster));
        let pools = f.add("node_pools", TypeKind::list(node));

        assert_eq!(
            f.types.value_reference(&f.model, labels).unwrap().text(),
            "Object<string, string>"
        );
        assert_eq!(f.types.list_reference(&f.model, states).unwrap().text(), "Array<ClusterState>");
        assert_eq!(f.types.list_reference(&f.model, pools).unwrap().text(), "NodePoolList");
        assert_eq!(f.types.nullable_reference(&f.model, pools).unwrap().text(), "?Array<NodePool>");
        assert_eq!(f.types.map_reference(&f.model, labels).unwrap().text(), "Object<string, string>");
    }

    #[test]
    fn test_lists_containing_each_other() {
        let mut f = Fixture::new();
        let nested = f.add("nested", TypeKind::List { element: None });
        f.model.type_mut(nested).unwrap().set_element(nested);
        let tags = f.add("tags", TypeKind::List { element: None });
        let groups = f.add("groups", TypeKind::map(tags));
        f.model.type_mut(tags).unwrap().set_element(groups);

        assert_eq!(
            f.types.value_reference(&f.model, nested).unwrap_err().to_string(),
            "element of list type 'nested' leads back to the type itself"
        );
        assert_eq!(
            f.types.nullable_reference(&f.model, groups).unwrap_err().to_string(),
            "element of map type 'groups' leads back to the type itself"
        );
        assert!(f.types.list_reference(&f.model, tags).is_err());
    }

    #[test]
    fn test_list_reference_of_non_list() {
        let mut f = Fixture::new();
        let node = f.add("node_pool", TypeKind::class());

        assert_eq!(
            f.types.list_reference(&f.model, node).unwrap_err().to_string(),
            "class type 'node_pool' has no list reference"
        );
    }

    #[test]
    fn test_zero_values() {
        let mut f = Fixture::new();
        let boolean = f.add("boolean", TypeKind::Scalar(ScalarKind::Boolean));
        let long = f.add("long", TypeKind::Scalar(ScalarKind::Long));
        let string = f.add("string", TypeKind::Scalar(ScalarKind::String));
        let cluster = f.add("cluster", TypeKind::class());
        let names = f.add("names", TypeKind::list(string));

        let zero = |ty| f.types.zero_value(&f.model, ty).unwrap();
        assert_eq!(zero(boolean), "false");
        assert_eq!(zero(long), "0");
        assert_eq!(zero(string), "\"\"");
        assert_eq!(zero(cluster), "new Cluster({})");
        assert_eq!(zero(names), "[]");
    }

    #[test]
    fn test_attribute_types() {
        let mut f = Fixture::new();
        let string = f.add("string", TypeKind::Scalar(ScalarKind::String));
        let node = f.add("node_pool", TypeKind::class());
        let pools = f.add("node_pools", TypeKind::list(node));
        let cluster = f.add("cluster", TypeKind::class());
        let name = f.model.add_attribute(cluster, Attribute::new("name", string)).unwrap();
        let linked = f
            .model
            .add_attribute(cluster, Attribute::new("node_pools", pools).with_link(true))
            .unwrap();

        assert_eq!(f.types.field_type(&f.model, name).unwrap().text(), "?string");
        assert_eq!(f.types.getter_type(&f.model, name).unwrap().text(), "string");
        assert_eq!(f.types.getter_type(&f.model, linked).unwrap().text(), "NodePoolList");
    }
}
