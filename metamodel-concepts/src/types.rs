//! Model types, their attributes and enumerated values.

use metamodel_core::Name;

use crate::{AttributeId, EnumValueId, TypeId};

/// The built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Integer,
    Long,
    Float,
    String,
    Date,
    /// An arbitrary value whose shape the model does not describe.
    Interface,
}

impl ScalarKind {
    /// Get the lowercase model name of the scalar.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
            ScalarKind::Interface => "interface",
        }
    }
}

/// Handles of the children owned by a type.
///
/// Only the model can add members; a freshly created value is always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Members<H>(Vec<H>);

impl<H> Default for Members<H> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<H: Copy> Members<H> {
    pub fn as_slice(&self) -> &[H] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = H> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Vec<H> {
        &mut self.0
    }
}

/// What a type is. Each variant carries only the data of its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Scalar(ScalarKind),
    /// Enumerated type; values keep their insertion order.
    Enum(Members<EnumValueId>),
    /// Plain data structure; attributes are sorted by name.
    Struct(Members<AttributeId>),
    /// Structure with identity (`id`, `href` and the link flag).
    Class(Members<AttributeId>),
    /// Ordered collection. The element is `None` while unresolved.
    List { element: Option<TypeId> },
    /// String keyed map. The element is `None` while unresolved.
    Map { element: Option<TypeId> },
}

impl TypeKind {
    pub fn enumeration() -> Self {
        TypeKind::Enum(Members::default())
    }

    pub fn structure() -> Self {
        TypeKind::Struct(Members::default())
    }

    pub fn class() -> Self {
        TypeKind::Class(Members::default())
    }

    pub fn list(element: TypeId) -> Self {
        TypeKind::List {
            element: Some(element),
        }
    }

    pub fn map(element: TypeId) -> Self {
        TypeKind::Map {
            element: Some(element),
        }
    }

    /// Get the lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar(_) => "scalar",
            TypeKind::Enum(_) => "enum",
            TypeKind::Struct(_) => "struct",
            TypeKind::Class(_) => "class",
            TypeKind::List { .. } => "list",
            TypeKind::Map { .. } => "map",
        }
    }

    fn clear_members(&mut self) {
        match self {
            TypeKind::Enum(values) => values.inner_mut().clear(),
            TypeKind::Struct(attributes) | TypeKind::Class(attributes) => {
                attributes.inner_mut().clear()
            }
            TypeKind::Scalar(_) | TypeKind::List { .. } | TypeKind::Map { .. } => {}
        }
    }
}

/// A model type.
#[derive(Debug, Clone)]
pub struct Type {
    name: Name,
    doc: String,
    kind: TypeKind,
}

impl Type {
    pub fn new(name: impl Into<Name>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            kind,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn set_doc(&mut self, doc: impl Into<String>) {
        self.doc = doc.into();
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Scalars and enums: values that are copied rather than referenced.
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar(_) | TypeKind::Enum(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    /// Structs and classes.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_) | TypeKind::Class(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, TypeKind::List { .. })
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, TypeKind::Map { .. })
    }

    /// The scalar kind, for scalar types.
    pub fn scalar(&self) -> Option<ScalarKind> {
        match self.kind {
            TypeKind::Scalar(kind) => Some(kind),
            _ => None,
        }
    }

    /// The element type of a list or map, if resolved.
    pub fn element(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::List { element } | TypeKind::Map { element } => element,
            _ => None,
        }
    }

    /// Resolve the element type of a list or map. No-op for other kinds.
    pub fn set_element(&mut self, value: TypeId) {
        if let TypeKind::List { element } | TypeKind::Map { element } = &mut self.kind {
            *element = Some(value);
        }
    }

    /// Attributes of a struct or class, sorted by name. Empty otherwise.
    pub fn attributes(&self) -> &[AttributeId] {
        match &self.kind {
            TypeKind::Struct(attributes) | TypeKind::Class(attributes) => attributes.as_slice(),
            _ => &[],
        }
    }

    /// Values of an enum, in insertion order. Empty otherwise.
    pub fn values(&self) -> &[EnumValueId] {
        match &self.kind {
            TypeKind::Enum(values) => values.as_slice(),
            _ => &[],
        }
    }

    pub(crate) fn attributes_mut(&mut self) -> Option<&mut Vec<AttributeId>> {
        match &mut self.kind {
            TypeKind::Struct(attributes) | TypeKind::Class(attributes) => {
                Some(attributes.inner_mut())
            }
            _ => None,
        }
    }

    pub(crate) fn values_mut(&mut self) -> Option<&mut Vec<EnumValueId>> {
        match &mut self.kind {
            TypeKind::Enum(values) => Some(values.inner_mut()),
            _ => None,
        }
    }

    pub(crate) fn detach(mut self) -> Self {
        self.kind.clear_members();
        self
    }
}

/// An attribute of a struct or class type.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: Name,
    doc: String,
    value_type: Option<TypeId>,
    link: bool,
}

impl Attribute {
    pub fn new(name: impl Into<Name>, value_type: TypeId) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            value_type: Some(value_type),
            link: false,
        }
    }

    /// Create an attribute whose type has not been resolved yet.
    pub fn unresolved(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            value_type: None,
            link: false,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Mark the attribute as a navigable relationship instead of embedded data.
    pub fn with_link(mut self, link: bool) -> Self {
        self.link = link;
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn set_doc(&mut self, doc: impl Into<String>) {
        self.doc = doc.into();
    }

    /// The type of the attribute's value, if resolved.
    pub fn value_type(&self) -> Option<TypeId> {
        self.value_type
    }

    pub fn set_value_type(&mut self, value_type: TypeId) {
        self.value_type = Some(value_type);
    }

    pub fn link(&self) -> bool {
        self.link
    }

    pub fn set_link(&mut self, link: bool) {
        self.link = link;
    }
}

/// A value of an enumerated type.
#[derive(Debug, Clone)]
pub struct EnumValue {
    name: Name,
    doc: String,
    tag: Option<String>,
}

impl EnumValue {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            tag: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Override the literal used on the wire for this value.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn set_doc(&mut self, doc: impl Into<String>) {
        self.doc = doc.into();
    }

    /// The literal tag; defaults to the canonical form of the name.
    pub fn tag(&self) -> String {
        self.tag.clone().unwrap_or_else(|| self.name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        let scalar = Type::new("string", TypeKind::Scalar(ScalarKind::String));
        assert!(scalar.is_scalar());
        assert!(!scalar.is_struct());
        assert_eq!(scalar.scalar(), Some(ScalarKind::String));

        let enumeration = Type::new("state", TypeKind::enumeration());
        assert!(enumeration.is_scalar());
        assert!(enumeration.is_enum());

        let class = Type::new("cluster", TypeKind::class());
        assert!(class.is_struct());
        assert!(class.is_class());

        let list = Type::new("cluster_list", TypeKind::List { element: None });
        assert!(list.is_list());
        assert_eq!(list.element(), None);
    }

    #[test]
    fn test_set_element_only_applies_to_collections() {
        let element = TypeId::new(3);

        let mut map = Type::new("labels", TypeKind::Map { element: None });
        map.set_element(element);
        assert_eq!(map.element(), Some(element));

        let mut scalar = Type::new("string", TypeKind::Scalar(ScalarKind::String));
        scalar.set_element(element);
        assert_eq!(scalar.element(), None);
    }

    #[test]
    fn test_enum_value_tag_defaults_to_name() {
        let value = EnumValue::new("NotReady");
        assert_eq!(value.tag(), "not_ready");
        assert_eq!(value.with_tag("not-ready").tag(), "not-ready");
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(TypeKind::class().as_str(), "class");
        assert_eq!(TypeKind::map(TypeId::new(0)).as_str(), "map");
        assert_eq!(ScalarKind::Date.as_str(), "date");
    }
}
