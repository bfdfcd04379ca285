//! Resources, their methods, parameters and locators.

use metamodel_core::Name;

use crate::{LocatorId, MethodId, ParameterId, ResourceId, TypeId};

/// An API resource: a node of the URL tree of a version.
#[derive(Debug, Clone)]
pub struct Resource {
    name: Name,
    doc: String,
    pub(crate) methods: Vec<MethodId>,
    pub(crate) locators: Vec<LocatorId>,
}

impl Resource {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            methods: Vec::new(),
            locators: Vec::new(),
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

    /// Methods of the resource, sorted by name.
    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    /// Locators of the resource, sorted by name.
    pub fn locators(&self) -> &[LocatorId] {
        &self.locators
    }
}

/// The action performed by a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    List,
    Add,
    Update,
    Delete,
    /// Any other action, sent as a `POST` to the resource.
    Post,
}

impl Verb {
    /// Get the HTTP method used on the wire.
    pub fn http_method(&self) -> &'static str {
        match self {
            Verb::Get | Verb::List => "GET",
            Verb::Add | Verb::Post => "POST",
            Verb::Update => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    /// Whether requests carry a body.
    pub fn has_request_body(&self) -> bool {
        matches!(self, Verb::Add | Verb::Update | Verb::Post)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::List => "list",
            Verb::Add => "add",
            Verb::Update => "update",
            Verb::Delete => "delete",
            Verb::Post => "post",
        }
    }

    /// Derive the verb from a method name, falling back to [`Verb::Post`].
    pub fn from_name(name: &Name) -> Self {
        match name.to_string().as_str() {
            "get" => Verb::Get,
            "list" => Verb::List,
            "add" => Verb::Add,
            "update" => Verb::Update,
            "delete" => Verb::Delete,
            _ => Verb::Post,
        }
    }
}

/// A method of a resource.
#[derive(Debug, Clone)]
pub struct Method {
    name: Name,
    doc: String,
    verb: Verb,
    pub(crate) parameters: Vec<ParameterId>,
}

impl Method {
    /// Create a method whose verb is derived from its name.
    pub fn new(name: impl Into<Name>) -> Self {
        let name = name.into();
        let verb = Verb::from_name(&name);
        Self {
            name,
            doc: String::new(),
            verb,
            parameters: Vec::new(),
        }
    }

    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
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

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterId] {
        &self.parameters
    }
}

/// Direction of a method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    In,
    Out,
    InOut,
}

impl Direction {
    pub fn is_in(&self) -> bool {
        matches!(self, Direction::In | Direction::InOut)
    }

    pub fn is_out(&self) -> bool {
        matches!(self, Direction::Out | Direction::InOut)
    }
}

/// A request or response parameter of a method.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: Name,
    doc: String,
    value_type: Option<TypeId>,
    direction: Direction,
}

impl Parameter {
    pub fn new(name: impl Into<Name>, value_type: TypeId, direction: Direction) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            value_type: Some(value_type),
            direction,
        }
    }

    /// Create a parameter whose type has not been resolved yet.
    pub fn unresolved(name: impl Into<Name>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            value_type: None,
            direction,
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

    pub fn value_type(&self) -> Option<TypeId> {
        self.value_type
    }

    pub fn set_value_type(&mut self, value_type: TypeId) {
        self.value_type = Some(value_type);
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// A path segment under a resource that routes to a nested resource.
#[derive(Debug, Clone)]
pub struct Locator {
    name: Name,
    doc: String,
    target: ResourceId,
    variable: bool,
}

impl Locator {
    /// Create a constant locator.
    pub fn new(name: impl Into<Name>, target: ResourceId) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            target,
            variable: false,
        }
    }

    /// Create a variable locator, one whose segment is an identifier.
    pub fn variable(name: impl Into<Name>, target: ResourceId) -> Self {
        Self {
            variable: true,
            ..Self::new(name, target)
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

    /// The resource this locator leads to.
    pub fn target(&self) -> ResourceId {
        self.target
    }

    pub fn is_variable(&self) -> bool {
        self.variable
    }
}
