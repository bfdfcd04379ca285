//! Template helpers: typed functions exposed to templates as filters.

use std::{collections::HashMap, fmt, sync::Arc};

use indexmap::IndexMap;
use metamodel_concepts::{
    AttributeId, EnumValueId, LocatorId, MethodId, Model, ParameterId, ResourceId, TypeId,
};
use tera::{Tera, Value};

use crate::{HelperError, TypesError, views::EntityKind};

/// A helper over one kind of model entity.
pub type EntityFn<H> = Arc<dyn Fn(&Model, H) -> Result<String, TypesError> + Send + Sync>;

/// A helper over plain text.
pub type TextFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A strongly typed template helper.
///
/// Entity helpers are applied to views (`{{ attribute | field_name }}`); the
/// filter checks the view is of the right kind and resolves its handle
/// before calling the function. Every helper accepts an optional `indent`
/// argument that indents all lines but the first of a multi-line result.
#[derive(Clone)]
pub enum Helper {
    Type(EntityFn<TypeId>),
    Attribute(EntityFn<AttributeId>),
    EnumValue(EntityFn<EnumValueId>),
    Resource(EntityFn<ResourceId>),
    Method(EntityFn<MethodId>),
    Parameter(EntityFn<ParameterId>),
    Locator(EntityFn<LocatorId>),
    Text(TextFn),
}

impl Helper {
    pub fn ty(
        f: impl Fn(&Model, TypeId) -> Result<String, TypesError> + Send + Sync + 'static,
    ) -> Self {
        Helper::Type(Arc::new(f))
    }

    pub fn attribute(
        f: impl Fn(&Model, AttributeId) -> Result<String, TypesError> + Send + Sync + 'static,
    ) -> Self {
        Helper::Attribute(Arc::new(f))
    }

    pub fn enum_value(
        f: impl Fn(&Model, EnumValueId) -> Result<String, TypesError> + Send + Sync + 'static,
    ) -> Self {
        Helper::EnumValue(Arc::new(f))
    }

    pub fn resource(
        f: impl Fn(&Model, ResourceId) -> Result<String, TypesError> + Send + Sync + 'static,
    ) -> Self {
        Helper::Resource(Arc::new(f))
    }

    pub fn method(
        f: impl Fn(&Model, MethodId) -> Result<String, TypesError> + Send + Sync + 'static,
    ) -> Self {
        Helper::Method(Arc::new(f))
    }

    pub fn parameter(
        f: impl Fn(&Model, ParameterId) -> Result<String, TypesError> + Send + Sync + 'static,
    ) -> Self {
        Helper::Parameter(Arc::new(f))
    }

    pub fn locator(
        f: impl Fn(&Model, LocatorId) -> Result<String, TypesError> + Send + Sync + 'static,
    ) -> Self {
        Helper::Locator(Arc::new(f))
    }

    pub fn text(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Helper::Text(Arc::new(f))
    }

    /// What the helper must be applied to.
    pub fn accepts(&self) -> &'static str {
        match self {
            Helper::Type(_) => "a type view",
            Helper::Attribute(_) => "an attribute view",
            Helper::EnumValue(_) => "an enum_value view",
            Helper::Resource(_) => "a resource view",
            Helper::Method(_) => "a method view",
            Helper::Parameter(_) => "a parameter view",
            Helper::Locator(_) => "a locator view",
            Helper::Text(_) => "text",
        }
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Helper({})", self.accepts())
    }
}

/// The helpers available to the templates of one backend, by name.
#[derive(Debug, Clone)]
pub struct Helpers {
    map: IndexMap<&'static str, Helper>,
}

impl Helpers {
    /// Create a registry holding the generic text helpers (`line_comment`).
    pub fn new() -> Self {
        let mut map = IndexMap::new();
        map.insert("line_comment", Helper::text(line_comment));
        Self { map }
    }

    /// Register a helper, replacing any previous one with the same name.
    pub fn with(mut self, name: &'static str, helper: Helper) -> Self {
        self.insert(name, helper);
        self
    }

    pub fn insert(&mut self, name: &'static str, helper: Helper) {
        self.map.insert(name, helper);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.map.get(name)
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.map.keys().copied()
    }

    /// The names in `required` that are not registered.
    pub fn missing(&self, required: &[&'static str]) -> Vec<&'static str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Register every helper as a filter of `tera`, resolving views
    /// against `model`.
    pub(crate) fn install(&self, tera: &mut Tera, model: &Arc<Model>) {
        macro_rules! entity {
            ($name:expr, $kind:expr, $f:expr, $id:ty, $get:ident) => {
                tera.register_filter(
                    $name,
                    entity_filter($name, $kind, model.clone(), $f.clone(), |model, raw| {
                        let id = <$id>::from_raw(raw);
                        model.$get(id).map(|_| id)
                    }),
                )
            };
        }

        for (&name, helper) in &self.map {
            match helper {
                Helper::Type(f) => entity!(name, EntityKind::Type, f, TypeId, get_type),
                Helper::Attribute(f) => {
                    entity!(name, EntityKind::Attribute, f, AttributeId, get_attribute)
                }
                Helper::EnumValue(f) => {
                    entity!(name, EntityKind::EnumValue, f, EnumValueId, get_value)
                }
                Helper::Resource(f) => {
                    entity!(name, EntityKind::Resource, f, ResourceId, get_resource)
                }
                Helper::Method(f) => entity!(name, EntityKind::Method, f, MethodId, get_method),
                Helper::Parameter(f) => {
                    entity!(name, EntityKind::Parameter, f, ParameterId, get_parameter)
                }
                Helper::Locator(f) => entity!(name, EntityKind::Locator, f, LocatorId, get_locator),
                Helper::Text(f) => tera.register_filter(name, text_filter(name, f.clone())),
            }
        }
    }
}

impl Default for Helpers {
    fn default() -> Self {
        Self::new()
    }
}

fn entity_filter<H: Copy + 'static>(
    name: &'static str,
    kind: EntityKind,
    model: Arc<Model>,
    call: EntityFn<H>,
    resolve: fn(&Model, u32) -> Option<H>,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static {
    move |value: &Value, args: &HashMap<String, Value>| {
        let raw = view_handle(name, kind, value).map_err(|e| filter_error(name, e))?;
        let id = resolve(&model, raw).ok_or_else(|| {
            filter_error(
                name,
                HelperError::Dangling {
                    helper: name.to_string(),
                    entity: format!("{} #{}", kind.as_str(), raw),
                },
            )
        })?;
        let text = call(&model, id).map_err(|e| filter_error(name, HelperError::from(e)))?;
        Ok(Value::String(indent(text, args)))
    }
}

fn text_filter(
    name: &'static str,
    call: TextFn,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static {
    move |value: &Value, args: &HashMap<String, Value>| {
        let text = match value {
            Value::String(text) => text.as_str(),
            Value::Null => "",
            other => {
                return Err(filter_error(
                    name,
                    HelperError::Mismatch {
                        helper: name.to_string(),
                        expected: "text",
                        found: describe(other),
                    },
                ));
            }
        };
        Ok(Value::String(indent(call(text), args)))
    }
}

/// Extract the handle of a view of the given kind.
fn view_handle(name: &str, kind: EntityKind, value: &Value) -> Result<u32, HelperError> {
    let mismatch = || HelperError::Mismatch {
        helper: name.to_string(),
        expected: expected(kind),
        found: describe(value),
    };
    if value.get("entity").and_then(Value::as_str) != Some(kind.as_str()) {
        return Err(mismatch());
    }
    value
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(mismatch)
}

fn expected(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Version => "a version view",
        EntityKind::Type => "a type view",
        EntityKind::Attribute => "an attribute view",
        EntityKind::EnumValue => "an enum_value view",
        EntityKind::Resource => "a resource view",
        EntityKind::Method => "a method view",
        EntityKind::Parameter => "a parameter view",
        EntityKind::Locator => "a locator view",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(map) => match map.get("entity").and_then(Value::as_str) {
            Some(entity) => format!("a {} view", entity),
            None => "an object".to_string(),
        },
    }
}

fn filter_error(name: &str, error: HelperError) -> tera::Error {
    tera::Error::chain(format!("helper '{}' failed", name), error)
}

/// Indent every line after the first by the `indent` argument, if given.
fn indent(text: String, args: &HashMap<String, Value>) -> String {
    let Some(width) = args.get("indent").and_then(Value::as_u64) else {
        return text;
    };
    let padding = " ".repeat(width as usize);
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", padding, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turn documentation into `//` line comments. Empty documentation gives
/// an empty string.
pub fn line_comment(doc: &str) -> String {
    let doc = doc.trim_end();
    if doc.trim().is_empty() {
        return String::new();
    }
    doc.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.trim().is_empty() {
                "//".to_string()
            } else {
                format!("// {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
