//! Resource values held by loaders.

use crate::registry::kind::Kind;
use crate::registry::validator::{Validator, ValidatorFactory};
use regex::Regex;
use serde_json::Value;

/// A value a loader hands out for a name.
///
/// Templates, types and schemas are usually plain data; validators are
/// registered as factories and produce [`Validator`]s on demand.
#[derive(Debug, Clone)]
pub enum Resource {
    /// Plain data. `Value::Null` counts as no value.
    Value(Value),
    /// A compiled pattern, e.g. the source of a `regexp` validator.
    Pattern(Regex),
    /// A ready-to-run validator.
    Validator(Validator),
    /// A factory producing validators from configuration.
    Factory(ValidatorFactory),
    /// An ordered sequence of resources.
    List(Vec<Resource>),
}

impl Resource {
    /// Whether this is the JSON `null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Resource::Value(Value::Null))
    }

    /// Borrow the plain data, if this is data.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Resource::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the string, if this is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Borrow the validator, if this is one.
    pub fn as_validator(&self) -> Option<&Validator> {
        match self {
            Resource::Validator(validator) => Some(validator),
            _ => None,
        }
    }

    /// Borrow the factory, if this is one.
    pub fn as_factory(&self) -> Option<&ValidatorFactory> {
        match self {
            Resource::Factory(factory) => Some(factory),
            _ => None,
        }
    }

    /// The name this value stands for when used as a lookup key.
    ///
    /// Strings are used as-is; numbers and booleans use their text form.
    /// Everything else has no key.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            Resource::Value(Value::String(s)) => Some(s.clone()),
            Resource::Value(Value::Number(n)) => Some(n.to_string()),
            Resource::Value(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Treat this value as an ordered sequence.
    ///
    /// Lists and JSON arrays yield their elements, `null` yields nothing and
    /// any other value becomes a one-element sequence.
    pub fn into_sequence(self) -> Vec<Resource> {
        match self {
            Resource::List(items) => items,
            Resource::Value(Value::Array(items)) => items.into_iter().map(Resource::Value).collect(),
            Resource::Value(Value::Null) => Vec::new(),
            other => vec![other],
        }
    }
}

/// Data compares by value, patterns by source, validators and factories by identity.
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Resource::Value(a), Resource::Value(b)) => a == b,
            (Resource::Pattern(a), Resource::Pattern(b)) => a.as_str() == b.as_str(),
            (Resource::Validator(a), Resource::Validator(b)) => a == b,
            (Resource::Factory(a), Resource::Factory(b)) => a == b,
            (Resource::List(a), Resource::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Resource::Value(value)
    }
}

impl From<&str> for Resource {
    fn from(value: &str) -> Self {
        Resource::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Resource {
    fn from(value: String) -> Self {
        Resource::Value(Value::String(value))
    }
}

impl From<Regex> for Resource {
    fn from(pattern: Regex) -> Self {
        Resource::Pattern(pattern)
    }
}

impl From<Validator> for Resource {
    fn from(validator: Validator) -> Self {
        Resource::Validator(validator)
    }
}

impl From<ValidatorFactory> for Resource {
    fn from(factory: ValidatorFactory) -> Self {
        Resource::Factory(factory)
    }
}

impl From<Vec<Resource>> for Resource {
    fn from(items: Vec<Resource>) -> Self {
        Resource::List(items)
    }
}

/// One row of a `list_<kind>s` result: `{name, <kind>: resource}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub kind: Kind,
    pub resource: Resource,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: Kind, resource: Resource) -> Self {
        Self {
            name: name.into(),
            kind,
            resource,
        }
    }

    /// Field name the resource is listed under, e.g. `template`.
    pub fn field(&self) -> String {
        self.kind.field()
    }
}
