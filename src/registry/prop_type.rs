//! Property-type dispatch.
//!
//! Form fields declare what kind of value a property holds with a tag. For
//! tags naming a resource kind the property value is a name to resolve; for
//! `validator(s)` it is a validator description; for `options` it is a list
//! of choices normalized to `{label, value}` objects.

use crate::config::PropTypes;
use crate::diagnostics::warning;
use crate::error::Result;
use crate::registry::kind::Kind;
use crate::registry::resolver::Registry;
use crate::registry::resource::Resource;
use crate::registry::validator::Validator;
use serde_json::{json, Value};

/// What a property-type tag asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Template,
    Type,
    Schema,
    Processor,
    Operator,
    Validator,
    Validators,
    Options,
}

impl PropKind {
    /// The resource kind loaded for this property type, if it loads one.
    pub fn resource_kind(self) -> Option<Kind> {
        match self {
            PropKind::Template => Some(Kind::TEMPLATE),
            PropKind::Type => Some(Kind::TYPE),
            PropKind::Schema => Some(Kind::SCHEMA),
            PropKind::Processor => Some(Kind::PROCESSOR),
            PropKind::Operator => Some(Kind::OPERATOR),
            PropKind::Validator | PropKind::Validators | PropKind::Options => None,
        }
    }
}

impl PropTypes {
    /// Which dispatch `tag` selects, if any.
    pub fn classify(&self, tag: &str) -> Option<PropKind> {
        let table = [
            (&self.options, PropKind::Options),
            (&self.template, PropKind::Template),
            (&self.schema, PropKind::Schema),
            (&self.type_, PropKind::Type),
            (&self.processor, PropKind::Processor),
            (&self.operator, PropKind::Operator),
            (&self.validator, PropKind::Validator),
            (&self.validators, PropKind::Validators),
        ];
        table
            .into_iter()
            .find(|(candidate, _)| candidate.as_str() == tag)
            .map(|(_, kind)| kind)
    }
}

/// Result of [`Registry::load_by_prop_type`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A resource loaded by name.
    Resource(Resource),
    /// Option list with strings expanded to `{label, value}`.
    Options(Vec<Resource>),
    /// A normalized validator.
    Validator(Validator),
    /// Normalized validators, in order; `None` where nothing could be built.
    Validators(Vec<Option<Validator>>),
    /// Nothing resolved; the input value as given.
    Unchanged(Resource),
}

impl Resolved {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Resolved::Unchanged(_))
    }

    /// The resolved resource, if dispatch loaded one.
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Resolved::Resource(resource) => Some(resource),
            _ => None,
        }
    }
}

/// Expand a string choice to `{label: s, value: s}`; anything else is kept.
pub fn to_label_value(choice: Resource) -> Resource {
    match choice {
        Resource::Value(Value::String(s)) => Resource::Value(json!({ "label": s, "value": s })),
        other => other,
    }
}

impl Registry {
    /// Resolve `value` according to the property type tagged `prop_type`.
    ///
    /// Unknown tags and lookups that find nothing return the value
    /// unchanged. Without configured [`PropTypes`] nothing is dispatched and
    /// a diagnostic is emitted instead.
    pub fn load_by_prop_type(&self, prop_type: &str, value: Resource) -> Result<Resolved> {
        let Some(prop_types) = self.prop_types() else {
            warning!(self.diagnostics(), false, "No prop types supplied to loader");
            return Ok(Resolved::Unchanged(value));
        };

        let Some(prop_kind) = prop_types.classify(prop_type) else {
            tracing::trace!("Prop type '{}' is not dispatched", prop_type);
            return Ok(Resolved::Unchanged(value));
        };
        tracing::trace!("Dispatching prop type '{}' as {:?}", prop_type, prop_kind);

        let resolved = match prop_kind {
            PropKind::Options => Some(Resolved::Options(
                value.clone().into_sequence().into_iter().map(to_label_value).collect(),
            )),
            PropKind::Validator => self.init_validator(&value)?.map(Resolved::Validator),
            PropKind::Validators => Some(Resolved::Validators(self.init_validators(value.clone())?)),
            other => other
                .resource_kind()
                .zip(value.lookup_key())
                .and_then(|(kind, name)| self.load(&kind, &name))
                .map(Resolved::Resource),
        };

        Ok(resolved.unwrap_or(Resolved::Unchanged(value)))
    }
}
