//! Built-in validator factories.
//!
//! These cover the validator names forms use most often. They are not part
//! of a registry unless requested with
//! [`RegistryConfig::builtin_validators`](crate::config::RegistryConfig) or
//! by adding [`validators()`] explicitly. Like any loader they can be
//! shadowed by registering a factory under the same name.
//!
//! Every validator except `required` accepts empty values (`null`, `""`,
//! `[]`), so an optional field is only checked once it has content.

use crate::registry::kind::Kind;
use crate::registry::loader::Loader;
use crate::registry::resource::Resource;
use crate::registry::validator::{FactoryArgs, Validator, ValidatorFactory, REGEXP_FACTORY};
use anyhow::{anyhow, Context};
use regex::Regex;
use serde_json::Value;

/// Label of the built-in loader.
pub const LOADER_LABEL: &str = "builtin validators";

/// A loader providing `regexp`, `required`, `minLength` and `maxLength`.
pub fn validators() -> Loader {
    Loader::new(LOADER_LABEL).with_entries(
        Kind::VALIDATOR,
        [
            (REGEXP_FACTORY, Resource::Factory(ValidatorFactory::new(regexp))),
            ("required", Resource::Factory(ValidatorFactory::new(required))),
            ("minLength", Resource::Factory(ValidatorFactory::new(min_length))),
            ("maxLength", Resource::Factory(ValidatorFactory::new(max_length))),
        ],
    )
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Text form of a scalar value, used by the string validators.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn message(args: &FactoryArgs, default: String) -> String {
    args.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(default)
}

fn regexp(args: &FactoryArgs) -> anyhow::Result<Validator> {
    let pattern = match args {
        FactoryArgs::Pattern(pattern) => pattern.clone(),
        FactoryArgs::Config(_) => {
            let source = args
                .get("regexp")
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow!("regexp validator requires a 'regexp' pattern"))?;
            Regex::new(source).with_context(|| format!("invalid regexp '{}'", source))?
        }
        FactoryArgs::Empty => return Err(anyhow!("regexp validator requires a pattern")),
    };
    let message = message(args, "Does not match pattern".to_string());

    Ok(Validator::new(move |value| {
        if is_empty(value) {
            return None;
        }
        match as_text(value) {
            Some(text) if pattern.is_match(&text) => None,
            _ => Some(message.clone()),
        }
    }))
}

fn required(args: &FactoryArgs) -> anyhow::Result<Validator> {
    let message = message(args, "Required".to_string());
    Ok(Validator::new(move |value| {
        is_empty(value).then(|| message.clone())
    }))
}

fn length_bound(args: &FactoryArgs, field: &str, validator: &str) -> anyhow::Result<usize> {
    let bound = args
        .get(field)
        .and_then(Value::as_u64)
        .ok_or_else(|| anyhow!("{} validator requires a numeric '{}'", validator, field))?;
    usize::try_from(bound).with_context(|| format!("'{}' is out of range", field))
}

fn min_length(args: &FactoryArgs) -> anyhow::Result<Validator> {
    let min = length_bound(args, "min", "minLength")?;
    let message = message(args, format!("Must be at least {} characters", min));

    Ok(Validator::new(move |value| {
        let text = as_text(value).filter(|t| !t.is_empty())?;
        (text.chars().count() < min).then(|| message.clone())
    }))
}

fn max_length(args: &FactoryArgs) -> anyhow::Result<Validator> {
    let max = length_bound(args, "max", "maxLength")?;
    let message = message(args, format!("Must be no more than {} characters", max));

    Ok(Validator::new(move |value| {
        let text = as_text(value)?;
        (text.chars().count() > max).then(|| message.clone())
    }))
}
