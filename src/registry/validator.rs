//! Validators, validator factories and validator normalization.
//!
//! Validators are registered as factories. A form field describes the
//! validator it wants in one of several shapes (a name, a `/pattern/`, a
//! configuration object, a ready validator) and [`Registry::init_validator`]
//! turns that description into something callable.
//!
//! # Normalization order
//!
//! 1. `"/source/"` compiles `source` and continues as a pattern
//! 2. `"name"` loads factory `name` and calls it without configuration
//! 3. a pattern loads the `regexp` factory with [`FactoryArgs::Pattern`]
//! 4. `{"type": "name", ..}` loads factory `name` with the whole object
//! 5. a [`Validator`] is returned unchanged
//! 6. anything else is used as a factory name, if it has a key

use crate::diagnostics::warning;
use crate::error::{RegistryError, Result};
use crate::registry::resolver::Registry;
use crate::registry::resource::Resource;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Name of the factory that builds pattern validators.
pub const REGEXP_FACTORY: &str = "regexp";

type CheckFn = dyn Fn(&Value) -> Option<String> + Send + Sync;

/// A callable validator: returns an error message for an invalid value.
#[derive(Clone)]
pub struct Validator {
    check: Arc<CheckFn>,
}

impl Validator {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// `None` when `value` is valid, otherwise the message to show.
    pub fn validate(&self, value: &Value) -> Option<String> {
        (self.check)(value)
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_none()
    }
}

/// Validators are equal when they are the same validator.
impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.check, &other.check)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({:p})", Arc::as_ptr(&self.check))
    }
}

/// What a validator factory is called with.
#[derive(Debug, Clone)]
pub enum FactoryArgs {
    /// No configuration, e.g. for `"required"`.
    Empty,
    /// The `{regexp: pattern}` configuration.
    Pattern(Regex),
    /// The full configuration object, including its `type`.
    Config(Value),
}

impl FactoryArgs {
    /// The configured pattern.
    pub fn pattern(&self) -> Option<&Regex> {
        match self {
            FactoryArgs::Pattern(pattern) => Some(pattern),
            _ => None,
        }
    }

    /// A configuration field, e.g. `min` for `minLength`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            FactoryArgs::Config(config) => config.get(key),
            _ => None,
        }
    }

    /// The whole configuration object.
    pub fn config(&self) -> Option<&Value> {
        match self {
            FactoryArgs::Config(config) => Some(config),
            _ => None,
        }
    }
}

type FactoryFn = dyn Fn(&FactoryArgs) -> anyhow::Result<Validator> + Send + Sync;

/// Builds validators from configuration.
#[derive(Clone)]
pub struct ValidatorFactory {
    create: Arc<FactoryFn>,
}

impl ValidatorFactory {
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(&FactoryArgs) -> anyhow::Result<Validator> + Send + Sync + 'static,
    {
        Self {
            create: Arc::new(create),
        }
    }

    pub fn create(&self, args: &FactoryArgs) -> anyhow::Result<Validator> {
        (self.create)(args)
    }
}

impl PartialEq for ValidatorFactory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.create, &other.create)
    }
}

impl fmt::Debug for ValidatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatorFactory({:p})", Arc::as_ptr(&self.create))
    }
}

/// The pattern source of a `/source/` string, if it is one.
fn pattern_source(spec: &str) -> Option<&str> {
    if spec.len() >= 2 && spec.starts_with('/') && spec.ends_with('/') {
        Some(&spec[1..spec.len() - 1])
    } else {
        None
    }
}

/// JavaScript-style truthiness of a `type` field.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Registry {
    /// Turn a validator description into a validator.
    ///
    /// `Ok(None)` means nothing could be built, e.g. because the named
    /// factory is not registered; a diagnostic is emitted in that case but
    /// it is not an error.
    pub fn init_validator(&self, spec: &Resource) -> Result<Option<Validator>> {
        match spec {
            Resource::Value(Value::String(s)) => match pattern_source(s) {
                Some(source) => {
                    let pattern = Regex::new(source).map_err(|e| RegistryError::InvalidPattern {
                        pattern: s.clone(),
                        message: e.to_string(),
                    })?;
                    self.pattern_validator(pattern)
                }
                None => {
                    let loaded = self.load_validator(s);
                    warning!(
                        self.diagnostics(),
                        loaded.is_some(),
                        "Validator was not found for \"%s\"",
                        s
                    );
                    self.invoke_factory(s, loaded, &FactoryArgs::Empty)
                }
            },
            Resource::Pattern(pattern) => self.pattern_validator(pattern.clone()),
            Resource::Value(config @ Value::Object(map))
                if map.get("type").is_some_and(truthy) =>
            {
                let name = map
                    .get("type")
                    .and_then(|t| Resource::Value(t.clone()).lookup_key())
                    .unwrap_or_default();
                let loaded = self.load_validator(&name);
                self.invoke_factory(&name, loaded, &FactoryArgs::Config(config.clone()))
            }
            Resource::Validator(validator) => Ok(Some(validator.clone())),
            other => match other.lookup_key() {
                Some(name) => {
                    let loaded = self.load_validator(&name);
                    self.invoke_factory(&name, loaded, &FactoryArgs::Empty)
                }
                None => Ok(None),
            },
        }
    }

    /// Normalize every element of `spec` taken as a sequence, keeping order.
    pub fn init_validators(&self, spec: Resource) -> Result<Vec<Option<Validator>>> {
        spec.into_sequence()
            .iter()
            .map(|item| self.init_validator(item))
            .collect()
    }

    fn pattern_validator(&self, pattern: Regex) -> Result<Option<Validator>> {
        let loaded = self.load_validator(REGEXP_FACTORY);
        self.invoke_factory(REGEXP_FACTORY, loaded, &FactoryArgs::Pattern(pattern))
    }

    fn invoke_factory(
        &self,
        name: &str,
        loaded: Option<Resource>,
        args: &FactoryArgs,
    ) -> Result<Option<Validator>> {
        match loaded {
            Some(Resource::Factory(factory)) => factory
                .create(args)
                .map(Some)
                .map_err(|source| RegistryError::ValidatorFactory {
                    name: name.to_string(),
                    source,
                }),
            Some(_) => {
                warning!(
                    self.diagnostics(),
                    false,
                    "Validator \"%s\" is not a validator factory",
                    name
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::diagnostics::Diagnostics;
    use serde_json::json;
    use std::sync::Mutex;

    fn registry() -> Registry {
        Registry::with_config(RegistryConfig::default()).with_diagnostics(Diagnostics::capturing())
    }

    /// Registers a factory that records the arguments it was called with.
    fn recording_factory(registry: &mut Registry, name: &str) -> Arc<Mutex<Vec<FactoryArgs>>> {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        registry.add_validator(
            name,
            ValidatorFactory::new(move |args| {
                seen.lock().unwrap().push(args.clone());
                Ok(Validator::new(|_| None))
            }),
        );
        calls
    }

    #[test]
    fn pattern_source_requires_both_slashes() {
        assert_eq!(pattern_source("/abc/"), Some("abc"));
        assert_eq!(pattern_source("//"), Some(""));
        assert_eq!(pattern_source("/"), None);
        assert_eq!(pattern_source("/abc"), None);
        assert_eq!(pattern_source("abc/"), None);
    }

    #[test]
    fn slash_delimited_string_uses_regexp_factory() {
        let mut registry = registry();
        let calls = recording_factory(&mut registry, REGEXP_FACTORY);

        let validator = registry.init_validator(&Resource::from("/abc/")).unwrap();
        assert!(validator.is_some());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].pattern().map(Regex::as_str), Some("abc"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let registry = registry();
        let result = registry.init_validator(&Resource::from("/(/"));
        assert!(matches!(result, Err(RegistryError::InvalidPattern { .. })));
    }

    #[test]
    fn compiled_pattern_uses_regexp_factory() {
        let mut registry = registry();
        let calls = recording_factory(&mut registry, REGEXP_FACTORY);

        let pattern = Regex::new("^[0-9]+$").unwrap();
        registry.init_validator(&Resource::Pattern(pattern)).unwrap();

        assert_eq!(
            calls.lock().unwrap()[0].pattern().map(Regex::as_str),
            Some("^[0-9]+$")
        );
    }

    #[test]
    fn named_validator_is_called_without_configuration() {
        let mut registry = registry();
        let calls = recording_factory(&mut registry, "required");

        let validator = registry.init_validator(&Resource::from("required")).unwrap();
        assert!(validator.is_some());
        assert!(matches!(calls.lock().unwrap()[0], FactoryArgs::Empty));
        assert!(registry.diagnostics().messages().is_empty());
    }

    #[test]
    fn missing_named_validator_warns_and_yields_none() {
        let registry = registry();
        let validator = registry.init_validator(&Resource::from("zip")).unwrap();

        assert!(validator.is_none());
        assert_eq!(
            registry.diagnostics().messages(),
            vec!["Loader warning: Validator was not found for \"zip\"".to_string()]
        );
    }

    #[test]
    fn typed_config_passes_whole_object() {
        let mut registry = registry();
        let calls = recording_factory(&mut registry, "minLength");

        let spec = json!({"type": "minLength", "min": 3});
        registry.init_validator(&Resource::from(spec.clone())).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].config(), Some(&spec));
        assert_eq!(calls[0].get("min"), Some(&json!(3)));
    }

    #[test]
    fn validator_is_returned_unchanged() {
        let registry = registry();
        let validator = Validator::new(|_| Some("nope".into()));

        let result = registry
            .init_validator(&Resource::from(validator.clone()))
            .unwrap();
        assert_eq!(result, Some(validator));
    }

    #[test]
    fn object_without_type_has_no_key() {
        let registry = registry();
        let result = registry.init_validator(&Resource::from(json!({"min": 1}))).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_type_is_not_truthy() {
        let mut registry = registry();
        let calls = recording_factory(&mut registry, "");

        let result = registry
            .init_validator(&Resource::from(json!({"type": ""})))
            .unwrap();
        assert!(result.is_none());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn numeric_spec_is_used_as_key() {
        let mut registry = registry();
        let calls = recording_factory(&mut registry, "7");

        registry.init_validator(&Resource::from(json!(7))).unwrap();
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn non_factory_entry_warns() {
        let mut registry = registry();
        registry.add_validator("plain", json!("not callable"));

        let result = registry.init_validator(&Resource::from("plain")).unwrap();
        assert!(result.is_none());
        assert!(registry.diagnostics().messages()[0].contains("not a validator factory"));
    }

    #[test]
    fn factory_failure_is_reported() {
        let mut registry = registry();
        registry.add_validator(
            "broken",
            ValidatorFactory::new(|_| Err(anyhow::anyhow!("bad config"))),
        );

        let result = registry.init_validator(&Resource::from("broken"));
        match result {
            Err(RegistryError::ValidatorFactory { name, .. }) => assert_eq!(name, "broken"),
            other => panic!("expected factory error, got {other:?}"),
        }
    }

    #[test]
    fn init_validators_keeps_order_and_gaps() {
        let mut registry = registry();
        recording_factory(&mut registry, "required");
        let ready = Validator::new(|_| None);

        let spec = Resource::List(vec![
            Resource::from("required"),
            Resource::from("unknown"),
            Resource::from(ready.clone()),
        ]);
        let validators = registry.init_validators(spec).unwrap();

        assert_eq!(validators.len(), 3);
        assert!(validators[0].is_some());
        assert!(validators[1].is_none());
        assert_eq!(validators[2], Some(ready));
    }

    #[test]
    fn validator_reports_messages() {
        let validator = Validator::new(|v| (v == &json!("")).then(|| "Required".to_string()));
        assert_eq!(validator.validate(&json!("")), Some("Required".to_string()));
        assert!(validator.is_valid(&json!("x")));
    }
}
