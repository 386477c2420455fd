//! Registry configuration.
//!
//! A [`RegistryConfig`] decides how a [`Registry`](crate::Registry) is built:
//! whether diagnostics are emitted, whether the built-in validator factories
//! are loaded, and which property-type tags `load_by_prop_type` dispatches on.
//!
//! Configuration is plain serde data so hosts can embed it in their own
//! config files; [`RegistryConfig::from_yaml`] parses a YAML snippet.
//!
//! # Example
//!
//! ```
//! use schema_loader::config::RegistryConfig;
//!
//! let config = RegistryConfig::from_yaml(
//!     r#"
//! diagnostics: false
//! builtin_validators: true
//! prop_types:
//!   options: Options
//! "#,
//! )
//! .unwrap();
//!
//! assert!(!config.diagnostics);
//! let prop_types = config.prop_types.unwrap();
//! assert_eq!(prop_types.options, "Options");
//! assert_eq!(prop_types.template, "template");
//! ```

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// How to build a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Emit developer diagnostics. Defaults to on in debug builds.
    pub diagnostics: bool,

    /// Put the built-in validator factories (`regexp`, `required`,
    /// `minLength`, `maxLength`) at the end of the chain.
    pub builtin_validators: bool,

    /// Tags recognized by `load_by_prop_type`. Without them property-type
    /// dispatch is disabled.
    pub prop_types: Option<PropTypes>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            diagnostics: cfg!(debug_assertions),
            builtin_validators: false,
            prop_types: None,
        }
    }
}

impl RegistryConfig {
    /// Parse configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| RegistryError::ConfigParseError {
            message: e.to_string(),
        })
    }

    /// Enable property-type dispatch with the given tags.
    pub fn with_prop_types(mut self, prop_types: PropTypes) -> Self {
        self.prop_types = Some(prop_types);
        self
    }

    /// Load the built-in validator factories.
    pub fn with_builtin_validators(mut self) -> Self {
        self.builtin_validators = true;
        self
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

/// Property-type tags, compared by equality only.
///
/// Each field holds the tag a form field uses to ask for that kind of
/// resolution. The default tags are the field names themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropTypes {
    pub template: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub schema: String,
    pub validator: String,
    pub validators: String,
    pub processor: String,
    pub operator: String,
    pub options: String,
}

impl Default for PropTypes {
    fn default() -> Self {
        Self {
            template: "template".to_string(),
            type_: "type".to_string(),
            schema: "schema".to_string(),
            validator: "validator".to_string(),
            validators: "validators".to_string(),
            processor: "processor".to_string(),
            operator: "operator".to_string(),
            options: "options".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_prop_types() {
        let config = RegistryConfig::default();
        assert!(config.prop_types.is_none());
        assert!(!config.builtin_validators);
        assert_eq!(config.diagnostics, cfg!(debug_assertions));
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = RegistryConfig::from_yaml("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn yaml_overrides_individual_tags() {
        let config = RegistryConfig::from_yaml(
            r#"
prop_types:
  type: FieldType
  validators: ValidatorList
"#,
        )
        .unwrap();

        let tags = config.prop_types.unwrap();
        assert_eq!(tags.type_, "FieldType");
        assert_eq!(tags.validators, "ValidatorList");
        assert_eq!(tags.schema, "schema");
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let result = RegistryConfig::from_yaml("diagnostics: [not, a, bool]");
        assert!(matches!(result, Err(RegistryError::ConfigParseError { .. })));
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = RegistryConfig::default()
            .with_prop_types(PropTypes::default())
            .with_builtin_validators()
            .with_diagnostics(false);

        assert!(config.builtin_validators);
        assert!(!config.diagnostics);
        assert_eq!(config.prop_types, Some(PropTypes::default()));
    }
}
