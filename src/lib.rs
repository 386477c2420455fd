//! schema-loader - pluggable loader chain for form resources.
//!
//! Independent loaders register named templates, types, schemas, validators,
//! processors and operators on a [`Registry`]. Lookups walk the loader chain
//! newest first and return the first answer; listings concatenate every
//! loader's entries in the same order.
//!
//! # Modules
//!
//! - [`config`] - Registry configuration and property-type tags
//! - [`diagnostics`] - Developer-facing warnings
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Kinds, loaders, the chain, validators and prop-type dispatch
//!
//! # Example
//!
//! ```
//! use schema_loader::config::{PropTypes, RegistryConfig};
//! use schema_loader::registry::{Resolved, Resource};
//! use schema_loader::Registry;
//! use serde_json::json;
//!
//! let config = RegistryConfig::default()
//!     .with_prop_types(PropTypes::default())
//!     .with_builtin_validators();
//! let mut registry = Registry::with_config(config);
//! registry.add_template("fieldset", "<fieldset/>");
//!
//! let template = registry.load_by_prop_type("template", Resource::from("fieldset")).unwrap();
//! assert_eq!(template, Resolved::Resource(Resource::from("<fieldset/>")));
//!
//! let Resolved::Validator(zip) = registry.load_by_prop_type("validator", Resource::from("/^[0-9]{5}$/")).unwrap() else {
//!     panic!("expected a validator");
//! };
//! assert!(zip.is_valid(&json!("12345")));
//! assert!(!zip.is_valid(&json!("1234")));
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod registry;

pub use config::{PropTypes, RegistryConfig};
pub use diagnostics::Diagnostics;
pub use error::{RegistryError, Result};
pub use registry::Registry;
