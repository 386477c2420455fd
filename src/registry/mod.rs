//! Loader registry.
//!
//! This module resolves named resources through a chain of loaders:
//! - Kinds name resource categories ([`Kind`])
//! - Loaders bundle one provider per kind ([`Loader`], [`Provider`])
//! - The registry orders loaders and resolves through them ([`Registry`])
//! - Validators are built from descriptions ([`Registry::init_validator`])
//! - Property types dispatch to the right resolution ([`Registry::load_by_prop_type`])
//!
//! # Resolution Order
//!
//! Loaders are asked newest first; the first non-null answer wins. Loaders
//! passed to [`Registry::with_loaders`] keep their given order, and the
//! built-in validators (when enabled) are always asked last.
//!
//! # Example
//!
//! ```
//! use schema_loader::registry::{Registry, Resource};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.add_type("Text", json!({"input": "text"}));
//! registry.add_type("Text", json!({"input": "textarea"}));
//!
//! // The later registration shadows the earlier one
//! assert_eq!(
//!     registry.load_type("Text"),
//!     Some(Resource::from(json!({"input": "textarea"})))
//! );
//! // Listings keep both, newest first
//! assert_eq!(registry.list_types().len(), 2);
//! ```

pub mod accessors;
pub mod builtin;
pub mod kind;
pub mod loader;
pub mod prop_type;
pub mod resolver;
pub mod resource;
pub mod validator;

// Re-exports
pub use kind::Kind;
pub use loader::{FnProvider, Loader, MapProvider, Provider};
pub use prop_type::{to_label_value, PropKind, Resolved};
pub use resolver::{KindAccessor, Registry};
pub use resource::{Entry, Resource};
pub use validator::{FactoryArgs, Validator, ValidatorFactory, REGEXP_FACTORY};
