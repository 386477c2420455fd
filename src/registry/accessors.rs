//! Named accessors for the six built-in kinds.
//!
//! `add_template`, `load_template`, `list_templates` and friends are thin
//! wrappers over [`Registry::add`], [`Registry::load`] and
//! [`Registry::list`], generated uniformly for every built-in kind.

use crate::registry::kind::Kind;
use crate::registry::loader::Loader;
use crate::registry::resolver::Registry;
use crate::registry::resource::{Entry, Resource};
use std::sync::Arc;

macro_rules! kind_accessors {
    ($($kind:ident => $add:ident, $add_all:ident, $load:ident, $list:ident;)*) => {
        impl Registry {
            $(
                #[doc = concat!("Register one `", stringify!($kind), "` resource under `name`.")]
                pub fn $add(
                    &mut self,
                    name: impl Into<String>,
                    value: impl Into<Resource>,
                ) -> Arc<Loader> {
                    self.add(&Kind::$kind, name, value)
                }

                #[doc = concat!("Register several `", stringify!($kind), "` resources as one loader.")]
                pub fn $add_all<N, I>(&mut self, entries: I) -> Arc<Loader>
                where
                    N: Into<String>,
                    I: IntoIterator<Item = (N, Resource)>,
                {
                    self.add_all(&Kind::$kind, entries)
                }

                #[doc = concat!("First `", stringify!($kind), "` named `name` in chain order.")]
                pub fn $load(&self, name: &str) -> Option<Resource> {
                    self.load(&Kind::$kind, name)
                }

                #[doc = concat!("Every listed `", stringify!($kind), "` in chain order.")]
                pub fn $list(&self) -> Vec<Entry> {
                    self.list(&Kind::$kind)
                }
            )*
        }
    };
}

kind_accessors! {
    TEMPLATE => add_template, add_templates, load_template, list_templates;
    TYPE => add_type, add_types, load_type, list_types;
    SCHEMA => add_schema, add_schemas, load_schema, list_schemas;
    VALIDATOR => add_validator, add_validators, load_validator, list_validators;
    PROCESSOR => add_processor, add_processors, load_processor, list_processors;
    OPERATOR => add_operator, add_operators, load_operator, list_operators;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_builtin_kind_round_trips() {
        let mut registry = Registry::new();
        let value = json!({"marker": true});

        registry.add_template("Template", value.clone());
        registry.add_type("Type", value.clone());
        registry.add_schema("Schema", value.clone());
        registry.add_validator("Validator", value.clone());
        registry.add_processor("Processor", value.clone());
        registry.add_operator("Operator", value.clone());

        let expected = Some(Resource::from(value));
        assert_eq!(registry.load_template("Template"), expected);
        assert_eq!(registry.load_type("Type"), expected);
        assert_eq!(registry.load_schema("Schema"), expected);
        assert_eq!(registry.load_validator("Validator"), expected);
        assert_eq!(registry.load_processor("Processor"), expected);
        assert_eq!(registry.load_operator("Operator"), expected);

        assert_eq!(registry.list_templates()[0].name, "Template");
        assert_eq!(registry.list_types()[0].name, "Type");
        assert_eq!(registry.list_schemas()[0].name, "Schema");
        assert_eq!(registry.list_validators()[0].name, "Validator");
        assert_eq!(registry.list_processors()[0].name, "Processor");
        assert_eq!(registry.list_operators()[0].name, "Operator");
    }

    #[test]
    fn kinds_do_not_leak_into_each_other() {
        let mut registry = Registry::new();
        registry.add_template("shared", "template");

        assert_eq!(registry.load_type("shared"), None);
        assert!(registry.list_types().is_empty());
    }

    #[test]
    fn mapping_form_registers_one_loader() {
        let mut registry = Registry::new();
        let loader = registry.add_operators([
            ("eq", Resource::from("==")),
            ("ne", Resource::from("!=")),
        ]);

        assert_eq!(registry.loaders().len(), 1);
        assert!(Arc::ptr_eq(&registry.loaders()[0], &loader));
        let names: Vec<String> = registry.list_operators().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["eq", "ne"]);
    }

    #[test]
    fn added_loader_can_be_removed() {
        let mut registry = Registry::new();
        registry.add_processor("trim", "trim");
        let upper = registry.add_processor("upper", "upper");

        registry.remove_loader(&upper);
        assert_eq!(registry.load_processor("upper"), None);
        assert_eq!(registry.load_processor("trim"), Some(Resource::from("trim")));
    }
}
