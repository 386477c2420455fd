//! Loaders and the providers they are made of.
//!
//! A [`Loader`] is a capability set: for each [`Kind`] it supports it holds a
//! [`Provider`] that can look resources up by name and, optionally, list
//! them. Loaders are shared as `Arc<Loader>` so the registry can remove a
//! specific one later by identity.

use crate::registry::kind::Kind;
use crate::registry::resolver::Registry;
use crate::registry::resource::Resource;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Lookup and listing for one resource kind.
///
/// Both operations are optional. A provider that does not list returns
/// `None` from [`Provider::list`] and is skipped when the registry
/// concatenates listings.
pub trait Provider: Send + Sync {
    /// Look up `name`. The registry passes itself so providers can resolve
    /// other resources while answering.
    fn load(&self, registry: &Registry, name: &str) -> Option<Resource> {
        let _ = (registry, name);
        None
    }

    /// Every resource this provider holds, in its own order.
    fn list(&self) -> Option<Vec<(String, Resource)>> {
        None
    }
}

/// Provider backed by an insertion-ordered map.
///
/// This is what `add_<kind>` wraps its arguments in. Names are unique; a
/// repeated name replaces the earlier value in place.
#[derive(Debug, Clone, Default)]
pub struct MapProvider {
    entries: IndexMap<String, Resource>,
}

impl MapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, resource: impl Into<Resource>) {
        self.entries.insert(name.into(), resource.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Resource)> for MapProvider {
    fn from_iter<I: IntoIterator<Item = (N, Resource)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(n, r)| (n.into(), r)).collect(),
        }
    }
}

impl Provider for MapProvider {
    fn load(&self, _registry: &Registry, name: &str) -> Option<Resource> {
        self.entries.get(name).cloned()
    }

    fn list(&self) -> Option<Vec<(String, Resource)>> {
        Some(
            self.entries
                .iter()
                .map(|(name, resource)| (name.clone(), resource.clone()))
                .collect(),
        )
    }
}

type LoadFn = dyn Fn(&Registry, &str) -> Option<Resource> + Send + Sync;

/// Provider that answers lookups with a closure and does not list.
pub struct FnProvider {
    load: Box<LoadFn>,
}

impl FnProvider {
    pub fn new<F>(load: F) -> Self
    where
        F: Fn(&Registry, &str) -> Option<Resource> + Send + Sync + 'static,
    {
        Self {
            load: Box::new(load),
        }
    }
}

impl Provider for FnProvider {
    fn load(&self, registry: &Registry, name: &str) -> Option<Resource> {
        (self.load)(registry, name)
    }
}

impl fmt::Debug for FnProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnProvider")
    }
}

type TeardownFn = dyn Fn() + Send + Sync;

/// A named set of providers, one per kind.
pub struct Loader {
    label: String,
    providers: IndexMap<Kind, Arc<dyn Provider>>,
    teardown: Option<Box<TeardownFn>>,
}

impl Loader {
    /// Create an empty loader. The label only shows up in logs and `Debug`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            providers: IndexMap::new(),
            teardown: None,
        }
    }

    /// Add (or replace) the provider for `kind`.
    pub fn with_provider(mut self, kind: impl Into<Kind>, provider: impl Provider + 'static) -> Self {
        self.providers.insert(kind.into(), Arc::new(provider));
        self
    }

    /// Answer lookups for `kind` with a closure.
    pub fn with_load_fn<F>(self, kind: impl Into<Kind>, load: F) -> Self
    where
        F: Fn(&Registry, &str) -> Option<Resource> + Send + Sync + 'static,
    {
        self.with_provider(kind, FnProvider::new(load))
    }

    /// Serve `entries` for `kind` from a map.
    pub fn with_entries<N, I>(self, kind: impl Into<Kind>, entries: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Resource)>,
    {
        self.with_provider(kind, entries.into_iter().collect::<MapProvider>())
    }

    /// Run `hook` when this loader is removed from a registry.
    pub fn with_teardown<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.teardown = Some(Box::new(hook));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Kinds this loader provides, in the order they were added.
    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.providers.keys()
    }

    pub fn provider(&self, kind: &Kind) -> Option<&dyn Provider> {
        self.providers.get(kind).map(|p| p.as_ref())
    }

    pub fn provides(&self, kind: &Kind) -> bool {
        self.providers.contains_key(kind)
    }

    pub fn has_teardown(&self) -> bool {
        self.teardown.is_some()
    }

    pub(crate) fn run_teardown(&self) {
        if let Some(hook) = &self.teardown {
            hook();
        }
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("label", &self.label)
            .field("kinds", &self.providers.keys().collect::<Vec<_>>())
            .field("teardown", &self.teardown.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn map_provider_loads_and_lists_in_insertion_order() {
        let registry = Registry::new();
        let mut provider = MapProvider::new();
        provider.insert("b", json!(2));
        provider.insert("a", json!(1));

        assert_eq!(provider.load(&registry, "a"), Some(Resource::from(json!(1))));
        assert_eq!(provider.load(&registry, "missing"), None);

        let names: Vec<String> = provider.list().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn map_provider_replaces_duplicate_names_in_place() {
        let mut provider = MapProvider::new();
        provider.insert("a", json!(1));
        provider.insert("b", json!(2));
        provider.insert("a", json!(3));

        assert_eq!(provider.len(), 2);
        let listed = provider.list().unwrap();
        assert_eq!(listed[0], ("a".to_string(), Resource::from(json!(3))));
    }

    #[test]
    fn fn_provider_does_not_list() {
        let provider = FnProvider::new(|_, name| Some(Resource::from(name.to_uppercase())));
        let registry = Registry::new();
        assert_eq!(provider.load(&registry, "x"), Some(Resource::from("X")));
        assert!(provider.list().is_none());
    }

    #[test]
    fn loader_reports_its_kinds() {
        let loader = Loader::new("forms")
            .with_entries(Kind::TEMPLATE, [("base", Resource::from("<div/>"))])
            .with_load_fn(Kind::TYPE, |_, _| None);

        let kinds: Vec<&Kind> = loader.kinds().collect();
        assert_eq!(kinds, vec![&Kind::TEMPLATE, &Kind::TYPE]);
        assert!(loader.provides(&Kind::TYPE));
        assert!(!loader.provides(&Kind::SCHEMA));
        assert!(loader.provider(&Kind::SCHEMA).is_none());
    }

    #[test]
    fn empty_loader_provides_nothing() {
        let loader = Loader::new("empty");
        assert_eq!(loader.kinds().count(), 0);
        assert!(!loader.has_teardown());
    }

    #[test]
    fn teardown_runs_hook() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let loader = Loader::new("hooked").with_teardown(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        loader.run_teardown();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_shows_label_and_kinds() {
        let loader = Loader::new("forms").with_load_fn(Kind::SCHEMA, |_, _| None);
        let debug = format!("{loader:?}");
        assert!(debug.contains("forms"));
        assert!(debug.contains("Schema"));
    }
}
