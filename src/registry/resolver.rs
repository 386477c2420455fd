//! The loader chain.
//!
//! Resolution order (first match wins): the most recently added loader is
//! asked first, the loader added first is asked last. Listings concatenate
//! every loader's own listing in that same order.

use crate::config::{PropTypes, RegistryConfig};
use crate::diagnostics::{warning, Diagnostics};
use crate::error::{RegistryError, Result};
use crate::registry::builtin;
use crate::registry::kind::Kind;
use crate::registry::loader::{Loader, MapProvider, Provider};
use crate::registry::resource::{Entry, Resource};
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;

/// Ordered chain of loaders with per-kind lookup and listing.
pub struct Registry {
    loaders: Vec<Arc<Loader>>,
    kinds: IndexSet<Kind>,
    prop_types: Option<PropTypes>,
    diagnostics: Diagnostics,
}

impl Registry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry from configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_loaders(config, Vec::new())
    }

    /// Create a registry with an initial chain.
    ///
    /// `loaders` keep their order: the first one is asked first. When the
    /// configuration enables built-in validators they sit behind all of them.
    pub fn with_loaders(config: RegistryConfig, loaders: impl IntoIterator<Item = Loader>) -> Self {
        let mut registry = Self {
            loaders: Vec::new(),
            kinds: Kind::BUILTIN.into_iter().collect(),
            prop_types: config.prop_types,
            diagnostics: Diagnostics::new(config.diagnostics),
        };

        if config.builtin_validators {
            registry.add_loader(builtin::validators());
        }

        let loaders: Vec<Loader> = loaders.into_iter().collect();
        for loader in loaders.into_iter().rev() {
            registry.add_loader(loader);
        }

        registry
    }

    /// Replace the diagnostics sink, e.g. with [`Diagnostics::capturing`].
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The property-type descriptor, if one was configured.
    pub fn prop_types(&self) -> Option<&PropTypes> {
        self.prop_types.as_ref()
    }

    /// The chain, highest priority first.
    pub fn loaders(&self) -> &[Arc<Loader>] {
        &self.loaders
    }

    /// Every kind this registry resolves, built-ins first.
    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.kinds.iter()
    }

    pub fn has_kind(&self, kind: &Kind) -> bool {
        self.kinds.contains(kind)
    }

    /// Register `kind` and return its accessors. Registering a known kind
    /// again returns the same accessors.
    pub fn register_kind(&mut self, kind: impl Into<Kind>) -> Result<KindAccessor> {
        let kind = kind.into();
        if !kind.is_well_formed() {
            return Err(RegistryError::InvalidKind {
                name: kind.name().to_string(),
            });
        }
        if self.kinds.insert(kind.clone()) {
            tracing::debug!("Registered resource kind {}", kind);
        }
        Ok(KindAccessor { kind })
    }

    /// Accessors for a kind this registry already knows.
    pub fn accessor(&self, kind: &Kind) -> Option<KindAccessor> {
        self.has_kind(kind).then(|| KindAccessor { kind: kind.clone() })
    }

    /// Put `loader` at the front of the chain.
    ///
    /// Kinds the loader brings that the registry does not know yet are
    /// registered on the fly. Kinds with malformed names are skipped with a
    /// diagnostic; the loader is added either way.
    pub fn add_loader(&mut self, loader: impl Into<Arc<Loader>>) -> Arc<Loader> {
        let loader = loader.into();

        for kind in loader.kinds() {
            if self.kinds.contains(kind) {
                continue;
            }
            if kind.is_well_formed() {
                tracing::debug!(
                    "Loader '{}' extends the registry with kind {}",
                    loader.label(),
                    kind
                );
                self.kinds.insert(kind.clone());
            } else {
                warning!(
                    self.diagnostics,
                    false,
                    "Loader capability '%s' is not understood and was skipped",
                    kind
                );
            }
        }

        self.loaders.insert(0, Arc::clone(&loader));
        tracing::debug!(
            "Added loader '{}' ({} in chain)",
            loader.label(),
            self.loaders.len()
        );
        loader
    }

    /// Add each loader in order; the last one ends up first in the chain.
    pub fn add_loaders<L, I>(&mut self, loaders: I) -> Vec<Arc<Loader>>
    where
        L: Into<Arc<Loader>>,
        I: IntoIterator<Item = L>,
    {
        loaders
            .into_iter()
            .map(|loader| self.add_loader(loader))
            .collect()
    }

    /// Remove `loader` from the chain and run its teardown hook.
    ///
    /// Returns `None` when the loader is not in the chain.
    pub fn remove_loader(&mut self, loader: &Arc<Loader>) -> Option<Arc<Loader>> {
        let idx = self.loaders.iter().position(|l| Arc::ptr_eq(l, loader))?;
        let removed = self.loaders.remove(idx);
        tracing::debug!("Removed loader '{}'", removed.label());
        removed.run_teardown();
        Some(removed)
    }

    /// Empty the chain, returning what it held.
    pub fn clear_loaders(&mut self) -> Vec<Arc<Loader>> {
        let previous = std::mem::take(&mut self.loaders);
        tracing::debug!("Cleared {} loaders", previous.len());
        previous
    }

    /// Register a single named resource of `kind`.
    pub fn add(
        &mut self,
        kind: &Kind,
        name: impl Into<String>,
        value: impl Into<Resource>,
    ) -> Arc<Loader> {
        let mut provider = MapProvider::new();
        provider.insert(name, value);
        self.add_map(kind, provider)
    }

    /// Register every `(name, resource)` pair as one loader.
    pub fn add_all<N, I>(&mut self, kind: &Kind, entries: I) -> Arc<Loader>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Resource)>,
    {
        self.add_map(kind, entries.into_iter().collect())
    }

    fn add_map(&mut self, kind: &Kind, provider: MapProvider) -> Arc<Loader> {
        let label = format!("{} map ({} entries)", kind, provider.len());
        self.add_loader(Loader::new(label).with_provider(kind.clone(), provider))
    }

    /// First non-null answer for `name` in chain order.
    pub fn load(&self, kind: &Kind, name: &str) -> Option<Resource> {
        if !self.has_kind(kind) {
            return None;
        }
        self.loaders.iter().find_map(|loader| {
            loader
                .provider(kind)
                .and_then(|provider| provider.load(self, name))
                .filter(|resource| !resource.is_null())
        })
    }

    /// Every loader's listing for `kind`, in chain order.
    pub fn list(&self, kind: &Kind) -> Vec<Entry> {
        if !self.has_kind(kind) {
            return Vec::new();
        }
        self.loaders
            .iter()
            .filter_map(|loader| loader.provider(kind).and_then(|provider| provider.list()))
            .flatten()
            .map(|(name, resource)| Entry::new(name, kind.clone(), resource))
            .collect()
    }

    /// Wrap this registry as a loader for another registry.
    ///
    /// The loader answers every kind this registry knows by delegating to
    /// it. Removing the loader from the outer registry runs its teardown.
    pub fn into_loader(self, label: impl Into<String>) -> Loader {
        let kinds: Vec<Kind> = self.kinds.iter().cloned().collect();
        let inner = Arc::new(self);
        let label = label.into();

        let mut loader = Loader::new(label.clone());
        for kind in kinds {
            loader = loader.with_provider(
                kind.clone(),
                NestedProvider {
                    inner: Arc::clone(&inner),
                    kind,
                },
            );
        }

        let torn_down = Arc::clone(&inner);
        loader.with_teardown(move || {
            tracing::debug!(
                "Detached nested registry '{}' ({} loaders)",
                label,
                torn_down.loaders.len()
            );
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("loaders", &self.loaders)
            .field("kinds", &self.kinds)
            .field("prop_types", &self.prop_types)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

/// Delegates one kind to a registry used as a loader.
struct NestedProvider {
    inner: Arc<Registry>,
    kind: Kind,
}

impl Provider for NestedProvider {
    fn load(&self, _registry: &Registry, name: &str) -> Option<Resource> {
        self.inner.load(&self.kind, name)
    }

    fn list(&self) -> Option<Vec<(String, Resource)>> {
        Some(
            self.inner
                .list(&self.kind)
                .into_iter()
                .map(|entry| (entry.name, entry.resource))
                .collect(),
        )
    }
}

/// The add/load/list operations for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindAccessor {
    kind: Kind,
}

impl KindAccessor {
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn add(
        &self,
        registry: &mut Registry,
        name: impl Into<String>,
        value: impl Into<Resource>,
    ) -> Arc<Loader> {
        registry.add(&self.kind, name, value)
    }

    pub fn add_all<N, I>(&self, registry: &mut Registry, entries: I) -> Arc<Loader>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Resource)>,
    {
        registry.add_all(&self.kind, entries)
    }

    pub fn load(&self, registry: &Registry, name: &str) -> Option<Resource> {
        registry.load(&self.kind, name)
    }

    pub fn list(&self, registry: &Registry) -> Vec<Entry> {
        registry.list(&self.kind)
    }
}
