//! # Registry Publication
//!
//! A [`RegistryHandle`] owns the currently published [`PermissionGroupRegistry`].
//! Readers take an `Arc` snapshot and keep using it for as long as they like; a reload
//! validates a complete new registry first and only then swaps the pointer. A failed
//! reload leaves the published registry untouched.

use crate::error::IamError;
use crate::loader::RegistryLoader;
use crate::registry::PermissionGroupRegistry;
use parking_lot::RwLock;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct Published {
    registry: Option<Arc<PermissionGroupRegistry>>,
    generation: u64,
}

#[derive(Debug, Default)]
struct HandleState {
    loader: RegistryLoader,
    published: RwLock<Published>,
}

/// Shared, cloneable access point to the published registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryHandle {
    inner: Arc<HandleState>,
}

impl RegistryHandle {
    /// Empty handle; [`RegistryHandle::snapshot`] fails with [`IamError::NotLoaded`] until a
    /// registry is published.
    #[must_use]
    pub fn new(loader: RegistryLoader) -> Self {
        Self { inner: Arc::new(HandleState { loader, published: RwLock::default() }) }
    }

    /// Handle with `registry` already published.
    #[must_use]
    pub fn with_registry(loader: RegistryLoader, registry: PermissionGroupRegistry) -> Self {
        let handle = Self::new(loader);
        handle.publish(registry);
        handle
    }

    /// The registry currently published.
    ///
    /// # Errors
    /// Returns [`IamError::NotLoaded`] if nothing has been published yet.
    pub fn snapshot(&self) -> Result<Arc<PermissionGroupRegistry>, IamError> {
        self.inner.published.read().registry.clone().ok_or(IamError::NotLoaded { context: None })
    }

    /// Number of registries published so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.published.read().generation
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.published.read().registry.is_some()
    }

    /// Replaces the published registry and returns the new generation.
    pub fn publish(&self, registry: PermissionGroupRegistry) -> u64 {
        let registry = Arc::new(registry);
        let groups = registry.len();

        let generation = {
            let mut published = self.inner.published.write();
            published.registry = Some(registry);
            published.generation += 1;
            published.generation
        };

        info!(generation, groups, "Permission group registry published");
        generation
    }

    /// Validates `raw` and publishes it.
    ///
    /// # Errors
    /// Any load error; the previous registry stays published.
    pub fn reload<I>(&self, raw: I) -> Result<u64, IamError>
    where
        I: IntoIterator<Item = Value>,
    {
        let registry = self.inner.loader.load(raw).inspect_err(|e| {
            warn!(error = %e, "Permission group reload rejected");
        })?;
        Ok(self.publish(registry))
    }

    /// Parses, validates and publishes a definitions document.
    ///
    /// # Errors
    /// Any parse or load error; the previous registry stays published.
    pub fn reload_from_json(&self, json: &str) -> Result<u64, IamError> {
        let registry = self.inner.loader.load_json(json).inspect_err(|e| {
            warn!(error = %e, "Permission group reload rejected");
        })?;
        Ok(self.publish(registry))
    }

    /// Reads, validates and publishes the definitions document at `path`.
    ///
    /// # Errors
    /// Any IO, parse or load error; the previous registry stays published.
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<u64, IamError> {
        let registry = self.inner.loader.load_path(path).inspect_err(|e| {
            warn!(error = %e, "Permission group reload rejected");
        })?;
        Ok(self.publish(registry))
    }

    #[must_use]
    pub fn loader(&self) -> &RegistryLoader {
        &self.inner.loader
    }
}
