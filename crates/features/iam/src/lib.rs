//! # IAM Feature Slice
//!
//! Loads, validates and serves the permission groups that decide what members may see
//! and whose membership they may change.
//!
//! ```rust,no_run
//! use ccentral_iam::PermissionGroupRegistry;
//! use ccentral_kernel::domain::access::AccessScope;
//!
//! let registry = PermissionGroupRegistry::from_json(include_str!("../tests/fixtures/permission_groups.json"))?;
//! let admin = registry.lookup("Admin")?;
//! assert_eq!(PermissionGroupRegistry::resolve_access_scope(admin, "Main"), AccessScope::Command);
//! assert!(registry.can_edit("Developers", "Admin")?);
//! # Ok::<(), ccentral_iam::IamError>(())
//! ```

mod error;
mod handle;
mod loader;
mod registry;
mod resolved;
pub mod source;

pub use crate::error::{IamError, IamErrorExt};
pub use crate::handle::RegistryHandle;
pub use crate::loader::RegistryLoader;
pub use crate::registry::{LoadWarning, PermissionGroupRegistry};
pub use crate::resolved::ResolvedPermissions;
pub use ccentral_kernel::domain::access::AccessScope;
pub use ccentral_kernel::domain::permission::{PermissionGroup, PermissionGroupRecord};

use ccentral_kernel::domain::config::IamConfig;
use ccentral_kernel::domain::registry::InitializedSlice;

/// IAM slice state shared with the rest of the application.
#[ccentral_derive::ccentral_slice]
pub struct Iam {
    registry: RegistryHandle,
}

impl Iam {
    #[must_use]
    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }
}

/// Loads the configured definitions document and builds the IAM slice.
///
/// # Errors
/// Any error of [`RegistryHandle::reload_from_path`]; nothing is published on failure.
pub fn init(config: &IamConfig) -> Result<InitializedSlice, IamError> {
    let loader = RegistryLoader::new().extra_modules(config.extra_modules.iter().cloned());
    let registry = loader.load_path(&config.definitions)?;
    let groups = registry.len();

    let slice = Iam::new(IamInner { registry: RegistryHandle::with_registry(loader, registry) });

    tracing::info!(groups, definitions = %config.definitions.display(), "IAM feature initialized");

    Ok(InitializedSlice::new(slice))
}
