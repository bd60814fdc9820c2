//! Facade crate for Command Central features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`AppConfig`](domain::config::AppConfig) with [`kernel::config::load_config`].
//! - Call [`init_logging`] once, then [`init`] to build the feature slices. Keep both the
//!   returned [`Logger`](logger::Logger) and the slices for the lifetime of the process.

pub use ccentral_domain as domain;
use ccentral_domain::config::AppConfig;
use ccentral_domain::registry::InitializedSlice;
pub use ccentral_kernel as kernel;
pub use ccentral_logger as logger;
use ccentral_logger::{Logger, LoggerError};

/// Feature registry for runtime introspection.
pub mod features {
    pub use ccentral_iam as iam;

    /// Feature slices built by [`crate::init`].
    pub const ENABLED: &[&str] = &["iam"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Installs the global tracing subscriber from the `logging` config section.
///
/// # Errors
/// Any error of [`Logger::from_config`] or [`LoggerBuilder::init`](logger::LoggerBuilder::init),
/// including an already installed subscriber.
pub fn init_logging(config: &AppConfig) -> Result<Logger, LoggerError> {
    Logger::from_config(&config.logging)?.init()
}

/// Initialize all features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &AppConfig) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Identity & Access Management (IAM)
    slices.push(features::iam::init(&config.iam)?);

    Ok(slices)
}
