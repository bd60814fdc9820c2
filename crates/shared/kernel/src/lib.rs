//! Kernel utilities shared across slices.
//! Keep this crate lightweight: it re-exports the domain models and the layered config loader.
//!
//! ## Config loading (non-wasm)
//! ```rust,ignore
//! use ccentral_kernel::config::load_config;
//! use ccentral_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("config/ccentral")).unwrap_or_default();
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use ccentral_domain as domain;
