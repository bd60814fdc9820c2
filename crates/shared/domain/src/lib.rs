//! # Domain Models
//!
//! Pure data for the permission-group dataset: access scopes, the known module registry,
//! raw and validated group records, and configuration sections.
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod access;
pub mod config;
pub mod constants;
pub mod modules;
pub mod permission;
pub mod registry;
