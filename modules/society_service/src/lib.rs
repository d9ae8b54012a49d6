//! Society Service Module
//!
//! Multi-tenant society management: admins provision societies with their
//! utility workers, properties and notices; tenants file maintenance requests,
//! read notices and settle payments.

// Public exports
pub mod contract;
pub use contract::{
    client::SocietyApi, error::SocietyError, AuthContext, MaintenanceRequest,
    MaintenanceRequestView, Notice, Profile, Role, Society, SocietyProvisioning, UNKNOWN_USER,
};

pub mod module;
pub use module::SocietyServiceModule;

pub mod config;
pub use config::{AuthConfig, Config};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
