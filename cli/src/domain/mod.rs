//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod transport;

#[allow(unused_imports)]
pub use config::{ActivationConfig, RegistryConfig, ServiceConfig, VigilConfig};
#[allow(unused_imports)]
pub use error::{ApplyError, ConfigError};
#[allow(unused_imports)]
pub use transport::{
    DeploymentOutcome, DeploymentRequest, ExistingConnection, HostCapability, decide,
};
