//! Command handlers — presentation layer wiring infra into services.

pub mod connections;
pub mod deploy;
pub mod probe;
pub mod version;

pub use deploy::DeployArgs;
