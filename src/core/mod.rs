//! Host description and build configuration.

pub mod config;
pub mod environment;
pub mod host;

pub use config::BuildConfiguration;
pub use environment::EnvironmentDescriptor;
pub use host::HostProfile;
