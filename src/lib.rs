pub mod config;
pub mod credentials;
pub mod docker;
pub mod error;
pub mod guidance;
pub mod provision;

pub use config::Config;
pub use credentials::ClientConfig;
pub use error::ProvisionError;
pub use provision::ProvisionReport;
