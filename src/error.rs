use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProvisionError {
    #[error("missing dependency: {0} is not installed or not on PATH")]
    MissingDependency(String),

    #[error("no compose file found in {}", .0.display())]
    MissingComposeFile(PathBuf),

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("container {0} is not running after the readiness wait")]
    NotReady(String),

    #[error("could not determine the home directory")]
    HomeDirUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("cannot build connection URL: {0}")]
    InvalidUrl(String),

    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("invalid client config {}: {reason}", .path.display())]
    InvalidClientConfig { path: PathBuf, reason: String },
}

impl ProvisionError {
    /// Whether the failure comes from the host environment rather than from
    /// the container run itself.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ProvisionError::MissingDependency(_)
                | ProvisionError::MissingComposeFile(_)
                | ProvisionError::HomeDirUnavailable
        )
    }
}
