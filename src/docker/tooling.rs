use super::Docker;
use crate::config::Config;
use crate::error::ProvisionError;
use tracing::{debug, info};

/// Resolve the container CLI and make sure its compose plugin answers.
pub async fn check_dependencies(cfg: &Config) -> Result<Docker, ProvisionError> {
    let bin = which::which(&cfg.docker_bin).map_err(|e| {
        debug!(docker_bin = %cfg.docker_bin, error = %e, "container CLI lookup failed");
        ProvisionError::MissingDependency(cfg.docker_bin.clone())
    })?;
    let docker = Docker::new(bin);

    let version = docker
        .run(["compose", "version", "--short"], None)
        .await
        .map_err(|e| {
            debug!(error = %e, "compose plugin probe failed");
            ProvisionError::MissingDependency(format!("{} compose", cfg.docker_bin))
        })?;

    info!(
        docker = %docker.bin().display(),
        compose_version = %version.trim(),
        "container tooling found"
    );
    Ok(docker)
}
