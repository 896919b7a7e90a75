use crate::config::Config;
use crate::credentials::{self, ClientConfig};
use crate::docker::{self, Docker};
use crate::error::ProvisionError;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use url::Url;

/// Outcome of a successful run, consumed by [`crate::guidance::render`].
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub docker: PathBuf,
    pub container: String,
    pub compose_file: PathBuf,
    pub config_path: PathBuf,
    pub client: ClientConfig,
    /// `None` when the settings do not form a valid URL; the file is still written.
    pub connection_url: Option<Url>,
    pub already_running: bool,
}

/// Check tooling, bring the container up, wait, and write the client config.
///
/// `home` is the directory the client config goes under; `None` fails with
/// `HomeDirUnavailable` before anything is started.
pub async fn run(
    cfg: &Config,
    work_dir: &Path,
    home: Option<&Path>,
) -> Result<ProvisionReport, ProvisionError> {
    let docker: Docker = docker::check_dependencies(cfg).await?;
    let compose_file = docker::locate_compose_file(work_dir, cfg)?;
    let home = home.ok_or(ProvisionError::HomeDirUnavailable)?;
    info!(compose_file = %compose_file.display(), "using compose file");

    let already_running = docker.ensure_running(cfg, &compose_file).await?;
    if !already_running {
        docker.wait_ready(cfg).await?;
    }

    let client = ClientConfig::from(cfg);
    let config_path = credentials::config_path(home);
    credentials::write_client_config(&config_path, &client, Utc::now())?;

    let connection_url = client
        .connection_url()
        .inspect_err(|e| warn!(error = %e, "cannot derive a connection URL"))
        .ok();

    Ok(ProvisionReport {
        docker: docker.bin().to_path_buf(),
        container: cfg.container_name.clone(),
        compose_file,
        config_path,
        client,
        connection_url,
        already_running,
    })
}
