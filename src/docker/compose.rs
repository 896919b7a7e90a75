use super::Docker;
use crate::config::Config;
use crate::error::ProvisionError;
use backon::{ExponentialBuilder, Retryable};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// File names `docker compose` itself looks for, in its lookup order.
pub const COMPOSE_FILE_NAMES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Find the orchestration file in `dir`.
pub fn locate_compose_file(dir: &Path, cfg: &Config) -> Result<PathBuf, ProvisionError> {
    let found = match cfg.compose_file.as_deref() {
        Some(name) => Some(dir.join(name)).filter(|p| p.is_file()),
        None => COMPOSE_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file()),
    };
    found.ok_or_else(|| ProvisionError::MissingComposeFile(dir.to_path_buf()))
}

impl Docker {
    /// Exact match of `container` against the names of running containers.
    pub async fn is_running(&self, container: &str) -> Result<bool, ProvisionError> {
        let filter = format!("name={container}");
        let names = self
            .run(["ps", "--filter", filter.as_str(), "--format", "{{.Names}}"], None)
            .await?;
        Ok(names.lines().any(|line| line.trim() == container))
    }

    /// `docker compose -f <file> up -d`, run from the file's directory.
    pub async fn up(&self, compose_file: &Path) -> Result<(), ProvisionError> {
        let project_dir = compose_file.parent();
        let args = [
            OsStr::new("compose"),
            OsStr::new("-f"),
            compose_file.as_os_str(),
            OsStr::new("up"),
            OsStr::new("-d"),
        ];
        self.run(args, project_dir).await?;
        Ok(())
    }

    /// Start the stack unless the container is already up.
    /// Returns whether it was already running.
    pub async fn ensure_running(
        &self,
        cfg: &Config,
        compose_file: &Path,
    ) -> Result<bool, ProvisionError> {
        if self.is_running(&cfg.container_name).await? {
            info!(container = %cfg.container_name, "container already running; skipping start");
            return Ok(true);
        }
        info!(
            container = %cfg.container_name,
            compose_file = %compose_file.display(),
            "starting container"
        );
        self.up(compose_file).await?;
        Ok(false)
    }

    /// Fixed sleep, then confirm the container shows up as running.
    pub async fn wait_ready(&self, cfg: &Config) -> Result<(), ProvisionError> {
        let wait = cfg.ready_wait();
        info!(seconds = wait.as_secs(), "waiting for the database to come up");
        tokio::time::sleep(wait).await;

        let container = cfg.container_name.as_str();
        let check = || async move {
            if self.is_running(container).await? {
                Ok(())
            } else {
                Err(ProvisionError::NotReady(container.to_string()))
            }
        };

        check
            .retry(readiness_policy(cfg.ready_retries))
            .sleep(tokio::time::sleep)
            .when(|e| matches!(e, ProvisionError::NotReady(_)))
            .notify(|e, delay| {
                warn!(error = %e, retry_in = ?delay, "container not up yet");
            })
            .await?;

        info!(container, "container is running");
        Ok(())
    }
}

fn readiness_policy(retries: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(retries)
}
