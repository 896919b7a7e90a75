//! Thin wrapper over the `docker` CLI.
//!
//! Layout:
//! - `tooling.rs`: locating the binary and the compose plugin
//! - `compose.rs`: compose file discovery, start-up and readiness

pub mod compose;
pub mod tooling;

use crate::error::ProvisionError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

pub use compose::locate_compose_file;
pub use tooling::check_dependencies;

/// A resolved container CLI.
#[derive(Debug, Clone)]
pub struct Docker {
    bin: PathBuf,
}

impl Docker {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Run the CLI to completion and return its stdout.
    ///
    /// A non-zero exit becomes `CommandFailed` carrying the trimmed stderr.
    pub async fn run<I, S>(&self, args: I, cwd: Option<&Path>) -> Result<String, ProvisionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|a| a.as_ref().to_os_string())
            .collect();
        let command = self.describe(&args);

        let mut cmd = Command::new(&self.bin);
        cmd.args(&args).kill_on_drop(true);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        debug!(command = %command, "running");
        let output = cmd.output().await?;
        if !output.status.success() {
            return Err(ProvisionError::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut line = self.bin.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}
