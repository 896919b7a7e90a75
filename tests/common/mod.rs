#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONTAINER: &str = "devdb-postgres";

/// How the fake `docker` script answers.
#[derive(Debug, Clone, Copy)]
pub struct Behavior {
    pub compose_plugin: bool,
    pub up_succeeds: bool,
    /// Whether a successful `compose up` makes the container show in `ps`.
    pub up_starts_container: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            compose_plugin: true,
            up_succeeds: true,
            up_starts_container: true,
        }
    }
}

/// A shell script standing in for the docker CLI.
///
/// Every invocation is appended to `calls.log`; `ps` prints the lines of
/// `running.txt`, which `compose up` appends the container name to.
pub struct FakeDocker {
    dir: TempDir,
    pub bin: PathBuf,
    log: PathBuf,
    running: PathBuf,
}

impl FakeDocker {
    pub fn new(behavior: Behavior) -> Self {
        let dir = tempfile::tempdir().expect("tempdir for fake docker");
        let bin = dir.path().join("docker");
        let log = dir.path().join("calls.log");
        let running = dir.path().join("running.txt");

        let version = if behavior.compose_plugin {
            "echo 2.29.1; exit 0"
        } else {
            "echo \"docker: 'compose' is not a docker command.\" >&2; exit 1"
        };
        let up = match (behavior.up_succeeds, behavior.up_starts_container) {
            (false, _) => "echo 'port is already allocated' >&2; exit 17".to_string(),
            (true, true) => format!("echo {CONTAINER} >> '{}'; exit 0", running.display()),
            (true, false) => "exit 0".to_string(),
        };
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
case "$1" in
  compose)
    if [ "$2" = "version" ]; then {version}; fi
    {up}
    ;;
  ps)
    if [ -f '{running}' ]; then cat '{running}'; fi
    exit 0
    ;;
esac
exit 1
"#,
            log = log.display(),
            running = running.display(),
        );
        fs::write(&bin, script).expect("write fake docker");
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).expect("chmod fake docker");

        Self {
            dir,
            bin,
            log,
            running,
        }
    }

    pub fn seed_running(&self, names: &[&str]) {
        let mut body = names.join("\n");
        body.push('\n');
        fs::write(&self.running, body).expect("seed running containers");
    }

    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn ran_up(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| c.starts_with("compose -f") && c.ends_with("up -d"))
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// A working directory holding a compose file.
pub fn project_dir(compose_name: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir for project");
    fs::write(
        dir.path().join(compose_name),
        "services:\n  db:\n    image: postgres:16\n    container_name: devdb-postgres\n",
    )
    .expect("write compose file");
    dir
}
