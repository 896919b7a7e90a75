use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match devdb::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // The log filter comes from the config, so tracing is not up yet.
            eprintln!("devdb: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        docker_bin = %cfg.docker_bin,
        container = %cfg.container_name,
        compose_file = %cfg.compose_file.as_deref().unwrap_or("<auto>"),
        ready_wait_secs = cfg.ready_wait_secs,
        loglevel = %cfg.loglevel
    );

    let work_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!(error = %e, "cannot read the working directory");
            eprintln!("devdb: {e}");
            return ExitCode::FAILURE;
        }
    };
    let home = dirs::home_dir();

    match devdb::provision::run(&cfg, &work_dir, home.as_deref()).await {
        Ok(report) => {
            print!("{}", devdb::guidance::render(&report));
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.is_precondition() {
                error!(error = %e, "environment is not ready for provisioning");
            } else {
                error!(error = %e, "provisioning failed");
            }
            eprintln!("devdb: {e}");
            ExitCode::FAILURE
        }
    }
}
