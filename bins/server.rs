use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    // .env first so RUST_LOG, DATABASE_URL and JWT_SECRET are visible to everything below
    dotenv().ok();

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "server", event = "config_invalid", error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.server.log_format);

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "server", event = "panic", %instance_id, pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %instance_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "server starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(server::run(cfg));
        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(service = "server", event = "stop", %instance_id, "server stopped");
                    ExitCode::SUCCESS
                }
                Ok(Err(e)) => {
                    error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
                    ExitCode::FAILURE
                }
                Err(e) => {
                    error!(service = "server", event = "task_join_error", error = %e, "server task join error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "server", event = "shutdown_signal", %instance_id, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
