use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() -> Option<configs::AppConfig> {
    // .env first so RUST_LOG and friends apply
    dotenv().ok();
    let cfg = configs::AppConfig::load_or_env().ok();
    let format = cfg.as_ref().map(|c| c.server.log_format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging(format);
    info!(service = "planner", event = "logger_init", "tracing subscriber initialized");
    cfg
}

/// `TOKIO_WORKER_THREADS` overrides `server.worker_threads`.
fn worker_threads(cfg: Option<&configs::AppConfig>) -> Option<usize> {
    std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .or_else(|| cfg.and_then(|c| c.server.worker_threads))
}

fn main() -> std::process::ExitCode {
    let cfg = init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "planner",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = worker_threads(cfg.as_ref());
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "planner", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "planner",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "planner server starting"
    );

    // server::run stops on Ctrl+C after in-flight requests drain
    rt.block_on(async move {
        match server::run().await {
            Ok(()) => {
                info!(service = "planner", event = "stop", %service_id, pid, "planner server stopped");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "planner", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
