use static_server::config::{self, AppState};
use static_server::{logger, server};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    if !std::path::Path::new(&cfg.site.root).is_dir() {
        logger::log_warning(&format!(
            "Site root '{}' is not a directory, every request will get 404",
            cfg.site.root
        ));
    }

    let state = Arc::new(AppState::new(&cfg));
    logger::log_server_start(&addr, &cfg);

    server::start_server_loop(listener, state, server::shutdown_signal()).await?;
    logger::log_info("Server stopped");
    Ok(())
}
