use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind before anything else: a second instance on the same port must
    // fail here with a diagnostic and a non-zero exit status.
    let listener = match server::bind_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    let root = cfg.root_dir()?;
    logger::log_server_start(&addr, &root);

    let state = Arc::new(config::AppState::new(cfg, root));
    let shutdown = Arc::new(tokio::sync::Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    // LocalSet hosts the per-connection spawn_local tasks
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_accept_loop(listener, state, shutdown))
        .await?;

    logger::log_server_stopped();
    Ok(())
}
