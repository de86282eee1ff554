mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::router::build_router;
use crate::features::adventures::AdventureService;
use crate::features::studio::StudioService;
use crate::modules::gemini::{GeminiClient, GenerativeModel};
use crate::modules::storage::LocalObjectStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // One HTTP client shared by every pipeline
    let gemini_client: Arc<dyn GenerativeModel> = Arc::new(
        GeminiClient::new(&config.gemini)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Gemini client: {}", e))?,
    );
    tracing::info!(
        "Gemini client initialized (text model: {}, image model: {})",
        config.gemini.text_model,
        config.gemini.image_model
    );

    let store = Arc::new(LocalObjectStore::new(config.storage.uploads_dir.clone()));
    tokio::fs::create_dir_all(store.root()).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to create uploads directory {}: {}",
            store.root().display(),
            e
        )
    })?;
    tracing::info!("Local object store ready at {}", store.root().display());

    let studio_service = Arc::new(StudioService::new(
        Arc::clone(&gemini_client),
        &config.gemini.text_model,
        &config.gemini.image_model,
        Arc::clone(&store),
    ));
    tracing::info!("Studio service initialized");

    let adventure_service = Arc::new(AdventureService::new(
        Arc::clone(&gemini_client),
        config.gemini.text_model.clone(),
    ));
    tracing::info!("Adventure service initialized");

    let app = build_router(
        &config.app,
        &config.storage.static_dir,
        studio_service,
        adventure_service,
    );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("BananaVerse listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
