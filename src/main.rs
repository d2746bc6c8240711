use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use snip::config::Config;
use snip::storage::{MemoryStorage, Storage};
use snip::{api, redirect};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Process-lifetime in-memory registry
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    // Create routers
    let api_router = api::create_api_router(Arc::clone(&storage), config.public_base_url.clone());
    let redirect_router = redirect::create_redirect_router(Arc::clone(&storage));

    // Start API server
    let api_addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("🚀 API server listening on http://{}", api_addr);
    info!("   - API endpoints available at http://{}/api/...", api_addr);

    // Start redirect server
    let redirect_addr = format!(
        "{}:{}",
        config.redirect_server.host, config.redirect_server.port
    );
    let redirect_listener = tokio::net::TcpListener::bind(&redirect_addr).await?;
    info!("🚀 Redirect server listening on http://{}", redirect_addr);
    info!("   - Short links resolve at {}/...", config.public_base_url);

    // Run both servers concurrently
    tokio::try_join!(
        axum::serve(api_listener, api_router),
        axum::serve(
            redirect_listener,
            redirect_router.into_make_service_with_connect_info::<SocketAddr>(),
        ),
    )?;

    Ok(())
}
