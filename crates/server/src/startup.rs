use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StorageKind};
use migration::MigratorTrait;
use service::{geo, seller::BusinessRegistryClient, upload};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, migrate, wire collaborators and build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let radius = geo::radius_search_for(&db).await?;
    let uploader = upload::build_uploader(&cfg.storage)?;
    let registry = BusinessRegistryClient::from_config(&cfg.business_registry)?;
    let state = ServerState::new(db, cfg, uploader, radius, registry);

    let mut app = routes::build_router(state, build_cors());

    // Local uploads are served by this process when their public URLs are relative
    let base_url = cfg.storage.resolved_public_base_url();
    if cfg.storage.kind == StorageKind::Local && base_url.starts_with('/') {
        common::env::ensure_dir(&cfg.storage.local_root).await?;
        app = app.nest_service(&base_url, ServeDir::new(&cfg.storage.local_root));
        info!(root = %cfg.storage.local_root, mount = %base_url, "serving local uploads");
    }
    Ok(app)
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting yumyums server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
