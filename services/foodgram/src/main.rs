use axum::{ServiceExt, extract::Request};
use sea_orm::Database;
use tower::Layer as _;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::info;

use foodgram_api::config::FoodgramConfig;
use foodgram_api::infra::media::FsImageStore;
use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,sqlx=warn");

    let config = FoodgramConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;

    let state = AppState {
        db,
        images: FsImageStore::new(&config.media_root),
        public_url: config.public_url,
        page_size: config.page_size,
    };

    // Trailing slashes are trimmed before routing so `/api/recipes/` matches `/api/recipes`.
    let app = NormalizePathLayer::trim_trailing_slash().layer(build_router(state));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("foodgram listening on {addr}");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
