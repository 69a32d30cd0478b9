use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use foodgram_core::tracing::init_tracing;

use foodgram_recipes::config::RecipesConfig;
use foodgram_recipes::infra::media::LocalMediaStorage;
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,foodgram_recipes=debug,tower_http=debug");

    let config = RecipesConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    tokio::fs::create_dir_all(&config.media_root)
        .await
        .with_context(|| format!("failed to create media root {}", config.media_root))?;

    let state = AppState {
        db,
        media: LocalMediaStorage::new(&config.media_root),
        media_url: config.media_url,
        public_url: config.public_url,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("recipes service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
