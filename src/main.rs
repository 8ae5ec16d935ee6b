use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use shardgate::{api, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "shardgate=info,tower_http=info".to_string()),
        )
        .init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .context("required environment variable DATABASE_URL is not set")?;

    info!("connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to open database connection pool")?;

    let storage = Storage::new(pool);

    // Fail startup rather than serving requests against a dead backend.
    storage.ping().await.context("database ping failed")?;

    let app = api::build_router(storage);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = format!("0.0.0.0:{port}");
    info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
