//! rental-desk server: loads `.env`, connects to PostgreSQL, serves the API.

use rental_desk::{app, AppConfig, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rental_desk=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(pool, config);
    let app = app(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("rental-desk listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
