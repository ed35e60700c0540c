use std::net::{IpAddr, SocketAddr};

use axum::{http::HeaderValue, Router};
use dotenvy::dotenv;
use fynd_ai::AiClient;
use fynd_core::{urls, AppState, Config};
use sea_orm::Database;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // Refuses to start without the provider API key.
    let cfg = Config::from_env()?;

    let db = Database::connect(&cfg.database_url).await?;
    fynd_core::ensure_schema(&db).await?;

    let ai = AiClient::new(&cfg.gemini_api_key, &cfg.gemini_model);
    let state = AppState { db, ai };

    let app = Router::new()
        .nest("/api", urls::router())
        .layer(cors_layer(&cfg.cors_origins)?)
        .with_state(state);

    let ip: IpAddr = cfg.host.parse()?;
    let addr = SocketAddr::from((ip, cfg.port));
    info!("listening on http://{}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }
    let list = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(list))
        .allow_methods(Any)
        .allow_headers(Any))
}
