use anyhow::Context;
use geosoil_api::common::state::AppState;
use geosoil_api::config::Config;
use geosoil_api::routes;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber reads RUST_LOG
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    let state = AppState::new(config.clone()).context("Failed to build upstream HTTP client")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!(
        address = %listener.local_addr()?,
        deployment = %config.deployment,
        policy = %config.aggregation_policy,
        fan_out = %config.fan_out,
        prediction_workers = config.prediction_workers,
        prediction_timeout_secs = config.prediction_timeout_secs,
        "Listening"
    );

    let router = routes::build_router(&state);
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
