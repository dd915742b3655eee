use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use fraud_api::{
    config::Config,
    handlers::{self, StartedAt},
    metrics,
    middleware::{RateLimiter, RequestMetrics},
    FraudAnalyzer,
};
use risk_engine::MerchantDirectory;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Fraud API...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    let directory = match &config.merchants.directory_path {
        Some(path) => MerchantDirectory::from_file(path)
            .with_context(|| format!("Failed to load merchant directory from {}", path))?,
        None => {
            info!("Using bundled merchant directory");
            MerchantDirectory::builtin()
        }
    };
    info!("Merchant directory ready with {} merchants", directory.len());

    // Force registration before the first scrape
    lazy_static::initialize(&metrics::REGISTRY);

    let analyzer = Arc::new(FraudAnalyzer::with_system_sources(Arc::new(directory)));
    let rate_limiter = RateLimiter::new(config.rate_limit.requests_per_minute);
    let started_at = StartedAt(Instant::now());
    let server_config = config.server.clone();

    info!(
        "Starting HTTP server on {}:{} ({} req/min limit)",
        server_config.host, server_config.port, config.rate_limit.requests_per_minute
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(analyzer.clone()))
            .app_data(web::Data::new(started_at))
            .app_data(handlers::json_config(server_config.max_payload_bytes))
            .wrap(rate_limiter.clone())
            .wrap(RequestMetrics)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
            .configure(handlers::configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
