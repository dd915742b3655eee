use crate::errors::{ApiError, ApiResult};
use crate::metrics;
use crate::models::*;
use actix_web::{web, HttpRequest, HttpResponse};
use risk_engine::{FraudAnalyzer, TransactionInput};
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Process start, for health reporting
#[derive(Debug, Clone, Copy)]
pub struct StartedAt(pub Instant);

// ===== Landing Page =====
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

// ===== Health Check =====
pub async fn health_check(started_at: web::Data<StartedAt>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: started_at.0.elapsed().as_secs(),
    })
}

// ===== Analyze Transaction =====
pub async fn analyze_transaction(
    req: web::Json<AnalyzeTransactionRequest>,
    analyzer: web::Data<Arc<FraudAnalyzer>>,
) -> ApiResult<HttpResponse> {
    let request = req.into_inner();
    if let Err(e) = request.validate() {
        metrics::VALIDATION_FAILURES.inc();
        return Err(e.into());
    }

    let input = TransactionInput::from(request);
    let result = analyzer.analyze(&input);
    metrics::observe_analysis(&result);

    Ok(HttpResponse::Ok().json(result))
}

// ===== List Merchants =====
pub async fn list_merchants(analyzer: web::Data<Arc<FraudAnalyzer>>) -> HttpResponse {
    HttpResponse::Ok().json(analyzer.directory().merchant_ids())
}

// ===== Prometheus Metrics =====
pub async fn metrics_endpoint() -> ApiResult<HttpResponse> {
    let body = metrics::render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}

/// JSON extractor settings; malformed bodies become validation errors
pub fn json_config(max_payload_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_bytes)
        .error_handler(|err, _req: &HttpRequest| {
            metrics::VALIDATION_FAILURES.inc();
            tracing::debug!("Rejected request body: {}", err);
            ApiError::ValidationError(err.to_string()).into()
        })
}

// ===== Configure Routes =====
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/analyze-transaction", web::post().to(analyze_transaction))
        .route("/merchants", web::get().to(list_merchants))
        .route("/metrics", web::get().to(metrics_endpoint))
        .route("/health", web::get().to(health_check));
}
