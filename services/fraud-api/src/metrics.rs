use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use risk_engine::AnalysisResult;

use crate::errors::{ApiError, ApiResult};

lazy_static! {
    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        register_metrics(&registry).expect("metrics can be registered");
        registry
    };

    // HTTP metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"]
    ).expect("metric can be created");

    // Business metrics - fraud screening
    pub static ref TRANSACTIONS_ANALYZED: IntCounterVec = IntCounterVec::new(
        Opts::new("transactions_analyzed_total", "Total transactions analyzed"),
        &["decision"]
    ).expect("metric can be created");

    pub static ref FRAUD_FLAGS_RAISED: IntCounterVec = IntCounterVec::new(
        Opts::new("fraud_flags_raised_total", "Total fraud flags raised"),
        &["flag"]
    ).expect("metric can be created");

    pub static ref RISK_SCORE: Histogram = Histogram::with_opts(
        HistogramOpts::new("risk_score_distribution", "Distribution of risk scores")
            .buckets(vec![0.0, 25.0, 50.0, 75.0, 100.0])
    ).expect("metric can be created");

    pub static ref VALIDATION_FAILURES: IntCounter = IntCounter::new(
        "validation_failures_total",
        "Total requests rejected before scoring"
    ).expect("metric can be created");
}

/// Register all metrics with the given registry
pub fn register_metrics(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    registry.register(Box::new(TRANSACTIONS_ANALYZED.clone()))?;
    registry.register(Box::new(FRAUD_FLAGS_RAISED.clone()))?;
    registry.register(Box::new(RISK_SCORE.clone()))?;
    registry.register(Box::new(VALIDATION_FAILURES.clone()))?;

    Ok(())
}

/// `path` should be the matched route pattern so labels stay bounded
pub fn record_request(method: &str, path: &str, status: u16) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
}

pub fn observe_analysis(result: &AnalysisResult) {
    TRANSACTIONS_ANALYZED
        .with_label_values(&[result.decision.as_str()])
        .inc();
    for flag in &result.fraud_flags {
        FRAUD_FLAGS_RAISED.with_label_values(&[flag.as_str()]).inc();
    }
    RISK_SCORE.observe(f64::from(result.risk_score.score()));
}

/// Generate metrics output in Prometheus text format
pub fn render() -> ApiResult<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = vec![];
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ApiError::InternalError(format!("metrics encoding failed: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| ApiError::InternalError(format!("metrics are not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        let registry = Registry::new();
        let result = register_metrics(&registry);
        assert!(result.is_ok());
    }

    #[test]
    fn test_record_request() {
        record_request("GET", "/merchants", 200);
        let count = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/merchants", "200"])
            .get();
        assert!(count >= 1);
        assert!(render().unwrap().contains("http_requests_total"));
    }

    #[test]
    fn test_render() {
        VALIDATION_FAILURES.inc();
        let output = render().unwrap();
        assert!(output.contains("validation_failures_total"));
    }
}
