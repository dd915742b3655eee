// HTTP-level tests for the fraud API
// Scoring runs on a frozen midday clock with the pattern rule disabled.

use actix_web::{http::StatusCode, test, web, App};
use fraud_api::handlers::{self, StartedAt};
use fraud_api::middleware::RequestMetrics;
use fraud_api::models::{ErrorResponse, HealthResponse};
use risk_engine::{FixedClock, FraudAnalyzer, MerchantDirectory, ScriptedRandom};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

fn deterministic_analyzer() -> Arc<FraudAnalyzer> {
    Arc::new(FraudAnalyzer::new(
        Arc::new(MerchantDirectory::builtin()),
        Arc::new(FixedClock::at_hour(12)),
        Arc::new(ScriptedRandom::new(false, 75)),
    ))
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(deterministic_analyzer()))
                .app_data(web::Data::new(StartedAt(Instant::now())))
                .app_data(handlers::json_config(16 * 1024))
                .wrap(RequestMetrics)
                .configure(handlers::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_analyze_suspicious_store() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/analyze-transaction")
        .set_json(json!({
            "amount": 1500,
            "velocity": 12,
            "ip_location": "US",
            "billing_location": "FR",
            "card_valid": true,
            "merchant_id": "MCC_5999_11111"
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["fraud_flags"],
        json!(["high_velocity", "unusual_amount", "location_mismatch"])
    );
    assert_eq!(body["risk_score"], 60);
    assert_eq!(body["decision"], "DECLINE");
    assert_eq!(body["merchant_info"]["name"], "Suspicious Store");
    assert_eq!(body["merchant_info"]["risk_level"], "High");
    assert_eq!(body["processing_time"], "75ms");
    assert_eq!(body["transaction_id"], "TXN_1705320000");
    assert_eq!(body["timestamp"], "2024-01-15T12:00:00.000000+00:00");
}

#[actix_web::test]
async fn test_empty_body_approves_with_unknown_merchant() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/analyze-transaction")
        .set_json(json!({}))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["fraud_flags"], json!([]));
    assert_eq!(body["risk_score"], 0);
    assert_eq!(body["decision"], "APPROVE");
    assert_eq!(body["merchant_info"]["name"], "Unknown Merchant");
    assert_eq!(body["merchant_info"]["mcc_code"], "0000");
}

#[actix_web::test]
async fn test_invalid_card_blocks_with_other_rules() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/analyze-transaction")
        .set_json(json!({
            "amount": 1001,
            "velocity": 11,
            "ip_location": "A",
            "billing_location": "B",
            "card_valid": false
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["risk_score"], 90);
    assert_eq!(body["decision"], "BLOCK");
}

#[actix_web::test]
async fn test_malformed_json_is_validation_error() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/analyze-transaction")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_wrong_field_type_is_validation_error() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/analyze-transaction")
        .set_json(json!({ "velocity": "many" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_negative_amount_is_validation_error() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/analyze-transaction")
        .set_json(json!({ "amount": -10 }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_out_of_range_numbers_are_validation_errors() {
    let app = test_app!();
    for body in [json!({ "amount": 1e30 }), json!({ "velocity": 5_000_000_000u64 })] {
        let req = test::TestRequest::post()
            .uri("/analyze-transaction")
            .set_json(body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.error, "VALIDATION_ERROR");
    }
}

#[actix_web::test]
async fn test_list_merchants() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/merchants").to_request();

    let body: Vec<String> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.len(), 4);
    assert!(body.contains(&"MCC_5411_12345".to_string()));
    assert!(body.contains(&"MCC_5999_11111".to_string()));
}

#[actix_web::test]
async fn test_health() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/health").to_request();

    let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.status, "healthy");
}

#[actix_web::test]
async fn test_index_page() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("/analyze-transaction"));
}

#[actix_web::test]
async fn test_metrics_after_analysis() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/analyze-transaction")
        .set_json(json!({ "card_valid": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("transactions_analyzed_total"));
    assert!(text.contains("invalid_card"));
    assert!(text.contains("http_requests_total"));
    assert!(text.contains(r#"path="/analyze-transaction""#));
}
