use risk_engine::TransactionInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ===== Analysis Request =====
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AnalyzeTransactionRequest {
    #[serde(default)]
    #[validate(custom = "validate_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub velocity: u32,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub ip_location: Option<String>,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub billing_location: Option<String>,
    #[serde(default = "default_card_valid")]
    pub card_valid: bool,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub merchant_id: String,
}

fn default_card_valid() -> bool {
    true
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

impl From<AnalyzeTransactionRequest> for TransactionInput {
    fn from(req: AnalyzeTransactionRequest) -> Self {
        TransactionInput {
            amount: req.amount,
            velocity: req.velocity,
            ip_location: req.ip_location,
            billing_location: req.billing_location,
            card_valid: req.card_valid,
            merchant_id: req.merchant_id,
        }
    }
}

// ===== Health Check =====
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

// ===== Error Response =====
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
