//! Core types for risk engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk score (0-100)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Highest score a transaction can reach
    pub const MAX: RiskScore = RiskScore(100);

    /// Create new risk score, clamped to 0-100
    pub fn new(score: u8) -> Self {
        Self(score.min(100))
    }

    /// Get raw score
    pub fn score(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Merchant risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

/// Fraud indicator raised by a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudFlag {
    /// More than ten transactions in the trailing window
    HighVelocity,
    /// Amount above the review threshold
    UnusualAmount,
    /// IP geolocation differs from the billing address
    LocationMismatch,
    /// Card failed validation
    InvalidCard,
    /// Submitted during night hours
    UnusualTiming,
    /// Sampled pattern hit
    SuspiciousPattern,
}

impl FraudFlag {
    /// Every flag in evaluation order
    pub const ALL: [FraudFlag; 6] = [
        FraudFlag::HighVelocity,
        FraudFlag::UnusualAmount,
        FraudFlag::LocationMismatch,
        FraudFlag::InvalidCard,
        FraudFlag::UnusualTiming,
        FraudFlag::SuspiciousPattern,
    ];

    /// Score contribution when the flag is raised
    pub fn weight(&self) -> u8 {
        match self {
            FraudFlag::HighVelocity => 20,
            FraudFlag::UnusualAmount => 15,
            FraudFlag::LocationMismatch => 25,
            FraudFlag::InvalidCard => 30,
            FraudFlag::UnusualTiming => 10,
            FraudFlag::SuspiciousPattern => 15,
        }
    }

    /// Wire name of the flag
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudFlag::HighVelocity => "high_velocity",
            FraudFlag::UnusualAmount => "unusual_amount",
            FraudFlag::LocationMismatch => "location_mismatch",
            FraudFlag::InvalidCard => "invalid_card",
            FraudFlag::UnusualTiming => "unusual_timing",
            FraudFlag::SuspiciousPattern => "suspicious_pattern",
        }
    }
}

impl fmt::Display for FraudFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action taken on a scored transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    /// Let the transaction through
    Approve,
    /// Hold for manual review
    Review,
    /// Reject the transaction
    Decline,
    /// Reject and block the instrument
    Block,
}

impl Decision {
    /// Wire name of the decision
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::Review => "REVIEW",
            Decision::Decline => "DECLINE",
            Decision::Block => "BLOCK",
        }
    }
}

impl From<RiskScore> for Decision {
    fn from(score: RiskScore) -> Self {
        crate::decision::decide(score)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction attributes submitted for screening
///
/// Absent fields resolve to their defaults before any rule runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionInput {
    /// Transaction amount, non-negative
    pub amount: Decimal,

    /// Transactions seen for the payer in the trailing window
    pub velocity: u32,

    /// Location derived from the client IP
    pub ip_location: Option<String>,

    /// Location on the billing address
    pub billing_location: Option<String>,

    /// Card passed issuer validation
    pub card_valid: bool,

    /// Merchant directory key
    pub merchant_id: String,
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self {
            amount: Decimal::ZERO,
            velocity: 0,
            ip_location: None,
            billing_location: None,
            card_valid: true,
            merchant_id: String::new(),
        }
    }
}

/// Merchant metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantRecord {
    /// Trading name
    pub name: String,

    /// Business category
    pub category: String,

    /// Registered location
    pub location: String,

    /// Merchant risk level
    pub risk_level: RiskLevel,

    /// 4-digit merchant category code
    pub mcc_code: String,
}

impl MerchantRecord {
    /// Record returned for identifiers missing from the directory
    pub fn unknown() -> Self {
        Self {
            name: "Unknown Merchant".to_string(),
            category: "Unknown Category".to_string(),
            location: "Unknown Location".to_string(),
            risk_level: RiskLevel::Medium,
            mcc_code: "0000".to_string(),
        }
    }
}

/// Screening result for one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Generated transaction identifier
    pub transaction_id: String,

    /// Merchant snapshot
    pub merchant_info: MerchantRecord,

    /// Raised flags in evaluation order
    pub fraud_flags: Vec<FraudFlag>,

    /// Clamped risk score
    pub risk_score: RiskScore,

    /// Decision derived from the score
    pub decision: Decision,

    /// Reported processing time, e.g. `"87ms"`
    pub processing_time: String,

    /// ISO-8601 analysis timestamp
    pub timestamp: String,
}
