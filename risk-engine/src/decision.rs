//! Score-to-decision policy

use crate::{Decision, RiskScore};

/// Highest score that is approved outright
pub const APPROVE_MAX: u8 = 25;

/// Highest score sent to manual review
pub const REVIEW_MAX: u8 = 50;

/// Highest score that is declined without blocking
pub const DECLINE_MAX: u8 = 75;

/// Map a risk score to a decision
pub fn decide(score: RiskScore) -> Decision {
    match score.score() {
        s if s <= APPROVE_MAX => Decision::Approve,
        s if s <= REVIEW_MAX => Decision::Review,
        s if s <= DECLINE_MAX => Decision::Decline,
        _ => Decision::Block,
    }
}
