//! Risk scoring engine

use crate::seams::{Clock, RandomSource};
use crate::{FraudFlag, RiskScore, TransactionInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Velocity above this count raises `high_velocity`
pub const VELOCITY_THRESHOLD: u32 = 10;

/// Amount above this value raises `unusual_amount`
pub const AMOUNT_THRESHOLD: Decimal = dec!(1000);

/// Hours before this one count as night
pub const NIGHT_ENDS_HOUR: u32 = 6;

/// Hours after this one count as night
pub const NIGHT_STARTS_AFTER_HOUR: u32 = 22;

/// Probability that `suspicious_pattern` is raised on any evaluation
pub const PATTERN_PROBABILITY: f64 = 0.1;

/// Flags and score produced by one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Raised flags in evaluation order
    pub flags: Vec<FraudFlag>,
    /// Sum of flag weights, clamped to 100
    pub score: RiskScore,
}

/// Risk scorer
///
/// Rules are independent and always evaluated in the same order, so the flag
/// sequence is stable for a given input, clock and random source.
pub struct RiskScorer {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl RiskScorer {
    /// Create new risk scorer
    pub fn new(clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self { clock, random }
    }

    /// Evaluate every rule against the transaction
    pub fn evaluate(&self, input: &TransactionInput) -> RuleOutcome {
        let checks = [
            (FraudFlag::HighVelocity, input.velocity > VELOCITY_THRESHOLD),
            (FraudFlag::UnusualAmount, input.amount > AMOUNT_THRESHOLD),
            (
                FraudFlag::LocationMismatch,
                locations_mismatch(input.ip_location.as_deref(), input.billing_location.as_deref()),
            ),
            (FraudFlag::InvalidCard, !input.card_valid),
            (FraudFlag::UnusualTiming, is_night_hour(self.clock.local_hour())),
            (FraudFlag::SuspiciousPattern, self.random.chance(PATTERN_PROBABILITY)),
        ];

        let mut flags = Vec::new();
        let mut total = 0u8;
        for (flag, triggered) in checks {
            if triggered {
                flags.push(flag);
                total = total.saturating_add(flag.weight());
            }
        }

        let score = RiskScore::new(total);
        tracing::debug!(?flags, %score, "rules evaluated");

        RuleOutcome { flags, score }
    }
}

/// Two absent locations match; an absent and a present one do not.
fn locations_mismatch(ip_location: Option<&str>, billing_location: Option<&str>) -> bool {
    match (ip_location, billing_location) {
        (None, None) => false,
        (ip, billing) => ip != billing,
    }
}

fn is_night_hour(hour: u32) -> bool {
    hour < NIGHT_ENDS_HOUR || hour > NIGHT_STARTS_AFTER_HOUR
}
