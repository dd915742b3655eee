//! Transaction analysis pipeline

use crate::seams::{Clock, RandomSource, SystemClock, ThreadRandom};
use crate::{decide, AnalysisResult, MerchantDirectory, RiskScorer, TransactionInput};
use chrono::SecondsFormat;
use std::sync::Arc;
use tracing::info;

/// Prefix of generated transaction identifiers
pub const TRANSACTION_ID_PREFIX: &str = "TXN_";

/// Bounds of the reported processing time in milliseconds
pub const PROCESSING_TIME_MS: (u32, u32) = (50, 150);

/// Assembles analysis results from the directory, scorer and decision policy
pub struct FraudAnalyzer {
    scorer: RiskScorer,
    directory: Arc<MerchantDirectory>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl FraudAnalyzer {
    /// Create an analyzer with explicit time and randomness sources
    pub fn new(
        directory: Arc<MerchantDirectory>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            scorer: RiskScorer::new(clock.clone(), random.clone()),
            directory,
            clock,
            random,
        }
    }

    /// Create an analyzer on the wall clock and thread RNG
    pub fn with_system_sources(directory: Arc<MerchantDirectory>) -> Self {
        Self::new(directory, Arc::new(SystemClock), Arc::new(ThreadRandom))
    }

    /// Merchant directory used for lookups
    pub fn directory(&self) -> &MerchantDirectory {
        &self.directory
    }

    /// Score one transaction and build its result
    pub fn analyze(&self, input: &TransactionInput) -> AnalysisResult {
        let now = self.clock.now();
        // Second granularity: two analyses in the same second share an id
        let transaction_id = format!("{}{}", TRANSACTION_ID_PREFIX, now.timestamp());

        let merchant_info = self.directory.lookup(&input.merchant_id).clone();
        let outcome = self.scorer.evaluate(input);
        let decision = decide(outcome.score);

        let (low, high) = PROCESSING_TIME_MS;
        let processing_time = format!("{}ms", self.random.range_inclusive(low, high));

        info!(
            transaction_id = %transaction_id,
            merchant_id = %input.merchant_id,
            risk_score = outcome.score.score(),
            decision = %decision,
            flags = outcome.flags.len(),
            "Transaction analyzed"
        );

        AnalysisResult {
            transaction_id,
            merchant_info,
            fraud_flags: outcome.flags,
            risk_score: outcome.score,
            decision,
            processing_time,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}
