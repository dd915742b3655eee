//! Risk Engine for card-payment fraud screening
//!
//! Scores a single transaction against a fixed rule set and maps the score
//! to an actionable decision. Wall-clock and randomness are injected through
//! the [`seams`] traits so scoring stays reproducible under test.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod decision;
pub mod error;
pub mod merchants;
pub mod scoring;
pub mod seams;
pub mod types;

pub use analysis::FraudAnalyzer;
pub use decision::decide;
pub use error::{Error, Result};
pub use merchants::MerchantDirectory;
pub use scoring::{RiskScorer, RuleOutcome};
pub use seams::{Clock, FixedClock, RandomSource, ScriptedRandom, SystemClock, ThreadRandom};
pub use types::*;
