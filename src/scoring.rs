//! Score metrics and the derived total
//!
//! Each scoring game owns exactly one metric on every team. The total score is
//! a fixed combination of the three metrics and is never stored independently
//! of them.

use enum_map::Enum;
use serde::{Deserialize, Serialize};

use crate::constants::scoring::EARNINGS_DIVISOR;

/// One of the independently updated numeric fields on a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Points earned in the Mindclans quiz
    #[display("Mindclans")]
    Mindclans,
    /// Money earned in the Sell the Product game
    #[display("Sell Product Earnings")]
    SellProductEarnings,
    /// Marks awarded by judges in the Pitch the Product game
    #[display("Pitch Product Marks")]
    PitchProductMarks,
}

impl Metric {
    /// All metrics in display order
    pub const ALL: [Metric; 3] = [
        Metric::Mindclans,
        Metric::SellProductEarnings,
        Metric::PitchProductMarks,
    ];
}

/// Combines the three metrics into a team's total score
///
/// Earnings are scaled down by [`EARNINGS_DIVISOR`] so that a currency amount
/// weighs roughly as much as quiz points and judge marks. No clamping is
/// applied; negative and fractional inputs pass straight through.
pub fn total_score(mindclans: f64, sell_product_earnings: f64, pitch_product_marks: f64) -> f64 {
    mindclans + sell_product_earnings / EARNINGS_DIVISOR + pitch_product_marks
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_total_score_zero() {
        assert_eq!(total_score(0., 0., 0.), 0.);
    }

    #[test]
    fn test_total_score_scales_earnings() {
        assert_eq!(total_score(10., 500., 3.), 18.);
        assert_eq!(total_score(0., 150., 0.), 1.5);
    }

    #[test]
    fn test_total_score_accepts_negative_values() {
        assert_eq!(total_score(-5., -200., 1.), -6.);
    }

    #[test]
    fn test_metric_serialization() {
        assert_eq!(
            serde_json::to_string(&Metric::SellProductEarnings).unwrap(),
            "\"sellProductEarnings\""
        );
        let metric: Metric = serde_json::from_str("\"pitchProductMarks\"").unwrap();
        assert_eq!(metric, Metric::PitchProductMarks);
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::Mindclans.to_string(), "Mindclans");
        assert_eq!(Metric::PitchProductMarks.to_string(), "Pitch Product Marks");
    }

    #[test]
    fn test_metric_all_is_enum_order() {
        for (index, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.into_usize(), index);
        }
    }
}
