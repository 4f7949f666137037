//! Confidence scoring for a blended estimate
//!
//! Overall confidence is the unweighted arithmetic mean of four
//! sub-scores, each in [0,1]:
//!
//! - comp-count score: min(count / 10, 1)
//! - mean similarity across comparables
//! - market-activity score: max(0, (90 − mean days_on_market) / 90)
//! - price-consistency score: max(0, 1 − CV(prices)) where
//!   CV = stddev / mean over raw comparable prices; 0 when fewer than
//!   two priced comparables

use super::ScoredComparable;

/// Comparable count at which the count sub-score saturates
const FULL_CONFIDENCE_COUNT: f64 = 10.0;
/// Days-on-market horizon for the market-activity sub-score
const MARKET_HORIZON_DAYS: f64 = 90.0;

/// Overall confidence in [0,1] for a scored comparable set
pub fn confidence_score(comparables: &[ScoredComparable]) -> f64 {
    if comparables.is_empty() {
        return 0.0;
    }

    let count_score = (comparables.len() as f64 / FULL_CONFIDENCE_COUNT).min(1.0);
    let similarity_score = mean_similarity(comparables);
    let market_score = market_activity(comparables);
    let consistency_score = price_consistency(comparables);

    let overall = (count_score + similarity_score + market_score + consistency_score) / 4.0;
    overall.clamp(0.0, 1.0)
}

fn mean_similarity(comparables: &[ScoredComparable]) -> f64 {
    let sum: f64 = comparables.iter().map(|c| c.similarity_score).sum();
    sum / comparables.len() as f64
}

/// Faster-moving markets (lower mean days on market) score higher;
/// comparables without the field are left out of the mean, and the
/// sub-score is 0 when none report it
fn market_activity(comparables: &[ScoredComparable]) -> f64 {
    let days: Vec<f64> = comparables
        .iter()
        .filter_map(|c| c.candidate.days_on_market)
        .collect();
    if days.is_empty() {
        return 0.0;
    }
    let mean = days.iter().sum::<f64>() / days.len() as f64;
    ((MARKET_HORIZON_DAYS - mean) / MARKET_HORIZON_DAYS).max(0.0)
}

/// Tighter price clustering scores higher; flagged (unpriced)
/// comparables are excluded, and fewer than two prices score 0
fn price_consistency(comparables: &[ScoredComparable]) -> f64 {
    let prices: Vec<f64> = comparables
        .iter()
        .filter(|c| !c.flagged)
        .map(|c| c.effective_price)
        .collect();
    if prices.len() < 2 {
        return 0.0;
    }

    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    if mean == 0.0 {
        return 0.0;
    }

    let variance =
        prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / prices.len() as f64;
    let cv = variance.sqrt() / mean;

    (1.0 - cv).max(0.0)
}
