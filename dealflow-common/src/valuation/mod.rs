//! Comparable valuation engine
//!
//! Given one subject property and a candidate list of nearby sold/listed
//! properties, produces a ranked, scored comparable list plus a blended
//! value estimate with a confidence score. The candidate list is assumed
//! to be geographically/temporally pre-filtered by the caller; the engine
//! tolerates empty or under-sized lists by degrading confidence to zero
//! rather than returning an error.
//!
//! All computation here is pure and synchronous: no I/O, no shared state.

pub mod adjustments;
pub mod confidence;
pub mod similarity;
pub mod strategy;

use serde::{Deserialize, Serialize};

pub use adjustments::{compute_adjustments, Adjustment, AdjustmentCategory};
pub use strategy::{analyze_strategy, monthly_mortgage_payment, StrategyAssumptions, StrategyKind, StrategyMetrics};

/// Subject property attributes used for comparison
///
/// Bedrooms, bathrooms, and square footage are expected for a meaningful
/// valuation; missing attributes skip the corresponding adjustment and
/// score components instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectProperty {
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<f64>,
    pub garage_spaces: Option<f64>,
}

/// A candidate comparable supplied by the caller
///
/// Ephemeral: computed per valuation request, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparableCandidate {
    pub address: Option<String>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub sale_price: Option<f64>,
    pub listing_price: Option<f64>,
    pub distance_miles: Option<f64>,
    pub days_since_sale: Option<f64>,
    pub days_on_market: Option<f64>,
}

impl ComparableCandidate {
    /// Sale price when present, listing price otherwise
    pub fn sale_or_listing_price(&self) -> Option<f64> {
        self.sale_price.or(self.listing_price)
    }
}

/// A scored comparable in the engine output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredComparable {
    pub candidate: ComparableCandidate,
    /// Composite similarity in [0,1]
    pub similarity_score: f64,
    pub adjustments: Vec<Adjustment>,
    /// Price used for adjustment math; 0.0 when the candidate is flagged
    pub effective_price: f64,
    /// effective_price plus the sum of all adjustment amounts
    pub adjusted_value: f64,
    /// True when the candidate has neither sale_price nor listing_price;
    /// flagged comparables are excluded from price-based calculations
    pub flagged: bool,
}

/// Blended value estimate for the subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationEstimate {
    pub estimated_value: f64,
    /// Always in [0,1]; 0.0 when no comparables were available
    pub confidence_score: f64,
}

/// Engine configuration
///
/// Distance/age filtering happens at the query boundary; the engine only
/// uses `max_distance_miles` to normalize the distance component of the
/// similarity score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompConfig {
    pub max_distance_miles: f64,
    pub max_age_days: i64,
    pub min_comps: usize,
}

impl Default for CompConfig {
    fn default() -> Self {
        CompConfig {
            max_distance_miles: 2.0,
            max_age_days: 180,
            min_comps: 3,
        }
    }
}

/// Sort key for the returned comparable list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompSort {
    /// Similarity descending (default)
    #[default]
    Similarity,
    /// Effective price descending
    Price,
    /// Square footage descending
    SquareFeet,
    /// Distance ascending
    Distance,
}

/// Engine output: ranked comparables plus the blended estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompResult {
    pub comparables: Vec<ScoredComparable>,
    pub estimate: ValuationEstimate,
}

/// Score, adjust, rank, and blend a candidate list
///
/// Returns an empty comparable list and confidence 0.0 when `candidates`
/// is empty. Candidates missing both prices are carried in the output with
/// `flagged` set and an effective price of 0.0 for display, but excluded
/// from the blended estimate and the price-consistency sub-score.
pub fn find_comparables(
    subject: &SubjectProperty,
    candidates: &[ComparableCandidate],
    config: &CompConfig,
    sort: CompSort,
) -> CompResult {
    if candidates.is_empty() {
        return CompResult {
            comparables: Vec::new(),
            estimate: ValuationEstimate {
                estimated_value: 0.0,
                confidence_score: 0.0,
            },
        };
    }

    let mut comparables: Vec<ScoredComparable> = candidates
        .iter()
        .map(|candidate| score_one(subject, candidate, config))
        .collect();

    sort_comparables(&mut comparables, sort);

    let estimate = blend_estimate(&comparables);

    CompResult {
        comparables,
        estimate,
    }
}

fn score_one(
    subject: &SubjectProperty,
    candidate: &ComparableCandidate,
    config: &CompConfig,
) -> ScoredComparable {
    let similarity_score = similarity::similarity_score(subject, candidate, config);
    let adjustments = compute_adjustments(subject, candidate);
    let (effective_price, flagged) = match candidate.sale_or_listing_price() {
        Some(price) => (price, false),
        None => (0.0, true),
    };
    let adjusted_value = effective_price + adjustments.iter().map(|a| a.amount).sum::<f64>();

    ScoredComparable {
        candidate: candidate.clone(),
        similarity_score,
        adjustments,
        effective_price,
        adjusted_value,
        flagged,
    }
}

/// Stable sort by the requested key; ties keep input order
fn sort_comparables(comparables: &mut [ScoredComparable], sort: CompSort) {
    match sort {
        CompSort::Similarity => {
            comparables.sort_by(|a, b| {
                b.similarity_score
                    .partial_cmp(&a.similarity_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        CompSort::Price => {
            comparables.sort_by(|a, b| {
                b.effective_price
                    .partial_cmp(&a.effective_price)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        CompSort::SquareFeet => {
            comparables.sort_by(|a, b| {
                b.candidate
                    .square_feet
                    .unwrap_or(0.0)
                    .partial_cmp(&a.candidate.square_feet.unwrap_or(0.0))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        CompSort::Distance => {
            comparables.sort_by(|a, b| {
                a.candidate
                    .distance_miles
                    .unwrap_or(f64::MAX)
                    .partial_cmp(&b.candidate.distance_miles.unwrap_or(f64::MAX))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}

/// Similarity-weighted mean of adjusted values across priced comparables
///
/// Falls back to the unweighted mean when every similarity weight is zero.
/// The estimate is not clamped: pathological adjustment inputs can drive
/// it negative, and the caller sees that rather than a silently floored
/// number.
fn blend_estimate(comparables: &[ScoredComparable]) -> ValuationEstimate {
    let priced: Vec<&ScoredComparable> = comparables.iter().filter(|c| !c.flagged).collect();

    if priced.is_empty() {
        return ValuationEstimate {
            estimated_value: 0.0,
            confidence_score: 0.0,
        };
    }

    let weight_sum: f64 = priced.iter().map(|c| c.similarity_score).sum();
    let estimated_value = if weight_sum > 0.0 {
        priced
            .iter()
            .map(|c| c.adjusted_value * c.similarity_score)
            .sum::<f64>()
            / weight_sum
    } else {
        priced.iter().map(|c| c.adjusted_value).sum::<f64>() / priced.len() as f64
    };

    let confidence_score = confidence::confidence_score(comparables);

    ValuationEstimate {
        estimated_value,
        confidence_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> SubjectProperty {
        SubjectProperty {
            bedrooms: Some(3.0),
            bathrooms: Some(2.0),
            square_feet: Some(2000.0),
            garage_spaces: Some(2.0),
        }
    }

    fn candidate(sale_price: f64, sqft: f64) -> ComparableCandidate {
        ComparableCandidate {
            bedrooms: Some(3.0),
            bathrooms: Some(2.0),
            square_feet: Some(sqft),
            garage_spaces: Some(2.0),
            sale_price: Some(sale_price),
            distance_miles: Some(0.5),
            days_since_sale: Some(30.0),
            days_on_market: Some(20.0),
            ..Default::default()
        }
    }

    #[test]
    fn empty_candidates_return_zero_confidence_not_error() {
        let result = find_comparables(&subject(), &[], &CompConfig::default(), CompSort::Similarity);
        assert!(result.comparables.is_empty());
        assert_eq!(result.estimate.confidence_score, 0.0);
        assert_eq!(result.estimate.estimated_value, 0.0);
    }

    #[test]
    fn adjusted_value_equals_price_plus_adjustment_sum() {
        let cands = vec![candidate(300_000.0, 1800.0), candidate(310_000.0, 2100.0)];
        let result = find_comparables(&subject(), &cands, &CompConfig::default(), CompSort::Similarity);
        for comp in &result.comparables {
            let total: f64 = comp.adjustments.iter().map(|a| a.amount).sum();
            assert_eq!(comp.adjusted_value, comp.effective_price + total);
        }
    }

    #[test]
    fn unpriced_candidate_is_flagged_and_excluded_from_blend() {
        let mut unpriced = candidate(0.0, 2000.0);
        unpriced.sale_price = None;
        unpriced.listing_price = None;
        let cands = vec![candidate(300_000.0, 2000.0), unpriced];
        let result = find_comparables(&subject(), &cands, &CompConfig::default(), CompSort::Similarity);

        let flagged: Vec<_> = result.comparables.iter().filter(|c| c.flagged).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].effective_price, 0.0);

        // Blend only sees the priced comp: identical attrs mean no
        // adjustments, so the estimate is its raw price
        assert_eq!(result.estimate.estimated_value, 300_000.0);
    }

    #[test]
    fn similarity_sort_is_stable_on_ties() {
        // Two identical candidates produce identical scores; input order
        // must survive the sort
        let a = ComparableCandidate {
            address: Some("first".into()),
            ..candidate(300_000.0, 2000.0)
        };
        let b = ComparableCandidate {
            address: Some("second".into()),
            ..candidate(310_000.0, 2000.0)
        };
        let result = find_comparables(
            &subject(),
            &[a, b],
            &CompConfig::default(),
            CompSort::Similarity,
        );
        assert_eq!(
            result.comparables[0].candidate.address.as_deref(),
            Some("first")
        );
        assert_eq!(
            result.comparables[1].candidate.address.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn sort_by_distance_is_ascending() {
        let mut near = candidate(300_000.0, 2000.0);
        near.distance_miles = Some(0.2);
        let mut far = candidate(300_000.0, 2000.0);
        far.distance_miles = Some(1.8);
        let result = find_comparables(
            &subject(),
            &[far, near],
            &CompConfig::default(),
            CompSort::Distance,
        );
        assert_eq!(result.comparables[0].candidate.distance_miles, Some(0.2));
    }

    #[test]
    fn estimate_can_go_negative_on_pathological_input() {
        // A cheap comparable far above subject size: normalizing it down
        // to the subject costs far more than its price. (300 − 6000) sqft
        // at $100 is −$570,000 against a $5,000 sale, so the blended
        // estimate goes negative. Documented engine behavior: no clamping.
        let mut mansion = candidate(5_000.0, 6000.0);
        mansion.bedrooms = Some(8.0);
        mansion.bathrooms = Some(5.0);
        let subj = SubjectProperty {
            bedrooms: Some(1.0),
            bathrooms: Some(1.0),
            square_feet: Some(300.0),
            garage_spaces: None,
        };
        let result = find_comparables(&subj, &[mansion], &CompConfig::default(), CompSort::Similarity);
        assert!(result.estimate.estimated_value < 0.0);
        assert!(result.estimate.confidence_score >= 0.0);
        assert!(result.estimate.confidence_score <= 1.0);
    }
}
