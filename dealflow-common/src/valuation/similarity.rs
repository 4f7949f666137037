//! Composite similarity scoring
//!
//! Produces a score in [0,1] from weighted per-attribute components.
//! Each component maps an absolute difference through a linear penalty
//! clamped to [0,1], so the composite is monotonic: a larger difference
//! on any attribute can only lower (or hold) the score. Deterministic
//! for identical inputs.

use super::{CompConfig, ComparableCandidate, SubjectProperty};

/// Component weights; must sum to 1.0
const WEIGHT_SQFT: f64 = 0.4;
const WEIGHT_BEDROOMS: f64 = 0.2;
const WEIGHT_BATHROOMS: f64 = 0.2;
const WEIGHT_DISTANCE: f64 = 0.2;

/// Square-footage difference at which the component bottoms out
const SQFT_SPAN: f64 = 1000.0;
/// Bedroom-count difference at which the component bottoms out
const BEDROOM_SPAN: f64 = 4.0;
/// Bathroom-count difference at which the component bottoms out
const BATHROOM_SPAN: f64 = 3.0;

/// Neutral component score when either side lacks the attribute
const NEUTRAL: f64 = 0.5;

/// Composite similarity of a candidate to the subject, in [0,1]
pub fn similarity_score(
    subject: &SubjectProperty,
    comp: &ComparableCandidate,
    config: &CompConfig,
) -> f64 {
    let sqft = attribute_component(subject.square_feet, comp.square_feet, SQFT_SPAN);
    let bedrooms = attribute_component(subject.bedrooms, comp.bedrooms, BEDROOM_SPAN);
    let bathrooms = attribute_component(subject.bathrooms, comp.bathrooms, BATHROOM_SPAN);
    let distance = distance_component(comp.distance_miles, config.max_distance_miles);

    let score = WEIGHT_SQFT * sqft
        + WEIGHT_BEDROOMS * bedrooms
        + WEIGHT_BATHROOMS * bathrooms
        + WEIGHT_DISTANCE * distance;

    score.clamp(0.0, 1.0)
}

/// Linear penalty on the absolute difference, clamped to [0,1];
/// neutral when either side is missing the attribute
fn attribute_component(subject: Option<f64>, comp: Option<f64>, span: f64) -> f64 {
    match (subject, comp) {
        (Some(s), Some(c)) => {
            let diff = (s - c).abs();
            (1.0 - diff / span).clamp(0.0, 1.0)
        }
        _ => NEUTRAL,
    }
}

/// Closer candidates score higher; distance is normalized by the
/// configured search radius
fn distance_component(distance_miles: Option<f64>, max_distance: f64) -> f64 {
    match distance_miles {
        Some(d) if max_distance > 0.0 => (1.0 - d / max_distance).clamp(0.0, 1.0),
        Some(_) => NEUTRAL,
        None => NEUTRAL,
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
            garage_spaces: None,
        }
    }

    fn config() -> CompConfig {
        CompConfig::default()
    }

    #[test]
    fn identical_candidate_at_zero_distance_scores_one() {
        let comp = ComparableCandidate {
            bedrooms: Some(3.0),
            bathrooms: Some(2.0),
            square_feet: Some(2000.0),
            distance_miles: Some(0.0),
            ..Default::default()
        };
        let score = similarity_score(&subject(), &comp, &config());
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn score_stays_in_unit_interval_on_extreme_differences() {
        let comp = ComparableCandidate {
            bedrooms: Some(40.0),
            bathrooms: Some(30.0),
            square_feet: Some(90_000.0),
            distance_miles: Some(500.0),
            ..Default::default()
        };
        let score = similarity_score(&subject(), &comp, &config());
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn larger_sqft_difference_never_raises_score() {
        let make = |sqft: f64| ComparableCandidate {
            bedrooms: Some(3.0),
            bathrooms: Some(2.0),
            square_feet: Some(sqft),
            distance_miles: Some(0.5),
            ..Default::default()
        };
        let mut last = f64::MAX;
        for sqft in [2000.0, 2100.0, 2400.0, 2900.0, 3500.0, 10_000.0] {
            let score = similarity_score(&subject(), &make(sqft), &config());
            assert!(score <= last, "score must be non-increasing in |diff|");
            last = score;
        }
    }

    #[test]
    fn missing_attribute_is_neutral_not_zero() {
        let with = ComparableCandidate {
            bedrooms: Some(3.0),
            bathrooms: Some(2.0),
            square_feet: Some(2000.0),
            distance_miles: Some(0.5),
            ..Default::default()
        };
        let without_sqft = ComparableCandidate {
            square_feet: None,
            ..with.clone()
        };
        let a = similarity_score(&subject(), &with, &config());
        let b = similarity_score(&subject(), &without_sqft, &config());
        assert!(b < a);
        assert!(b > 0.0);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let comp = ComparableCandidate {
            bedrooms: Some(4.0),
            bathrooms: Some(2.5),
            square_feet: Some(1850.0),
            distance_miles: Some(1.3),
            ..Default::default()
        };
        let a = similarity_score(&subject(), &comp, &config());
        let b = similarity_score(&subject(), &comp, &config());
        assert_eq!(a, b);
    }
}
