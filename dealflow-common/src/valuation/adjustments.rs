//! Per-comparable price adjustments
//!
//! Each adjustment normalizes a comparable's price toward the subject:
//! a positive amount means the comparable would have sold for more if it
//! matched the subject on that factor. The dashboard displays these rows
//! numerically, so the formulas are an exact contract:
//!
//! | Factor          | Trigger                    | Formula                        |
//! |-----------------|----------------------------|--------------------------------|
//! | Square footage  | both sides have sqft       | (subject − comp) × $100        |
//! | Bedrooms        | both sides have bedrooms   | (subject − comp) × $5,000      |
//! | Bathrooms       | both sides have bathrooms  | (subject − comp) × $3,000      |
//! | Garage spaces   | both sides have garages    | (subject − comp) × $2,000      |
//! | Distance        | distance_miles > 1         | −(distance − 1) × $1,000       |
//! | Market          | days_since_sale > 90       | floor(days/30) × $500          |
//!
//! A missing attribute on either side skips that row; it is never an error.

use super::{ComparableCandidate, SubjectProperty};
use serde::{Deserialize, Serialize};

/// Dollars per square foot of difference
const SQFT_RATE: f64 = 100.0;
/// Dollars per bedroom of difference
const BEDROOM_RATE: f64 = 5_000.0;
/// Dollars per bathroom of difference
const BATHROOM_RATE: f64 = 3_000.0;
/// Dollars per garage space of difference
const GARAGE_RATE: f64 = 2_000.0;
/// Dollar penalty per mile beyond the first
const DISTANCE_RATE: f64 = 1_000.0;
/// Dollar appreciation per 30-day period since sale
const MARKET_RATE_PER_PERIOD: f64 = 500.0;

/// Grouping bucket for an adjustment row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentCategory {
    Property,
    Location,
    Market,
}

/// One adjustment row: factor name, human-readable difference, signed
/// dollar amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub factor: String,
    pub category: AdjustmentCategory,
    pub difference: String,
    pub amount: f64,
}

/// Compute all applicable adjustment rows for one comparable
pub fn compute_adjustments(
    subject: &SubjectProperty,
    comp: &ComparableCandidate,
) -> Vec<Adjustment> {
    let mut rows = Vec::new();

    if let (Some(subj_sqft), Some(comp_sqft)) = (subject.square_feet, comp.square_feet) {
        let diff = subj_sqft - comp_sqft;
        rows.push(Adjustment {
            factor: "square_footage".to_string(),
            category: AdjustmentCategory::Property,
            difference: format!("{:+.0} sqft", diff),
            amount: diff * SQFT_RATE,
        });
    }

    if let (Some(subj_beds), Some(comp_beds)) = (subject.bedrooms, comp.bedrooms) {
        let diff = subj_beds - comp_beds;
        rows.push(Adjustment {
            factor: "bedrooms".to_string(),
            category: AdjustmentCategory::Property,
            difference: format!("{:+.0} bed", diff),
            amount: diff * BEDROOM_RATE,
        });
    }

    if let (Some(subj_baths), Some(comp_baths)) = (subject.bathrooms, comp.bathrooms) {
        let diff = subj_baths - comp_baths;
        rows.push(Adjustment {
            factor: "bathrooms".to_string(),
            category: AdjustmentCategory::Property,
            difference: format!("{:+.1} bath", diff),
            amount: diff * BATHROOM_RATE,
        });
    }

    if let (Some(subj_garage), Some(comp_garage)) = (subject.garage_spaces, comp.garage_spaces) {
        let diff = subj_garage - comp_garage;
        rows.push(Adjustment {
            factor: "garage_spaces".to_string(),
            category: AdjustmentCategory::Property,
            difference: format!("{:+.0} space", diff),
            amount: diff * GARAGE_RATE,
        });
    }

    // Distance penalty applies only beyond the first mile
    if let Some(distance) = comp.distance_miles {
        if distance > 1.0 {
            rows.push(Adjustment {
                factor: "distance".to_string(),
                category: AdjustmentCategory::Location,
                difference: format!("{:.1} mi away", distance),
                amount: -(distance - 1.0) * DISTANCE_RATE,
            });
        }
    }

    // Market appreciation for stale sales: one period per 30 days
    if let Some(days) = comp.days_since_sale {
        if days > 90.0 {
            let periods = (days / 30.0).floor();
            rows.push(Adjustment {
                factor: "market_appreciation".to_string(),
                category: AdjustmentCategory::Market,
                difference: format!("{:.0} days since sale", days),
                amount: periods * MARKET_RATE_PER_PERIOD,
            });
        }
    }

    rows
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

    fn find<'a>(rows: &'a [Adjustment], factor: &str) -> Option<&'a Adjustment> {
        rows.iter().find(|a| a.factor == factor)
    }

    #[test]
    fn sqft_adjustment_is_100_per_foot() {
        let comp = ComparableCandidate {
            square_feet: Some(1800.0),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        let row = find(&rows, "square_footage").unwrap();
        assert_eq!(row.amount, 20_000.0);
        assert_eq!(row.category, AdjustmentCategory::Property);
    }

    #[test]
    fn bedroom_bathroom_garage_rates() {
        let comp = ComparableCandidate {
            bedrooms: Some(2.0),
            bathrooms: Some(1.0),
            garage_spaces: Some(0.0),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        assert_eq!(find(&rows, "bedrooms").unwrap().amount, 5_000.0);
        assert_eq!(find(&rows, "bathrooms").unwrap().amount, 3_000.0);
        assert_eq!(find(&rows, "garage_spaces").unwrap().amount, 4_000.0);
    }

    #[test]
    fn negative_adjustment_when_comp_is_larger() {
        let comp = ComparableCandidate {
            square_feet: Some(2500.0),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        assert_eq!(find(&rows, "square_footage").unwrap().amount, -50_000.0);
    }

    #[test]
    fn missing_attribute_skips_row_instead_of_erroring() {
        let comp = ComparableCandidate {
            bedrooms: Some(3.0),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        assert!(find(&rows, "square_footage").is_none());
        assert!(find(&rows, "bathrooms").is_none());
        assert!(find(&rows, "garage_spaces").is_none());
        assert!(find(&rows, "bedrooms").is_some());
    }

    #[test]
    fn no_distance_row_at_or_under_one_mile() {
        let comp = ComparableCandidate {
            distance_miles: Some(0.5),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        assert!(find(&rows, "distance").is_none());
    }

    #[test]
    fn distance_row_beyond_one_mile_is_negative() {
        let comp = ComparableCandidate {
            distance_miles: Some(1.5),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        let row = find(&rows, "distance").unwrap();
        assert_eq!(row.amount, -500.0);
        assert_eq!(row.category, AdjustmentCategory::Location);
    }

    #[test]
    fn market_adjustment_uses_floor_of_30_day_periods() {
        let comp = ComparableCandidate {
            days_since_sale: Some(150.0),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        let row = find(&rows, "market_appreciation").unwrap();
        // floor(150/30) = 5 periods at $500
        assert_eq!(row.amount, 2_500.0);
        assert_eq!(row.category, AdjustmentCategory::Market);
    }

    #[test]
    fn no_market_row_at_90_days_or_less() {
        let comp = ComparableCandidate {
            days_since_sale: Some(90.0),
            ..Default::default()
        };
        let rows = compute_adjustments(&subject(), &comp);
        assert!(find(&rows, "market_appreciation").is_none());
    }
}
