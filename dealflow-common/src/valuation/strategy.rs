//! Quick financial-strategy calculators
//!
//! Stateless, deterministic formulas layered on top of a purchase price
//! and user-supplied assumptions. Rent estimation uses the 1% rule and
//! flip/wholesale/BRRRR math uses a fixed 30% ARV uplift heuristic; these
//! are screening numbers, not appraisals. The only error conditions are
//! zero denominators (loan 0, cash invested 0), which return 0 rather
//! than NaN or infinity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// After-repair value uplift assumed over purchase price
const ARV_UPLIFT: f64 = 1.30;
/// Monthly rent as a fraction of price (1% rule)
const RENT_RATIO: f64 = 0.01;
/// Operating expenses as a fraction of rent
const EXPENSE_RATIO: f64 = 0.40;
/// Selling costs as a fraction of ARV (agent fees + closing)
const SELLING_COST_RATIO: f64 = 0.06;
/// Maximum allowable offer fraction of ARV (70% rule)
const WHOLESALE_MAO_RATIO: f64 = 0.70;
/// Refinance loan-to-value on ARV
const BRRRR_REFI_LTV: f64 = 0.75;

/// Investment strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Flip,
    Rental,
    Wholesale,
    Brrrr,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Flip => "flip",
            StrategyKind::Rental => "rental",
            StrategyKind::Wholesale => "wholesale",
            StrategyKind::Brrrr => "brrrr",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flip" => Ok(StrategyKind::Flip),
            "rental" => Ok(StrategyKind::Rental),
            "wholesale" => Ok(StrategyKind::Wholesale),
            "brrrr" => Ok(StrategyKind::Brrrr),
            other => Err(format!("Unknown strategy kind: {}", other)),
        }
    }
}

/// User-supplied financing and rehab assumptions
///
/// Fields omitted from a request fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyAssumptions {
    /// Annual interest rate, percent (e.g. 7.0)
    pub interest_rate_pct: f64,
    /// Down payment, percent of purchase price
    pub down_payment_pct: f64,
    /// Loan term in years
    pub loan_term_years: u32,
    /// Months the property is held before resale (flip)
    pub holding_months: u32,
    /// Rehab budget in dollars
    pub repair_budget: f64,
    /// Override for estimated monthly rent; 1% rule when absent
    pub monthly_rent: Option<f64>,
}

impl Default for StrategyAssumptions {
    fn default() -> Self {
        StrategyAssumptions {
            interest_rate_pct: 7.0,
            down_payment_pct: 20.0,
            loan_term_years: 30,
            holding_months: 6,
            repair_budget: 0.0,
            monthly_rent: None,
        }
    }
}

/// Computed metrics, one variant per strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyMetrics {
    Flip {
        arv: f64,
        cash_invested: f64,
        holding_costs: f64,
        selling_costs: f64,
        profit: f64,
        roi_pct: f64,
    },
    Rental {
        monthly_rent: f64,
        monthly_expenses: f64,
        monthly_payment: f64,
        monthly_cash_flow: f64,
        annual_cash_flow: f64,
        cap_rate_pct: f64,
        cash_on_cash_pct: f64,
    },
    Wholesale {
        arv: f64,
        max_allowable_offer: f64,
        spread: f64,
        assignment_fee: f64,
    },
    Brrrr {
        arv: f64,
        refinance_loan: f64,
        cash_invested: f64,
        cash_recouped: f64,
        cash_left_in_deal: f64,
        monthly_cash_flow: f64,
    },
}

/// Standard fixed-rate amortization payment
///
/// Returns 0 for a zero/negative loan or a zero term; a zero rate uses
/// the straight-line no-interest formula.
pub fn monthly_mortgage_payment(loan_amount: f64, annual_rate_pct: f64, term_years: u32) -> f64 {
    if loan_amount <= 0.0 || term_years == 0 {
        return 0.0;
    }
    let n = f64::from(term_years * 12);
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return loan_amount / n;
    }
    let factor = (1.0 + monthly_rate).powf(n);
    loan_amount * monthly_rate * factor / (factor - 1.0)
}

/// Dispatch a strategy calculation over a purchase price
pub fn analyze_strategy(
    kind: StrategyKind,
    purchase_price: f64,
    assumptions: &StrategyAssumptions,
) -> StrategyMetrics {
    match kind {
        StrategyKind::Flip => analyze_flip(purchase_price, assumptions),
        StrategyKind::Rental => analyze_rental(purchase_price, assumptions),
        StrategyKind::Wholesale => analyze_wholesale(purchase_price, assumptions),
        StrategyKind::Brrrr => analyze_brrrr(purchase_price, assumptions),
    }
}

fn financed_split(purchase_price: f64, assumptions: &StrategyAssumptions) -> (f64, f64) {
    let down = purchase_price * assumptions.down_payment_pct / 100.0;
    let loan = (purchase_price - down).max(0.0);
    (down, loan)
}

fn analyze_flip(purchase_price: f64, a: &StrategyAssumptions) -> StrategyMetrics {
    let arv = purchase_price * ARV_UPLIFT;
    let (down, loan) = financed_split(purchase_price, a);
    let payment = monthly_mortgage_payment(loan, a.interest_rate_pct, a.loan_term_years);
    let holding_costs = payment * f64::from(a.holding_months);
    let selling_costs = arv * SELLING_COST_RATIO;
    let cash_invested = down + a.repair_budget + holding_costs;
    let profit = arv - purchase_price - a.repair_budget - holding_costs - selling_costs;
    let roi_pct = if cash_invested > 0.0 {
        profit / cash_invested * 100.0
    } else {
        0.0
    };

    StrategyMetrics::Flip {
        arv,
        cash_invested,
        holding_costs,
        selling_costs,
        profit,
        roi_pct,
    }
}

fn analyze_rental(purchase_price: f64, a: &StrategyAssumptions) -> StrategyMetrics {
    let monthly_rent = a.monthly_rent.unwrap_or(purchase_price * RENT_RATIO);
    let monthly_expenses = monthly_rent * EXPENSE_RATIO;
    let (down, loan) = financed_split(purchase_price, a);
    let monthly_payment = monthly_mortgage_payment(loan, a.interest_rate_pct, a.loan_term_years);
    let monthly_cash_flow = monthly_rent - monthly_expenses - monthly_payment;
    let annual_cash_flow = monthly_cash_flow * 12.0;

    let annual_noi = (monthly_rent - monthly_expenses) * 12.0;
    let cap_rate_pct = if purchase_price > 0.0 {
        annual_noi / purchase_price * 100.0
    } else {
        0.0
    };
    let cash_invested = down + a.repair_budget;
    let cash_on_cash_pct = if cash_invested > 0.0 {
        annual_cash_flow / cash_invested * 100.0
    } else {
        0.0
    };

    StrategyMetrics::Rental {
        monthly_rent,
        monthly_expenses,
        monthly_payment,
        monthly_cash_flow,
        annual_cash_flow,
        cap_rate_pct,
        cash_on_cash_pct,
    }
}

fn analyze_wholesale(purchase_price: f64, a: &StrategyAssumptions) -> StrategyMetrics {
    let arv = purchase_price * ARV_UPLIFT;
    let max_allowable_offer = arv * WHOLESALE_MAO_RATIO - a.repair_budget;
    let spread = max_allowable_offer - purchase_price;
    let assignment_fee = spread.max(0.0);

    StrategyMetrics::Wholesale {
        arv,
        max_allowable_offer,
        spread,
        assignment_fee,
    }
}

fn analyze_brrrr(purchase_price: f64, a: &StrategyAssumptions) -> StrategyMetrics {
    let arv = purchase_price * ARV_UPLIFT;
    let (down, initial_loan) = financed_split(purchase_price, a);
    let refinance_loan = arv * BRRRR_REFI_LTV;
    let cash_invested = down + a.repair_budget;
    let cash_recouped = (refinance_loan - initial_loan).max(0.0);
    let cash_left_in_deal = (cash_invested - cash_recouped).max(0.0);

    let monthly_rent = a.monthly_rent.unwrap_or(arv * RENT_RATIO);
    let monthly_expenses = monthly_rent * EXPENSE_RATIO;
    let refi_payment = monthly_mortgage_payment(refinance_loan, a.interest_rate_pct, a.loan_term_years);
    let monthly_cash_flow = monthly_rent - monthly_expenses - refi_payment;

    StrategyMetrics::Brrrr {
        arv,
        refinance_loan,
        cash_invested,
        cash_recouped,
        cash_left_in_deal,
        monthly_cash_flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_loan_returns_zero_payment() {
        assert_eq!(monthly_mortgage_payment(0.0, 7.0, 30), 0.0);
        assert_eq!(monthly_mortgage_payment(-50_000.0, 7.0, 30), 0.0);
    }

    #[test]
    fn zero_term_returns_zero_payment() {
        assert_eq!(monthly_mortgage_payment(200_000.0, 7.0, 0), 0.0);
    }

    #[test]
    fn zero_rate_uses_straight_line() {
        let payment = monthly_mortgage_payment(120_000.0, 0.0, 10);
        assert!((payment - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn amortization_matches_known_value() {
        // $200,000 at 6% over 30 years: $1,199.10/month
        let payment = monthly_mortgage_payment(200_000.0, 6.0, 30);
        assert!((payment - 1_199.10).abs() < 0.01, "payment = {}", payment);
    }

    #[test]
    fn flip_with_zero_purchase_has_no_nan() {
        let metrics = analyze_strategy(StrategyKind::Flip, 0.0, &StrategyAssumptions::default());
        if let StrategyMetrics::Flip { roi_pct, profit, .. } = metrics {
            assert_eq!(roi_pct, 0.0);
            assert!(profit.is_finite());
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn rental_uses_one_percent_rule_by_default() {
        let metrics = analyze_strategy(StrategyKind::Rental, 250_000.0, &StrategyAssumptions::default());
        if let StrategyMetrics::Rental { monthly_rent, monthly_expenses, .. } = metrics {
            assert_eq!(monthly_rent, 2_500.0);
            assert_eq!(monthly_expenses, 1_000.0);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn rental_rent_override_is_respected() {
        let assumptions = StrategyAssumptions {
            monthly_rent: Some(1_800.0),
            ..Default::default()
        };
        let metrics = analyze_strategy(StrategyKind::Rental, 250_000.0, &assumptions);
        if let StrategyMetrics::Rental { monthly_rent, .. } = metrics {
            assert_eq!(monthly_rent, 1_800.0);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn rental_with_full_cash_purchase_has_no_payment() {
        let assumptions = StrategyAssumptions {
            down_payment_pct: 100.0,
            ..Default::default()
        };
        let metrics = analyze_strategy(StrategyKind::Rental, 250_000.0, &assumptions);
        if let StrategyMetrics::Rental { monthly_payment, monthly_cash_flow, .. } = metrics {
            assert_eq!(monthly_payment, 0.0);
            assert_eq!(monthly_cash_flow, 1_500.0);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn wholesale_follows_seventy_percent_rule() {
        let assumptions = StrategyAssumptions {
            repair_budget: 20_000.0,
            ..Default::default()
        };
        let metrics = analyze_strategy(StrategyKind::Wholesale, 100_000.0, &assumptions);
        if let StrategyMetrics::Wholesale { arv, max_allowable_offer, spread, assignment_fee } = metrics {
            assert_eq!(arv, 130_000.0);
            assert_eq!(max_allowable_offer, 130_000.0 * 0.70 - 20_000.0);
            assert_eq!(spread, max_allowable_offer - 100_000.0);
            assert!(assignment_fee >= 0.0);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn brrrr_cash_recouped_never_negative() {
        // Expensive financing with a cheap refi: recoup floors at 0
        let assumptions = StrategyAssumptions {
            down_payment_pct: 0.0,
            ..Default::default()
        };
        let metrics = analyze_strategy(StrategyKind::Brrrr, 100_000.0, &assumptions);
        if let StrategyMetrics::Brrrr { cash_recouped, cash_left_in_deal, .. } = metrics {
            assert!(cash_recouped >= 0.0);
            assert!(cash_left_in_deal >= 0.0);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn strategy_kind_round_trips() {
        for kind in [
            StrategyKind::Flip,
            StrategyKind::Rental,
            StrategyKind::Wholesale,
            StrategyKind::Brrrr,
        ] {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
        }
        assert!("airbnb".parse::<StrategyKind>().is_err());
    }
}
