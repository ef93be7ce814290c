//! Profit estimation
//!
//! Estimates session profitability from the coin amounts fed into a
//! machine. Coin prices map to token payouts through the arcade's bonus
//! table; amounts outside the table pass through 1:1.

use serde::{Deserialize, Serialize};

/// Token bonus table: coin price -> tokens dispensed.
const PRICE_TO_TOKENS: [(u64, u64); 5] = [(10, 12), (20, 26), (30, 42), (50, 75), (100, 150)];

/// Tunable cost model, config-backed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitAssumptions {
    /// Expected toys dispensed per token played
    pub toys_payout_rate: f64,
    /// Average wholesale cost of one plush toy
    pub avg_toy_cost: f64,
    /// Fixed cost per period (rent, electricity)
    pub fixed_cost: f64,
}

impl Default for ProfitAssumptions {
    fn default() -> Self {
        Self {
            toys_payout_rate: 1.0 / 7.0,
            avg_toy_cost: 2.5,
            fixed_cost: 400.0,
        }
    }
}

/// Result of a profit estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitEstimate {
    pub profit: f64,
    pub total_income: u64,
    pub total_tokens: u64,
    pub toys_payout: f64,
}

fn tokens_for_price(price: u64) -> u64 {
    PRICE_TO_TOKENS
        .iter()
        .find(|(p, _)| *p == price)
        .map_or(price, |(_, tokens)| *tokens)
}

/// Estimate profit from coin amounts alone, deriving the expected toys
/// payout from the token total and the assumed payout rate.
pub fn estimate(coin_amounts: &[u64], assumptions: &ProfitAssumptions) -> ProfitEstimate {
    let total_tokens: u64 = coin_amounts.iter().map(|&a| tokens_for_price(a)).sum();
    let total_income: u64 = coin_amounts.iter().sum();

    let toys_payout = total_tokens as f64 * assumptions.toys_payout_rate;
    let profit =
        total_income as f64 - toys_payout * assumptions.avg_toy_cost - assumptions.fixed_cost;

    ProfitEstimate {
        profit,
        total_income,
        total_tokens,
        toys_payout,
    }
}

/// Estimate profit with an observed toys-payout count instead of the
/// rate-derived one. Token bonuses do not apply here; tokens equal income.
pub fn estimate_with_total_payout(
    coin_amounts: &[u64],
    total_toys_payout: f64,
    assumptions: &ProfitAssumptions,
) -> ProfitEstimate {
    let total_income: u64 = coin_amounts.iter().sum();
    let profit = total_income as f64
        - total_toys_payout * assumptions.avg_toy_cost
        - assumptions.fixed_cost;

    ProfitEstimate {
        profit,
        total_income,
        total_tokens: total_income,
        toys_payout: total_toys_payout,
    }
}
