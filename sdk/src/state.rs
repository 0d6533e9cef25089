//! Stored record shapes.
//!
//! `PoolRecord` is one row of the liquidity table (one per trading pair);
//! `ConfigRecord` is the singleton holding market-wide swap-mining state.
//! Both are written by the exchange contract; this crate only reads them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Asset, ExtendedSymbol, Symbol};

// ─── Pool ─────────────────────────────────────────────────────────────────────

/// One row of the liquidity table.
///
/// `token1`/`token2` keep their storage order; they are not sorted by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub pair_id:          u64,
    pub token1:           ExtendedSymbol,
    pub token2:           ExtendedSymbol,
    /// Reserve of `token1`.
    pub quantity1:        Asset,
    /// Reserve of `token2`.
    pub quantity2:        Asset,
    pub liquidity_token:  u64,
    pub price1:           f32,
    pub price2:           f32,
    pub cumulative1:      u64,
    pub cumulative2:      u64,
    /// Share of market-wide swap-mining weight; zero disables rewards.
    pub swap_weight:      f32,
    pub liquidity_weight: f32,
    pub timestamp:        u64,
}

impl PoolRecord {
    /// Check that each reserve is denominated in its token's symbol.
    pub fn validate(&self) -> Result<()> {
        let check = |slot: u8, quantity: &Asset, token: &ExtendedSymbol| {
            if quantity.symbol == token.symbol {
                Ok(())
            } else {
                Err(Error::CorruptRecord {
                    pair_id: self.pair_id,
                    reason:  format!(
                        "quantity{slot} is {} but token{slot} is {}",
                        quantity.symbol, token.symbol
                    ),
                })
            }
        };
        check(1, &self.quantity1, &self.token1)?;
        check(2, &self.quantity2, &self.token2)
    }

    /// Whether either side of the pair uses `symbol`.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.token1.symbol == *symbol || self.token2.symbol == *symbol
    }

    /// Whether trades on this pair earn swap-mining rewards.
    pub fn is_reward_eligible(&self) -> bool {
        self.swap_weight > 0.0
    }
}

// ─── Global config ────────────────────────────────────────────────────────────

/// Market-wide swap-mining state.
///
/// Only `swap_time` and `swap_quantity` feed the reward estimate; the
/// remaining fields are carried so a snapshot of the full record parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Unix seconds of the last swap-mining reset.
    pub swap_time:       i64,
    /// Reward pool size at the last reset, in raw reward-token units.
    pub swap_quantity:   u64,
    #[serde(default)]
    pub swap_suply:      u64,
    #[serde(default)]
    pub swap_counter:    u64,
    #[serde(default)]
    pub swap_issue:      u64,
    #[serde(default)]
    pub market_time:     i64,
    #[serde(default)]
    pub market_quantity: u64,
}

impl ConfigRecord {
    pub fn new(swap_time: i64, swap_quantity: u64) -> Self {
        ConfigRecord {
            swap_time,
            swap_quantity,
            swap_suply: 0,
            swap_counter: 0,
            swap_issue: 0,
            market_time: 0,
            market_quantity: 0,
        }
    }
}
