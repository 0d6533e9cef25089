//! Deployment parameters.
//!
//! Fee total, decay rate, unit scale and the anchor/reward tokens differ
//! between deployments, so none of them is baked into the reward math.
//! [`MarketParams::default`] carries the values of the reference deployment
//! (`onesgamedefi` on EOS mainnet).

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ExtendedSymbol, Symbol};

// ─── Defaults ─────────────────────────────────────────────────────────────────

/// Total fee (trade + protocol). Another deployment reports 30.
pub const DEFAULT_FEE: u8 = 20;
/// Fraction of swap weight released per elapsed second.
pub const DEFAULT_DECAY_RATE: f64 = 0.02;
/// Raw anchor units per compounding step; also the per-step claim divisor.
pub const DEFAULT_UNIT_SCALE: u64 = 10_000;
/// Upper bound on compounding steps in a single estimate.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

const DEFAULT_ANCHOR_CONTRACT: &str = "eosio.token";
const DEFAULT_ANCHOR_SYMBOL: &str = "4,EOS";
const DEFAULT_REWARD_SYMBOL: &str = "4,ONES";

// ─── Env overrides ────────────────────────────────────────────────────────────

pub const ENV_FEE: &str = "ONES_FEE";
pub const ENV_DECAY_RATE: &str = "ONES_DECAY_RATE";
pub const ENV_UNIT_SCALE: &str = "ONES_UNIT_SCALE";
pub const ENV_MAX_STEPS: &str = "ONES_MAX_STEPS";

// ─── MarketParams ─────────────────────────────────────────────────────────────

/// Per-deployment constants consumed by [`OnesClient`](crate::OnesClient).
///
/// Every field is optional in JSON; missing fields take the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketParams {
    pub fee:           u8,
    pub decay_rate:    f64,
    pub unit_scale:    u64,
    /// Base asset a trade must include to earn rewards.
    ///
    /// Trades are matched on `anchor.symbol` only, since an [`Asset`](crate::Asset)
    /// carries no issuing contract. `anchor.contract` is informational.
    pub anchor:        ExtendedSymbol,
    /// Denomination of the estimated reward.
    pub reward_symbol: Symbol,
    pub max_steps:     u64,
}

impl Default for MarketParams {
    fn default() -> Self {
        let anchor_contract = DEFAULT_ANCHOR_CONTRACT.parse().expect("valid default contract");
        let anchor_symbol = DEFAULT_ANCHOR_SYMBOL.parse().expect("valid default anchor symbol");
        let reward_symbol = DEFAULT_REWARD_SYMBOL.parse().expect("valid default reward symbol");
        MarketParams {
            fee:           DEFAULT_FEE,
            decay_rate:    DEFAULT_DECAY_RATE,
            unit_scale:    DEFAULT_UNIT_SCALE,
            anchor:        ExtendedSymbol::new(anchor_contract, anchor_symbol),
            reward_symbol,
            max_steps:     DEFAULT_MAX_STEPS,
        }
    }
}

impl MarketParams {
    pub fn with_fee(mut self, fee: u8) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    pub fn with_unit_scale(mut self, unit_scale: u64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    pub fn with_anchor(mut self, anchor: ExtendedSymbol) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_reward_symbol(mut self, reward_symbol: Symbol) -> Self {
        self.reward_symbol = reward_symbol;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Reject parameter sets the reward math cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.unit_scale == 0 {
            return Err(Error::InvalidParams("unit_scale must be greater than zero".into()));
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidParams("max_steps must be greater than zero".into()));
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(Error::InvalidParams(format!(
                "decay_rate must be finite and non-negative, got {}",
                self.decay_rate
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON parameter document.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: MarketParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read and validate a JSON parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Defaults overlaid with any `ONES_*` environment variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = lookup(ENV_FEE) {
            self.fee = parse_var(ENV_FEE, &v)?;
        }
        if let Some(v) = lookup(ENV_DECAY_RATE) {
            self.decay_rate = parse_var(ENV_DECAY_RATE, &v)?;
        }
        if let Some(v) = lookup(ENV_UNIT_SCALE) {
            self.unit_scale = parse_var(ENV_UNIT_SCALE, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_STEPS) {
            self.max_steps = parse_var(ENV_MAX_STEPS, &v)?;
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidParams(format!("{key}={value:?} is not a valid value")))
}
