//! [`OnesClient`] — the main entry point for reserve and reward queries.

use crate::{
    error::{Error, Result},
    math::{compound_rewards, decayed_total, elapsed_seconds, step_count},
    params::MarketParams,
    store::{Clock, ConfigStore, PoolStore, SystemClock},
    types::{Asset, Ineligible, PoolInfo, RewardEstimate, Symbol},
};

// ─── Client ───────────────────────────────────────────────────────────────────

/// Read-only client over the liquidity table and global config.
///
/// Every call reads the store afresh; nothing is cached between calls.
///
/// ```rust
/// # use ones_swap_sdk::{Asset, ConfigRecord, FixedClock, OnesClient, Snapshot};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut snapshot = Snapshot::new();
/// snapshot.set_config(ConfigRecord::new(1_600_000_000, 1_000_000));
///
/// let client = OnesClient::new(snapshot).with_clock(FixedClock(1_600_000_000));
/// assert_eq!(client.get_fee(), 20);
///
/// // Unknown pairs earn nothing.
/// let eos: Asset = "1.0000 EOS".parse()?;
/// let usdt: Asset = "3.0000 USDT".parse()?;
/// let reward = client.get_rewards(7, &eos, &usdt)?;
/// assert!(reward.is_zero());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OnesClient<S, C = SystemClock> {
    store:  S,
    clock:  C,
    params: MarketParams,
}

impl<S> OnesClient<S, SystemClock>
where
    S: PoolStore + ConfigStore,
{
    /// Client over `store` with wall-clock time and default market params.
    pub fn new(store: S) -> Self {
        OnesClient { store, clock: SystemClock, params: MarketParams::default() }
    }
}

impl<S, C> OnesClient<S, C>
where
    S: PoolStore + ConfigStore,
    C: Clock,
{
    /// Replace the time source.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> OnesClient<S, C2> {
        OnesClient { store: self.store, clock, params: self.params }
    }

    /// Replace the deployment parameters after validating them.
    pub fn with_params(mut self, params: MarketParams) -> Result<Self> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    pub fn params(&self) -> &MarketParams {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Fees ──────────────────────────────────────────────────────────────────

    /// Total fee (trade + protocol) of this deployment.
    pub fn get_fee(&self) -> u8 {
        self.params.fee
    }

    // ── Reserves ──────────────────────────────────────────────────────────────

    /// Reserves of `pair_id`, ordered so the reserve in `sort` comes first.
    ///
    /// Fails with [`Error::NotFound`] for an unknown pair and
    /// [`Error::SymbolMismatch`] when `sort` is neither token of the pair.
    pub fn get_reserves(&self, pair_id: u64, sort: &Symbol) -> Result<(Asset, Asset)> {
        let pool = self.store.find_by_pair_id(pair_id).ok_or(Error::NotFound(pair_id))?;

        if pool.token1.symbol == *sort {
            Ok((pool.quantity1, pool.quantity2))
        } else if pool.token2.symbol == *sort {
            Ok((pool.quantity2, pool.quantity1))
        } else {
            Err(Error::SymbolMismatch { pair_id, symbol: sort.clone() })
        }
    }

    /// Pool tokens, reserves and spot price.
    pub fn pool_info(&self, pair_id: u64) -> Result<PoolInfo> {
        let pool = self.store.find_by_pair_id(pair_id).ok_or(Error::NotFound(pair_id))?;

        let base = pool.quantity1.to_display();
        let spot_price = if pool.quantity1.is_zero() {
            0.0
        } else {
            pool.quantity2.to_display() / base
        };

        Ok(PoolInfo {
            pair_id,
            token1:      pool.token1,
            token2:      pool.token2,
            reserve1:    pool.quantity1,
            reserve2:    pool.quantity2,
            spot_price,
            swap_weight: pool.swap_weight,
        })
    }

    // ── Rewards ───────────────────────────────────────────────────────────────

    /// Estimated swap-mining reward for trading `amount_in` for `amount_out`
    /// on `pair_id`, in the reward token.
    ///
    /// Trades without an anchor-token side, unknown pairs and zero-weight
    /// pairs earn a zero reward rather than an error.
    pub fn get_rewards(&self, pair_id: u64, amount_in: &Asset, amount_out: &Asset) -> Result<Asset> {
        Ok(self.simulate_rewards(pair_id, amount_in, amount_out)?.reward)
    }

    /// [`get_rewards`](Self::get_rewards) with the full breakdown.
    pub fn simulate_rewards(
        &self,
        pair_id:    u64,
        amount_in:  &Asset,
        amount_out: &Asset,
    ) -> Result<RewardEstimate> {
        let anchor = &self.params.anchor.symbol;
        let reward_symbol = &self.params.reward_symbol;

        // The anchor side drives the step count, whichever direction it trades.
        let anchor_side = if amount_in.symbol == *anchor {
            amount_in
        } else if amount_out.symbol == *anchor {
            amount_out
        } else {
            tracing::debug!(pair_id, %amount_in, %amount_out, "no anchor side; zero reward");
            return Ok(RewardEstimate::ineligible(
                pair_id,
                Ineligible::NoAnchorSide,
                reward_symbol.clone(),
            ));
        };
        let pool = match self.store.find_by_pair_id(pair_id) {
            Some(pool) if pool.is_reward_eligible() => pool,
            Some(_) => {
                return Ok(RewardEstimate::ineligible(
                    pair_id,
                    Ineligible::ZeroWeight,
                    reward_symbol.clone(),
                ))
            }
            None => {
                return Ok(RewardEstimate::ineligible(
                    pair_id,
                    Ineligible::UnknownPair,
                    reward_symbol.clone(),
                ))
            }
        };

        if anchor_side.amount < 0 {
            return Err(Error::InvalidArgument(format!(
                "anchor amount must be non-negative, got {anchor_side}"
            )));
        }

        let config = self.store.get_config().ok_or(Error::ConfigurationMissing)?;

        let steps = step_count(anchor_side.amount, self.params.unit_scale);
        if steps > self.params.max_steps {
            tracing::warn!(pair_id, steps, max = self.params.max_steps, "trade exceeds step bound");
            return Err(Error::TradeTooLarge { steps, max: self.params.max_steps });
        }

        let now = self.clock.unix_timestamp();
        if now < config.swap_time {
            tracing::warn!(
                now,
                swap_time = config.swap_time,
                "clock is behind swap_time; treating elapsed as 0"
            );
        }
        let elapsed = elapsed_seconds(now, config.swap_time);
        let total = decayed_total(
            config.swap_quantity,
            f64::from(pool.swap_weight),
            self.params.decay_rate,
            elapsed,
            self.params.unit_scale,
        );
        let compounded = compound_rewards(total, steps, self.params.unit_scale);
        let reward = i64::try_from(compounded.reward).map_err(|_| Error::MathOverflow)?;

        tracing::debug!(pair_id, elapsed, total = %total, steps, reward, "estimated swap reward");

        Ok(RewardEstimate {
            pair_id,
            ineligible:      None,
            elapsed_seconds: elapsed,
            total,
            steps,
            total_after:     compounded.total_after,
            reward:          Asset::new(reward, reward_symbol.clone()),
        })
    }
}
