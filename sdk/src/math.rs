//! Swap-mining reward math.
//!
//! Pure functions over pre-fetched pool/config values; no store access here.
//!
//! A trade is quantized into `floor(amount_in / unit_scale)` compounding
//! steps. Each step claims `1 / unit_scale` of what is left of the decayed
//! reward pool:
//!
//! ```text
//! total  = swap_quantity + swap_weight * decay_rate * elapsed * unit_scale
//! repeat steps times:
//!     mined   = floor(total / unit_scale)
//!     total  -= mined
//!     reward += mined
//! ```
//!
//! `total` is floored to an integer once, before the loop. For a positive
//! integer divisor `floor(floor(t) / s) == floor(t / s)`, and every later
//! `total` differs from the first by whole units, so the integer loop matches
//! the same loop run in floating point.

// ─── Time decay ───────────────────────────────────────────────────────────────

/// Seconds since the last swap-mining reset, clamped at zero.
pub fn elapsed_seconds(now: i64, swap_time: i64) -> f64 {
    now.saturating_sub(swap_time).max(0) as f64
}

/// Reward pool size at the moment of the trade, floored to whole units.
///
/// Evaluated in `f64`; a negative or NaN result is 0 and values beyond
/// `u128::MAX` saturate.
pub fn decayed_total(
    swap_quantity: u64,
    swap_weight:   f64,
    decay_rate:    f64,
    elapsed:       f64,
    unit_scale:    u64,
) -> u128 {
    let total = swap_quantity as f64 + swap_weight * decay_rate * elapsed * unit_scale as f64;
    // `as` from f64 saturates at the bounds and maps NaN to 0.
    total.floor() as u128
}

// ─── Compounding ──────────────────────────────────────────────────────────────

/// Number of compounding steps a trade of `amount` raw units represents.
///
/// `unit_scale` must be non-zero; negative amounts yield no steps.
pub fn step_count(amount: i64, unit_scale: u64) -> u64 {
    u64::try_from(amount).map_or(0, |a| a / unit_scale)
}

/// Per-step claims against a shrinking pool.
///
/// Yields `mined` for each step in order. Values are non-increasing because
/// each step divides a smaller `total`.
#[derive(Debug, Clone)]
pub struct CompoundingSteps {
    total:      u128,
    remaining:  u64,
    unit_scale: u128,
}

impl CompoundingSteps {
    /// `unit_scale` must be non-zero.
    pub fn new(total: u128, steps: u64, unit_scale: u64) -> Self {
        CompoundingSteps { total, remaining: steps, unit_scale: u128::from(unit_scale) }
    }

    /// Pool size after the steps taken so far.
    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for CompoundingSteps {
    type Item = u128;

    fn next(&mut self) -> Option<u128> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let mined = self.total / self.unit_scale;
        self.total -= mined;
        Some(mined)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

/// Outcome of running the compounding loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compounded {
    /// Sum of every step's `mined`.
    pub reward:      u128,
    /// Pool size left after the last step.
    pub total_after: u128,
}

/// Fold `steps` compounding steps over `total`.
///
/// Once a step mines zero the pool stops shrinking, so every later step also
/// mines zero and the fold ends early.
pub fn compound_rewards(total: u128, steps: u64, unit_scale: u64) -> Compounded {
    let mut iter = CompoundingSteps::new(total, steps, unit_scale);
    let mut reward: u128 = 0;
    for mined in iter.by_ref() {
        if mined == 0 {
            break;
        }
        reward += mined;
    }
    Compounded { reward, total_after: iter.total() }
}
