//! Ones swap Rust SDK
//!
//! Read-only queries over the Ones liquidity table: sorted pair reserves,
//! the deployment's fee total, and swap-mining reward estimates computed
//! against the time-decayed reward pool. Nothing here writes state or moves
//! funds; every call is a point-in-time read of whatever the store holds.
//!
//! # Quick Start
//!
//! ```rust
//! use ones_swap_sdk::{Asset, FixedClock, OnesClient, Snapshot, Symbol};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = Snapshot::from_json(r#"{
//!         "pools": [{
//!             "pair_id": 1,
//!             "token1": { "contract": "eosio.token", "symbol": "4,EOS" },
//!             "token2": { "contract": "tethertether", "symbol": "4,USDT" },
//!             "quantity1": "4638.5353 EOS",
//!             "quantity2": "13614.8381 USDT",
//!             "liquidity_token": 0, "price1": 0.0, "price2": 0.0,
//!             "cumulative1": 0, "cumulative2": 0,
//!             "swap_weight": 1.0, "liquidity_weight": 1.0, "timestamp": 0
//!         }],
//!         "config": { "swap_time": 1600000000, "swap_quantity": 1000000 }
//!     }"#)?;
//!     let client = OnesClient::new(snapshot).with_clock(FixedClock(1_600_000_000));
//!
//!     // 1. Reserves, USDT first
//!     let usdt: Symbol = "4,USDT".parse()?;
//!     let (reserve0, reserve1) = client.get_reserves(1, &usdt)?;
//!     assert_eq!(reserve0.to_string(), "13614.8381 USDT");
//!     assert_eq!(reserve1.to_string(), "4638.5353 EOS");
//!
//!     // 2. Reward for selling 2 EOS
//!     let amount_in: Asset = "2.0000 EOS".parse()?;
//!     let amount_out: Asset = "5.8000 USDT".parse()?;
//!     let reward = client.get_rewards(1, &amount_in, &amount_out)?;
//!     assert_eq!(reward.to_string(), "0.0199 ONES");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`OnesClient::get_reserves`] | Pair reserves, requested token first |
//! | [`OnesClient::get_rewards`] | Estimated swap-mining reward for a trade |
//! | [`OnesClient::simulate_rewards`] | Reward estimate with decay/step breakdown |
//! | [`OnesClient::get_fee`] | Total fee of the deployment |
//! | [`OnesClient::pool_info`] | Tokens, reserves and spot price |

pub mod client;
pub mod error;
pub mod math;
pub mod params;
pub mod state;
pub mod store;
pub mod types;

pub use client::OnesClient;
pub use error::{Error, Result};
pub use params::MarketParams;
pub use state::{ConfigRecord, PoolRecord};
pub use store::{Clock, ConfigStore, FixedClock, PoolStore, Snapshot, SystemClock};
pub use types::*;
