//! End-to-end query tests through the public API, including property tests
//! for reserve ordering and reward monotonicity.

use std::cell::{Cell, RefCell};

use ones_swap_sdk::math::CompoundingSteps;
use ones_swap_sdk::{
    Asset, ConfigRecord, ConfigStore, Error, ExtendedSymbol, FixedClock, MarketParams, OnesClient,
    PoolRecord, PoolStore, Snapshot, Symbol,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const RESET: i64 = 1_600_000_000;

fn sym(s: &str) -> Symbol {
    s.parse().expect("valid symbol")
}

fn token(contract: &str, symbol: &str) -> ExtendedSymbol {
    ExtendedSymbol::new(contract.parse().expect("valid name"), sym(symbol))
}

fn pool(pair_id: u64, q1: i64, q2: i64, swap_weight: f32) -> PoolRecord {
    PoolRecord {
        pair_id,
        token1: token("eosio.token", "4,EOS"),
        token2: token("tethertether", "4,USDT"),
        quantity1: Asset::new(q1, sym("4,EOS")),
        quantity2: Asset::new(q2, sym("4,USDT")),
        liquidity_token: 0,
        price1: 0.0,
        price2: 0.0,
        cumulative1: 0,
        cumulative2: 0,
        swap_weight,
        liquidity_weight: 1.0,
        timestamp: 0,
    }
}

fn eos(amount: i64) -> Asset {
    Asset::new(amount, sym("4,EOS"))
}

fn usdt(amount: i64) -> Asset {
    Asset::new(amount, sym("4,USDT"))
}

fn client(
    pools: Vec<PoolRecord>,
    swap_quantity: u64,
    now: i64,
) -> OnesClient<Snapshot, FixedClock> {
    let snapshot = Snapshot::from_records(pools, Some(ConfigRecord::new(RESET, swap_quantity)))
        .expect("valid snapshot");
    OnesClient::new(snapshot).with_clock(FixedClock(now))
}

/// A live store whose contents change between calls and which counts reads.
#[derive(Default)]
struct LiveStore {
    pool:   RefCell<Option<PoolRecord>>,
    config: RefCell<Option<ConfigRecord>>,
    reads:  Cell<usize>,
}

impl PoolStore for LiveStore {
    fn find_by_pair_id(&self, pair_id: u64) -> Option<PoolRecord> {
        self.reads.set(self.reads.get() + 1);
        self.pool.borrow().clone().filter(|p| p.pair_id == pair_id)
    }
}

impl ConfigStore for LiveStore {
    fn get_config(&self) -> Option<ConfigRecord> {
        self.config.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn reference_reward_scenarios() {
    let c = client(vec![pool(1, 1_000_000, 3_000_000, 1.0)], 1_000_000, RESET);

    let one = c.simulate_rewards(1, &eos(10_000), &usdt(29_000)).expect("estimate");
    assert_eq!(one.total, 1_000_000);
    assert_eq!(one.steps, 1);
    assert_eq!(one.reward, Asset::new(100, sym("4,ONES")));

    let two = c.simulate_rewards(1, &eos(20_000), &usdt(58_000)).expect("estimate");
    assert_eq!(two.steps, 2);
    assert_eq!(two.total_after, 999_801);
    assert_eq!(two.reward.amount, 199);

    let none = c.get_rewards(1, &eos(0), &usdt(0)).expect("estimate");
    assert!(none.is_zero());
}

#[test]
fn store_is_read_on_every_call() {
    let store = LiveStore::default();
    *store.config.borrow_mut() = Some(ConfigRecord::new(RESET, 1_000_000));
    let c = OnesClient::new(&store).with_clock(FixedClock(RESET));

    assert!(matches!(c.get_reserves(1, &sym("4,EOS")), Err(Error::NotFound(1))));

    *store.pool.borrow_mut() = Some(pool(1, 5, 7, 1.0));
    let (r0, _) = c.get_reserves(1, &sym("4,EOS")).expect("reserves");
    assert_eq!(r0, eos(5));

    *store.pool.borrow_mut() = Some(pool(1, 11, 7, 0.0));
    let (r0, _) = c.get_reserves(1, &sym("4,EOS")).expect("reserves");
    assert_eq!(r0, eos(11));
    assert!(c.get_rewards(1, &eos(10_000), &usdt(1)).expect("estimate").is_zero());

    assert_eq!(store.reads.get(), 4);
}

#[test]
fn deployment_params_change_the_estimate() {
    let c = client(vec![pool(1, 1, 1, 1.0)], 1_000_000, RESET)
        .with_params(MarketParams::default().with_unit_scale(100).with_fee(30))
        .expect("valid params");
    // one step per 100 raw units, each claiming 1% of the pool
    let r = c.get_rewards(1, &eos(200), &usdt(1)).expect("estimate");
    assert_eq!(r.amount, 10_000 + 9_900);
    assert_eq!(c.get_fee(), 30);
}

#[test]
fn snapshot_file_round_trip() {
    let path = std::env::temp_dir().join(format!("ones-snapshot-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{
            "pools": [{
                "pair_id": 12,
                "token1": { "contract": "tethertether", "symbol": "4,USDT" },
                "token2": { "contract": "eosio.token", "symbol": "4,EOS" },
                "quantity1": "13614.8381 USDT",
                "quantity2": "4638.5353 EOS",
                "liquidity_token": 1, "price1": 0.34, "price2": 2.93,
                "cumulative1": 0, "cumulative2": 0,
                "swap_weight": 0.5, "liquidity_weight": 0.5, "timestamp": 1600000000
            }],
            "config": { "swap_time": 1600000000, "swap_quantity": 2000000, "swap_issue": 7 }
        }"#,
    )
    .expect("write snapshot");

    let snapshot = Snapshot::load(&path).expect("load snapshot");
    std::fs::remove_file(&path).ok();

    let c = OnesClient::new(snapshot).with_clock(FixedClock(RESET));
    let (r0, r1) = c.get_reserves(12, &sym("4,EOS")).expect("reserves");
    assert_eq!(r0.to_string(), "4638.5353 EOS");
    assert_eq!(r1.to_string(), "13614.8381 USDT");

    let r = c.get_rewards(12, &eos(10_000), &usdt(1)).expect("estimate");
    assert_eq!(r.to_string(), "0.0200 ONES");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reserves_put_requested_symbol_first(
        q1 in 0i64..1_000_000_000_000,
        q2 in 0i64..1_000_000_000_000,
        sort_by_second in any::<bool>(),
    ) {
        let c = client(vec![pool(1, q1, q2, 1.0)], 0, RESET);
        let sort = if sort_by_second { sym("4,USDT") } else { sym("4,EOS") };
        let (first, second) = c.get_reserves(1, &sort).expect("reserves");
        prop_assert_eq!(&first.symbol, &sort);
        let mut got = vec![first, second];
        let mut want = vec![eos(q1), usdt(q2)];
        got.sort_by_key(|a| a.to_string());
        want.sort_by_key(|a| a.to_string());
        prop_assert_eq!(got, want);
    }

    #[test]
    fn reserves_reject_foreign_symbols(precision in 0u8..=18, code in "[A-Z]{1,7}") {
        let sort = Symbol::new(precision, code.parse().expect("code")).expect("symbol");
        prop_assume!(sort != sym("4,EOS") && sort != sym("4,USDT"));
        let c = client(vec![pool(1, 1, 1, 1.0)], 0, RESET);
        let is_mismatch = matches!(
            c.get_reserves(1, &sort),
            Err(Error::SymbolMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }

    #[test]
    fn reserves_unknown_pair_not_found(pair_id in 2u64..u64::MAX) {
        let c = client(vec![pool(1, 1, 1, 1.0)], 0, RESET);
        let is_not_found = matches!(
            c.get_reserves(pair_id, &sym("4,EOS")),
            Err(Error::NotFound(id)) if id == pair_id
        );
        prop_assert!(is_not_found);
    }

    #[test]
    fn no_anchor_side_never_rewards(a in any::<i64>(), b in any::<i64>()) {
        let c = client(vec![pool(1, 1, 1, 1.0)], 1_000_000, RESET);
        let box_amount = Asset::new(a, sym("6,BOX"));
        let r = c.get_rewards(1, &box_amount, &usdt(b)).expect("estimate");
        prop_assert!(r.is_zero());
        prop_assert_eq!(r.symbol, sym("4,ONES"));
    }

    #[test]
    fn ineligible_pairs_never_reward(a in any::<i64>(), idle in any::<bool>()) {
        let c = client(vec![pool(1, 1, 1, 0.0)], 1_000_000, RESET);
        let pair_id = if idle { 1 } else { 2 };
        let r = c.get_rewards(pair_id, &eos(a), &usdt(1)).expect("estimate");
        prop_assert!(r.is_zero());
    }

    #[test]
    fn rewards_non_decreasing_in_amount(
        small in 0i64..5_000_000,
        extra in 0i64..5_000_000,
        swap_quantity in 0u64..10_000_000_000,
        elapsed in 0i64..1_000_000,
        weight in 0.01f32..4.0,
    ) {
        let c = client(vec![pool(1, 1, 1, weight)], swap_quantity, RESET + elapsed);
        let lo = c.get_rewards(1, &eos(small), &usdt(1)).expect("estimate");
        let hi = c.get_rewards(1, &eos(small + extra), &usdt(1)).expect("estimate");
        prop_assert!(lo.amount <= hi.amount);
    }

    #[test]
    fn per_step_claims_non_increasing(total in 0u128..1_000_000_000_000, steps in 0u64..2_000) {
        let mined: Vec<u128> = CompoundingSteps::new(total, steps, 10_000).collect();
        prop_assert_eq!(mined.len() as u64, steps);
        prop_assert!(mined.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(mined.iter().sum::<u128>() <= total);
    }
}
