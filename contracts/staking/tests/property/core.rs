#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the stake ledger.
//!
//! Invariants tested:
//! - Stake IDs are always monotonically increasing (0, 1, 2…)
//! - `get_stake_data` returns exactly what `create_stake` stored
//! - `reward` is always `floor(amount * rate / 100)` for any amount and rate
//! - The per-tier indexes partition the owner's global index

use common::{Role, Tier};
use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{token::StellarAssetClient, Address, Env};
use staking::{StakingPlatformContract, StakingPlatformContractClient};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Fixture {
    env: Env,
    staking: StakingPlatformContractClient<'static>,
    rewards: rewards::RewardRateContractClient<'static>,
    operator: Address,
    user: Address,
    stake_token: Address,
}

/// Deploys the whole suite with a zero fee and no rates set; individual
/// properties pick their own rates.
fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let registry_id = env.register(access_registry::AccessRegistryContract, ());
    let registry = access_registry::AccessRegistryContractClient::new(&env, &registry_id);
    let admin = Address::generate(&env);
    registry.initialize(&admin);
    let operator = Address::generate(&env);
    registry.grant_role(&admin, &operator, &Role::Operator);

    let rewards_id = env.register(rewards::RewardRateContract, ());
    let rewards = rewards::RewardRateContractClient::new(&env, &rewards_id);
    rewards.initialize(&registry_id);

    let treasury_id = env.register(fee_treasury::FeeTreasuryContract, ());
    fee_treasury::FeeTreasuryContractClient::new(&env, &treasury_id)
        .initialize(&registry_id, &fee_token);

    let gate_id = env.register(fee_gate::FeeGateContract, ());
    fee_gate::FeeGateContractClient::new(&env, &gate_id).initialize(
        &registry_id,
        &fee_token,
        &treasury_id,
        &0,
    );

    let escrow_id = env.register(escrow::EscrowContract, ());
    let escrow = escrow::EscrowContractClient::new(&env, &escrow_id);
    escrow.initialize(&registry_id, &stake_token);

    let staking_id = env.register(StakingPlatformContract, ());
    let staking = StakingPlatformContractClient::new(&env, &staking_id);
    staking.initialize(&escrow_id, &rewards_id, &gate_id);
    escrow.update_staking_platform(&admin, &staking_id);

    Fixture {
        env,
        staking,
        rewards,
        operator,
        user: Address::generate(&env),
        stake_token,
    }
}

fn mint(f: &Fixture, to: &Address, amount: i128) {
    StellarAssetClient::new(&f.env, &f.stake_token).mint(to, &amount);
}

/// Map a u8 to one of the five `Tier` variants so proptest can generate them.
fn tier_from_u8(n: u8) -> Tier {
    match n % 5 {
        0 => Tier::OneDay,
        1 => Tier::OneWeek,
        2 => Tier::OneMonth,
        3 => Tier::SixMonth,
        _ => Tier::OneYear,
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// For any number of stakes created (1–8), the returned IDs must be 0, 1, …, N-1.
    #[test]
    fn prop_stake_id_monotonic(n_stakes in 1usize..=8usize) {
        let f = setup();
        mint(&f, &f.user, n_stakes as i128 * 100);

        for expected_id in 0..(n_stakes as u64) {
            let id = f.staking.create_stake(&f.user, &100, &Tier::OneDay);
            prop_assert_eq!(id, expected_id);
        }
        prop_assert_eq!(f.staking.get_stake_count(), n_stakes as u64);
    }

    /// `get_stake_data` must return exactly the owner, amount, and tier that
    /// was staked, with `claimed` false and `created_at` the ledger time.
    #[test]
    fn prop_get_stake_data_matches_store(amount in 1i128..=1_000_000i128, tier_seed in 0u8..=255u8) {
        let f = setup();
        mint(&f, &f.user, amount);
        let tier = tier_from_u8(tier_seed);

        let id = f.staking.create_stake(&f.user, &amount, &tier);
        let stake = f.staking.get_stake_data(&id);

        prop_assert_eq!(stake.id, id);
        prop_assert_eq!(stake.owner, f.user.clone());
        prop_assert_eq!(stake.amount, amount);
        prop_assert_eq!(stake.tier, tier);
        prop_assert!(!stake.claimed);
    }

    /// The frozen reward is floor(amount * rate / 100) for any rate an
    /// Operator might set — remainders drop, they never round up.
    #[test]
    fn prop_reward_is_floor_of_rate(amount in 1i128..=1_000_000_000_000i128, rate in 0u32..=300u32) {
        let f = setup();
        f.rewards.set_reward_rate(&f.operator, &Tier::OneWeek, &rate);
        mint(&f, &f.user, amount);

        let id = f.staking.create_stake(&f.user, &amount, &Tier::OneWeek);
        let stake = f.staking.get_stake_data(&id);

        prop_assert_eq!(stake.reward, amount * rate as i128 / 100);
        prop_assert!(stake.reward <= amount * rate as i128 / 100);
    }

    /// Every created stake ID shows up in the owner's global index and in
    /// exactly the per-tier index matching its tier.
    #[test]
    fn prop_tier_indexes_partition_global(tier_seeds in proptest::collection::vec(0u8..=4u8, 1..=10)) {
        let f = setup();
        mint(&f, &f.user, tier_seeds.len() as i128 * 100);

        let mut ids_by_tier: std::vec::Vec<(Tier, u64)> = std::vec::Vec::new();
        for seed in &tier_seeds {
            let tier = tier_from_u8(*seed);
            let id = f.staking.create_stake(&f.user, &100, &tier);
            ids_by_tier.push((tier, id));
        }

        let global = f.staking.get_user_stake_ids(&f.user);
        prop_assert_eq!(global.len() as usize, ids_by_tier.len());

        let mut in_pools = 0usize;
        for seed in 0u8..5 {
            let tier = tier_from_u8(seed);
            let pool = f.staking.get_user_stake_ids_in_pool(&f.user, &tier);
            in_pools += pool.len() as usize;
            for id in pool.iter() {
                prop_assert!(
                    ids_by_tier.contains(&(tier.clone(), id)),
                    "stake {} indexed under the wrong tier",
                    id
                );
                prop_assert!(global.contains(&id));
            }
        }
        prop_assert_eq!(in_pools, ids_by_tier.len());
    }
}
