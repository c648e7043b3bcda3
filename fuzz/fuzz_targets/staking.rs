#![no_main]

use arbitrary::Arbitrary;
use common::{Role, Tier};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking::{StakingPlatformContract, StakingPlatformContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u32, tier_seed: u8 },
    Claim { pick: u8 },
    BatchClaim { picks: Vec<u8> },
    AdvanceTime { secs: u32 },
    SetRate { tier_seed: u8, rate: u16 },
    Replenish { amount: u32 },
}

fn tier_from_u8(n: u8) -> Tier {
    match n % 5 {
        0 => Tier::OneDay,
        1 => Tier::OneWeek,
        2 => Tier::OneMonth,
        3 => Tier::SixMonth,
        _ => Tier::OneYear,
    }
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    // Deploy the whole suite; the fee is zero so sequences are not starved
    // by fee-token bookkeeping.
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
    let client = StakingPlatformContractClient::new(&env, &staking_id);
    client.initialize(&escrow_id, &rewards_id, &gate_id);
    escrow.update_staking_platform(&admin, &staking_id);

    let user = Address::generate(&env);

    // Call functions with arbitrary parameters to find unhandled panics
    // (e.g., overflow from missing math protection). After every action the
    // escrow's books must cover no more than the tokens it actually holds.
    let mut created: Vec<u64> = Vec::new();
    let mut now: u64 = 0;

    for action in actions {
        match action {
            FuzzAction::Stake { amount, tier_seed } => {
                let amount = amount as i128 + 1;
                StellarAssetClient::new(&env, &stake_token).mint(&user, &amount);
                if let Ok(Ok(id)) =
                    client.try_create_stake(&user, &amount, &tier_from_u8(tier_seed))
                {
                    created.push(id);
                }
            }
            FuzzAction::Claim { pick } => {
                if created.is_empty() {
                    continue;
                }
                let id = created[pick as usize % created.len()];
                let _ = client.try_claim(&user, &id, &0);
            }
            FuzzAction::BatchClaim { picks } => {
                if created.is_empty() || picks.is_empty() {
                    continue;
                }
                let mut ids = soroban_sdk::Vec::new(&env);
                for pick in picks {
                    ids.push_back(created[pick as usize % created.len()]);
                }
                let _ = client.try_batch_claim(&user, &ids, &0);
            }
            FuzzAction::AdvanceTime { secs } => {
                now = now.saturating_add(secs as u64);
                env.ledger().set_timestamp(now);
            }
            FuzzAction::SetRate { tier_seed, rate } => {
                let _ = rewards.try_set_reward_rate(
                    &operator,
                    &tier_from_u8(tier_seed),
                    &(rate as u32),
                );
            }
            FuzzAction::Replenish { amount } => {
                let amount = amount as i128 + 1;
                StellarAssetClient::new(&env, &stake_token).mint(&admin, &amount);
                let _ = escrow.try_deposit_rewards(&admin, &amount);
            }
        }

        let accounted = escrow.get_total_escrowed() + escrow.get_reward_balance();
        let held = TokenClient::new(&env, &stake_token).balance(&escrow_id);
        assert!(
            accounted <= held,
            "escrow accounts for {accounted} but holds {held}"
        );
    }
});
