#![no_std]

pub mod events;
pub mod stakes;

use common::{EscrowClient, FeeGateClient, RewardRateClient, Tier};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec,
};

use stakes::Stake;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformConfig {
    /// Custodian of principal and the reward pool.
    pub escrow: Address,
    /// Per-tier reward-rate manager.
    pub rewards: Address,
    /// Fee validator for claim actions.
    pub fee_gate: Address,
}

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    StakeNotFound = 4,
    NotOwner = 5,
    AlreadyClaimed = 6,
    LockNotElapsed = 7,
    InsufficientFee = 8,
    EmptyBatch = 9,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPlatformContract;

#[contractimpl]
impl StakingPlatformContract {
    /// Bootstrap the ledger with its collaborator addresses.
    ///
    /// The escrow must separately register this contract as its platform
    /// before `create_stake` can move funds.
    pub fn initialize(
        env: Env,
        escrow: Address,
        rewards: Address,
        fee_gate: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }

        let cfg = PlatformConfig {
            escrow,
            rewards,
            fee_gate,
        };
        env.storage().instance().set(&CONFIG, &cfg);
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` tokens for `user` under `tier` and return the new
    /// stake's ID.
    ///
    /// The reward is computed from the tier's rate *now* and frozen into
    /// the record; rate changes after this call do not affect it. The
    /// escrow pulls the principal last — if that transfer fails the whole
    /// invocation reverts and no stake exists.
    pub fn create_stake(
        env: Env,
        user: Address,
        amount: i128,
        tier: Tier,
    ) -> Result<u64, ContractError> {
        user.require_auth();
        let cfg = Self::load_config(&env)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let reward = RewardRateClient::new(&env, &cfg.rewards).compute_reward(&amount, &tier);

        let stake = Stake {
            id: stakes::next_stake_id(&env),
            owner: user.clone(),
            amount,
            tier,
            reward,
            created_at: env.ledger().timestamp(),
            claimed: false,
        };
        stakes::store_stake(&env, &stake);
        stakes::append_to_indexes(&env, &stake);

        EscrowClient::new(&env, &cfg.escrow).deposit(
            &env.current_contract_address(),
            &user,
            &stake.id,
            &amount,
        );

        events::publish_stake_created(&env, &stake);

        Ok(stake.id)
    }

    // ── Claiming ────────────────────────────────────────────────────────────

    /// Release principal + reward for `stake_id` to its owner.
    ///
    /// Precondition chain: the stake must exist, belong to `user`, be
    /// unclaimed, and its lock must have elapsed (a claim at exactly the
    /// unlock instant succeeds). `fee_paid` must cover the current fee;
    /// any excess is collected and retained, never refunded.
    ///
    /// The claimed flag and index removal are written before the fee
    /// collection and escrow release, so a re-entering call finds the
    /// stake already claimed.
    pub fn claim(
        env: Env,
        user: Address,
        stake_id: u64,
        fee_paid: i128,
    ) -> Result<(), ContractError> {
        user.require_auth();
        let cfg = Self::load_config(&env)?;

        let mut stake = stakes::get_stake(&env, stake_id).ok_or(ContractError::StakeNotFound)?;
        Self::check_claimable(&stake, &user, env.ledger().timestamp())?;

        let gate = FeeGateClient::new(&env, &cfg.fee_gate);
        if fee_paid < gate.fetch_current_fee() {
            return Err(ContractError::InsufficientFee);
        }

        // Effects before any external fund movement.
        stake.claimed = true;
        stakes::store_stake(&env, &stake);
        stakes::remove_from_tier_index(&env, &user, &stake.tier, stake_id);

        gate.collect_fee(&user, &fee_paid, &1);

        let payout = stake.amount + stake.reward;
        EscrowClient::new(&env, &cfg.escrow).release(
            &env.current_contract_address(),
            &user,
            &stake_id,
            &payout,
        );

        events::publish_stake_claimed(&env, stake_id, user, payout);

        Ok(())
    }

    /// Claim several stakes in one call.
    ///
    /// Each ID goes through the full `claim` precondition chain in the
    /// given order; any violation reverts the entire batch, so no partial
    /// claims are observable. The fee is validated once against
    /// `current_fee × stake_ids.len()`. A duplicate ID inside the batch
    /// trips the `AlreadyClaimed` check on its second occurrence.
    pub fn batch_claim(
        env: Env,
        user: Address,
        stake_ids: Vec<u64>,
        fee_paid: i128,
    ) -> Result<(), ContractError> {
        user.require_auth();
        let cfg = Self::load_config(&env)?;

        if stake_ids.is_empty() {
            return Err(ContractError::EmptyBatch);
        }

        let gate = FeeGateClient::new(&env, &cfg.fee_gate);
        let required = gate
            .fetch_current_fee()
            .saturating_mul(stake_ids.len() as i128);
        if fee_paid < required {
            return Err(ContractError::InsufficientFee);
        }

        // Validate and mark every stake before moving any funds.
        let now = env.ledger().timestamp();
        let mut payouts: Vec<(u64, i128)> = Vec::new(&env);
        for stake_id in stake_ids.iter() {
            let mut stake =
                stakes::get_stake(&env, stake_id).ok_or(ContractError::StakeNotFound)?;
            Self::check_claimable(&stake, &user, now)?;

            stake.claimed = true;
            stakes::store_stake(&env, &stake);
            stakes::remove_from_tier_index(&env, &user, &stake.tier, stake_id);
            payouts.push_back((stake_id, stake.amount + stake.reward));
        }

        gate.collect_fee(&user, &fee_paid, &(stake_ids.len()));

        let escrow = EscrowClient::new(&env, &cfg.escrow);
        for (stake_id, payout) in payouts.iter() {
            escrow.release(&env.current_contract_address(), &user, &stake_id, &payout);
            events::publish_stake_claimed(&env, stake_id, user.clone(), payout);
        }

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// The full record for `stake_id`, claimed or not.
    pub fn get_stake_data(env: Env, stake_id: u64) -> Result<Stake, ContractError> {
        stakes::get_stake(&env, stake_id).ok_or(ContractError::StakeNotFound)
    }

    /// Every stake ID the user has ever created. Claimed stakes stay here.
    pub fn get_user_stake_ids(env: Env, user: Address) -> Vec<u64> {
        stakes::user_stake_ids(&env, &user)
    }

    /// The user's unclaimed stake IDs within `tier`.
    pub fn get_user_stake_ids_in_pool(env: Env, user: Address, tier: Tier) -> Vec<u64> {
        stakes::user_stake_ids_in_tier(&env, &user, &tier)
    }

    /// Number of stakes ever created; also the next ID to be allocated.
    pub fn get_stake_count(env: Env) -> u64 {
        stakes::stake_count(&env)
    }

    pub fn get_config(env: Env) -> Result<PlatformConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<PlatformConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    /// Ownership, claim-state, and lock checks shared by `claim` and
    /// `batch_claim`. The lock boundary is inclusive.
    fn check_claimable(stake: &Stake, user: &Address, now: u64) -> Result<(), ContractError> {
        if stake.owner != *user {
            return Err(ContractError::NotOwner);
        }
        if stake.claimed {
            return Err(ContractError::AlreadyClaimed);
        }
        if now < stake.unlock_at() {
            return Err(ContractError::LockNotElapsed);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
