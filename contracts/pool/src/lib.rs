#![no_std]

use common::{has_role, FeeGateClient, Role, StakingPlatformClient, Tier};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol,
};

// ── Storage keys ────────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

// ── Types ──────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Registry answering role-membership queries.
    pub access_registry: Address,
    /// The ledger this pool forwards stakes to.
    pub staking_platform: Address,
    /// Fee validator for stake actions.
    pub fee_gate: Address,
    /// The fixed duration tier of this pool instance.
    pub tier: Tier,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    AmountMustBeGreaterThanZero = 4,
    InsufficientFee = 5,
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

fn require_admin(env: &Env, cfg: &PoolConfig, caller: &Address) -> Result<(), ContractError> {
    if !has_role(env, &cfg.access_registry, caller, Role::Admin) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

// ── Contract ───────────────────────────────────────────────────────────────────

/// Duration-specific entry point into the staking platform.
///
/// One deployed instance per tier replaces a contract per duration: the tier
/// is configuration, and lock durations and rates hang off it elsewhere.
#[contract]
pub struct PoolContract;

#[contractimpl]
impl PoolContract {
    pub fn initialize(
        env: Env,
        access_registry: Address,
        staking_platform: Address,
        fee_gate: Address,
        tier: Tier,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }

        let cfg = PoolConfig {
            access_registry,
            staking_platform,
            fee_gate,
            tier,
        };
        env.storage().instance().set(&CONFIG, &cfg);
        Ok(())
    }

    // ── Staking ───────────────────────────────────────────────────────────────

    /// Lock `amount` in this pool's tier. `fee_paid` must cover the current
    /// fee; the whole payment is collected, excess included. Returns the
    /// stake ID allocated by the platform.
    pub fn stake(
        env: Env,
        user: Address,
        amount: i128,
        fee_paid: i128,
    ) -> Result<u64, ContractError> {
        user.require_auth();
        let cfg = load_config(&env)?;

        if amount <= 0 {
            return Err(ContractError::AmountMustBeGreaterThanZero);
        }

        let gate = FeeGateClient::new(&env, &cfg.fee_gate);
        if fee_paid < gate.fetch_current_fee() {
            return Err(ContractError::InsufficientFee);
        }
        gate.collect_fee(&user, &fee_paid, &1);

        let stake_id = StakingPlatformClient::new(&env, &cfg.staking_platform).create_stake(
            &user,
            &amount,
            &cfg.tier,
        );

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("POOL_STK"), user),
            (stake_id, amount, env.ledger().timestamp()),
        );

        Ok(stake_id)
    }

    // ── Rewiring ──────────────────────────────────────────────────────────────

    /// Point the pool at a different access registry. Admin-only, checked
    /// against the registry being replaced; effective immediately.
    pub fn update_admin_contract(
        env: Env,
        caller: Address,
        new_registry: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut cfg = load_config(&env)?;
        require_admin(&env, &cfg, &caller)?;

        cfg.access_registry = new_registry.clone();
        env.storage().instance().set(&CONFIG, &cfg);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("REG_UPD"),),
            (new_registry, env.ledger().timestamp()),
        );

        Ok(())
    }

    /// Point the pool at a different staking platform. Admin-only;
    /// subsequent stakes land on the new ledger.
    pub fn update_staking_platform(
        env: Env,
        caller: Address,
        new_platform: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut cfg = load_config(&env)?;
        require_admin(&env, &cfg, &caller)?;

        cfg.staking_platform = new_platform.clone();
        env.storage().instance().set(&CONFIG, &cfg);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("PLAT_UPD"),),
            (new_platform, env.ledger().timestamp()),
        );

        Ok(())
    }

    // ── View functions ────────────────────────────────────────────────────────

    /// The duration tier this pool stakes into.
    pub fn get_tier(env: Env) -> Result<Tier, ContractError> {
        Ok(load_config(&env)?.tier)
    }

    /// Seconds a stake made through this pool stays locked.
    pub fn get_lock_duration(env: Env) -> Result<u64, ContractError> {
        Ok(load_config(&env)?.tier.lock_duration())
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
