#![no_std]

pub mod events;

use common::{has_role, Role};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const PLATFORM: Symbol = symbol_short!("PLATFORM");
const REWARD_POOL: Symbol = symbol_short!("RWD_POOL");
const TOTAL_ESCROWED: Symbol = symbol_short!("TOT_ESC");

// Per-stake entries use tuple keys: (prefix, user, stake_id)
const ENTRY: Symbol = symbol_short!("ESC");

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowConfig {
    /// Registry answering role-membership queries.
    pub access_registry: Address,
    /// The staked token; also the token rewards are paid in.
    pub token: Address,
}

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientEscrow = 5,
    InsufficientRewardPool = 6,
    NoFundsToWithdraw = 7,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct EscrowContract;

#[contractimpl]
impl EscrowContract {
    /// Bootstrap the escrow. No platform is registered yet: `deposit` and
    /// `release` reject every caller until an Admin wires one in via
    /// `update_staking_platform`.
    pub fn initialize(
        env: Env,
        access_registry: Address,
        token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }

        let cfg = EscrowConfig {
            access_registry,
            token,
        };
        env.storage().instance().set(&CONFIG, &cfg);
        Ok(())
    }

    // ── Platform wiring ─────────────────────────────────────────────────────

    /// Swap the sole address allowed to move escrowed funds. Admin-only.
    /// The previous platform loses access the moment this returns.
    pub fn update_staking_platform(
        env: Env,
        caller: Address,
        new_platform: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let cfg = Self::load_config(&env)?;
        Self::require_admin(&env, &cfg, &caller)?;

        let old: Option<Address> = env.storage().instance().get(&PLATFORM);
        env.storage().instance().set(&PLATFORM, &new_platform);

        events::publish_platform_updated(&env, old, new_platform);

        Ok(())
    }

    // ── Custody ─────────────────────────────────────────────────────────────

    /// Pull `amount` staked tokens from `user` and record them under
    /// `(user, stake_id)`. Only the registered staking platform may call.
    pub fn deposit(
        env: Env,
        caller: Address,
        user: Address,
        stake_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let cfg = Self::load_config(&env)?;
        Self::require_platform(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // Pull the principal into custody; a failed transfer aborts the
        // whole invocation including the caller's state.
        token::Client::new(&env, &cfg.token).transfer(
            &user,
            &env.current_contract_address(),
            &amount,
        );

        env.storage()
            .persistent()
            .set(&entry_key(&user, stake_id), &amount);

        let total: i128 = env.storage().instance().get(&TOTAL_ESCROWED).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_ESCROWED, &(total + amount));

        events::publish_user_deposited(&env, user, stake_id, amount);

        Ok(())
    }

    /// Pay out `total_amount` (principal + reward) to `user` for
    /// `stake_id`, consuming the escrow entry and charging the reward pool
    /// for the difference. Only the registered staking platform may call.
    ///
    /// A reward pool too small to cover the reward portion is a hard
    /// failure — never a partial payout.
    pub fn release(
        env: Env,
        caller: Address,
        user: Address,
        stake_id: u64,
        total_amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let cfg = Self::load_config(&env)?;
        Self::require_platform(&env, &caller)?;

        let key = entry_key(&user, stake_id);
        let principal: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        if principal == 0 {
            return Err(ContractError::InsufficientEscrow);
        }
        if total_amount < principal {
            return Err(ContractError::InvalidAmount);
        }

        let reward = total_amount - principal;
        let pool: i128 = env.storage().instance().get(&REWARD_POOL).unwrap_or(0);
        if pool < reward {
            return Err(ContractError::InsufficientRewardPool);
        }

        // Consume the entry and charge the pool before any token moves, so
        // a re-entering caller finds the entry already empty.
        env.storage().persistent().remove(&key);
        env.storage().instance().set(&REWARD_POOL, &(pool - reward));
        let total: i128 = env.storage().instance().get(&TOTAL_ESCROWED).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_ESCROWED, &(total - principal));

        token::Client::new(&env, &cfg.token).transfer(
            &env.current_contract_address(),
            &user,
            &total_amount,
        );

        events::publish_user_withdrawn(&env, user, stake_id, total_amount);

        Ok(())
    }

    // ── Reward pool ─────────────────────────────────────────────────────────

    /// Pull `amount` tokens from the caller into the reward pool.
    /// Admin-only; this is how claims get funded.
    pub fn deposit_rewards(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        caller.require_auth();
        let cfg = Self::load_config(&env)?;
        Self::require_admin(&env, &cfg, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        token::Client::new(&env, &cfg.token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        let pool: i128 = env.storage().instance().get(&REWARD_POOL).unwrap_or(0);
        let new_pool = pool + amount;
        env.storage().instance().set(&REWARD_POOL, &new_pool);

        events::publish_rewards_replenished(&env, caller, amount, new_pool);

        Ok(())
    }

    // ── Recovery ────────────────────────────────────────────────────────────

    /// Sweep tokens that reached the contract outside the staking flow.
    /// Admin-only. For the staking token only the surplus above the
    /// accounted funds (escrow entries + reward pool) is sweepable, so the
    /// recovery path can never drain custody.
    pub fn recover_stuck_tokens(
        env: Env,
        caller: Address,
        token_addr: Address,
    ) -> Result<i128, ContractError> {
        caller.require_auth();
        let cfg = Self::load_config(&env)?;
        Self::require_admin(&env, &cfg, &caller)?;

        let client = token::Client::new(&env, &token_addr);
        let balance = client.balance(&env.current_contract_address());

        let recoverable = if token_addr == cfg.token {
            let total: i128 = env.storage().instance().get(&TOTAL_ESCROWED).unwrap_or(0);
            let pool: i128 = env.storage().instance().get(&REWARD_POOL).unwrap_or(0);
            balance - total - pool
        } else {
            balance
        };
        if recoverable <= 0 {
            return Err(ContractError::NoFundsToWithdraw);
        }

        client.transfer(&env.current_contract_address(), &caller, &recoverable);

        events::publish_tokens_recovered(&env, caller, token_addr, recoverable);

        Ok(recoverable)
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Principal held for `(user, stake_id)`; zero once released.
    pub fn get_escrow_entry(env: Env, user: Address, stake_id: u64) -> i128 {
        env.storage()
            .persistent()
            .get(&entry_key(&user, stake_id))
            .unwrap_or(0)
    }

    /// Funds available to pay rewards.
    pub fn get_reward_balance(env: Env) -> i128 {
        env.storage().instance().get(&REWARD_POOL).unwrap_or(0)
    }

    /// Sum of all live escrow entries.
    pub fn get_total_escrowed(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_ESCROWED).unwrap_or(0)
    }

    /// The currently registered staking platform, if any.
    pub fn get_staking_platform(env: Env) -> Option<Address> {
        env.storage().instance().get(&PLATFORM)
    }

    pub fn get_config(env: Env) -> Result<EscrowConfig, ContractError> {
        Self::load_config(&env)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<EscrowConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn require_admin(env: &Env, cfg: &EscrowConfig, caller: &Address) -> Result<(), ContractError> {
        if !has_role(env, &cfg.access_registry, caller, Role::Admin) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: the caller must be the registered staking platform. Rejects
    /// everyone while no platform is registered.
    fn require_platform(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let platform: Option<Address> = env.storage().instance().get(&PLATFORM);
        match platform {
            Some(p) if p == *caller => Ok(()),
            _ => Err(ContractError::Unauthorized),
        }
    }
}

fn entry_key(user: &Address, stake_id: u64) -> (Symbol, Address, u64) {
    (ENTRY, user.clone(), stake_id)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
