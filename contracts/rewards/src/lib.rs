#![no_std]

use common::{has_role, Role, Tier};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");

// Per-tier rates use tuple keys: (prefix, tier)
const RATE: Symbol = symbol_short!("RATE");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    RewardOverflow = 4,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardRateContract;

#[contractimpl]
impl RewardRateContract {
    /// Bootstrap the rate manager. All tier rates start at zero until an
    /// Operator sets them.
    pub fn initialize(env: Env, access_registry: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REGISTRY, &access_registry);

        Ok(())
    }

    // ── Rate management ─────────────────────────────────────────────────────

    /// Overwrite the reward percentage for `tier`.
    ///
    /// Operator-only. The rate is applied to stakes created *after* this
    /// call; existing stakes keep the reward frozen at their creation time.
    /// No upper bound is enforced — the Operator is trusted with the
    /// economics, only overflow is guarded downstream.
    pub fn set_reward_rate(
        env: Env,
        caller: Address,
        tier: Tier,
        rate: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let registry: Address = env
            .storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(ContractError::NotInitialized)?;
        if !has_role(&env, &registry, &caller, Role::Operator) {
            return Err(ContractError::Unauthorized);
        }

        env.storage().persistent().set(&rate_key(&tier), &rate);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("RATE_UPD"), tier),
            (rate, env.ledger().timestamp()),
        );

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Current reward percentage for `tier`; zero if never set.
    pub fn get_reward_rate(env: Env, tier: Tier) -> u32 {
        env.storage().persistent().get(&rate_key(&tier)).unwrap_or(0)
    }

    /// `amount * rate(tier) / 100` with floor division.
    ///
    /// Fractional remainders are dropped, never rounded up, so the result
    /// is deterministic for any `(amount, tier, rate)` triple.
    pub fn compute_reward(env: Env, amount: i128, tier: Tier) -> Result<i128, ContractError> {
        let rate = Self::get_reward_rate(env, tier);
        amount
            .checked_mul(rate as i128)
            .map(|scaled| scaled / 100)
            .ok_or(ContractError::RewardOverflow)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }
}

fn rate_key(tier: &Tier) -> (Symbol, Tier) {
    (RATE, tier.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
