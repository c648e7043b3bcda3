#![no_std]

use common::{has_role, Role};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage keys ────────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const CURRENT_FEE: Symbol = symbol_short!("CUR_FEE");

// ── Types ──────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeGateConfig {
    /// Registry answering role-membership queries.
    pub access_registry: Address,
    /// Token in which fees are paid.
    pub fee_token: Address,
    /// Destination for every collected payment.
    pub treasury: Address,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidFee = 4,
    InsufficientFee = 5,
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<FeeGateConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

// ── Contract ───────────────────────────────────────────────────────────────────

#[contract]
pub struct FeeGateContract;

#[contractimpl]
impl FeeGateContract {
    pub fn initialize(
        env: Env,
        access_registry: Address,
        fee_token: Address,
        treasury: Address,
        initial_fee: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        if initial_fee < 0 {
            return Err(ContractError::InvalidFee);
        }

        let cfg = FeeGateConfig {
            access_registry,
            fee_token,
            treasury,
        };
        env.storage().instance().set(&CONFIG, &cfg);
        env.storage().instance().set(&CURRENT_FEE, &initial_fee);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<FeeGateConfig, ContractError> {
        load_config(&env)
    }

    // ── Fee management ────────────────────────────────────────────────────────

    /// Amount of fee token required per fee-bearing action.
    pub fn fetch_current_fee(env: Env) -> i128 {
        env.storage().instance().get(&CURRENT_FEE).unwrap_or(0)
    }

    /// Overwrite the per-action fee. Operator-only.
    pub fn update_fee_amount(env: Env, caller: Address, new_fee: i128) -> Result<(), ContractError> {
        caller.require_auth();
        let cfg = load_config(&env)?;
        if !has_role(&env, &cfg.access_registry, &caller, Role::Operator) {
            return Err(ContractError::Unauthorized);
        }
        if new_fee < 0 {
            return Err(ContractError::InvalidFee);
        }

        env.storage().instance().set(&CURRENT_FEE, &new_fee);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("FEE_UPD"),),
            (new_fee, env.ledger().timestamp()),
        );

        Ok(())
    }

    // ── Collection ────────────────────────────────────────────────────────────

    /// Validate that `paid` covers `actions` fee-bearing actions, then move
    /// the full payment from `payer` to the treasury.
    ///
    /// The whole `paid` amount is forwarded: overpaying is allowed and the
    /// excess is retained by the treasury, never refunded.
    pub fn collect_fee(
        env: Env,
        payer: Address,
        paid: i128,
        actions: u32,
    ) -> Result<(), ContractError> {
        let cfg = load_config(&env)?;

        let fee = Self::fetch_current_fee(env.clone());
        let required = fee
            .checked_mul(actions as i128)
            .ok_or(ContractError::InvalidFee)?;
        if paid < required {
            return Err(ContractError::InsufficientFee);
        }

        if paid > 0 {
            token::Client::new(&env, &cfg.fee_token).transfer(&payer, &cfg.treasury, &paid);
        }

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("FEE_COLL"), payer),
            (paid, actions, env.ledger().timestamp()),
        );

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
