#![no_std]

use common::{has_role, Role};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage keys ────────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

// ── Types ──────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryConfig {
    /// Registry answering role-membership queries.
    pub access_registry: Address,
    /// Token in which fees are collected.
    pub fee_token: Address,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    NoFeesToWithdraw = 4,
    NoFundsToWithdraw = 5,
    FeeTokenNotRecoverable = 6,
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<TreasuryConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

fn require_admin(env: &Env, cfg: &TreasuryConfig, caller: &Address) -> Result<(), ContractError> {
    if !has_role(env, &cfg.access_registry, caller, Role::Admin) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

// ── Contract ───────────────────────────────────────────────────────────────────

#[contract]
pub struct FeeTreasuryContract;

#[contractimpl]
impl FeeTreasuryContract {
    /// Initialise the treasury. Fees arrive as plain `fee_token` transfers
    /// from the fee gate; the treasury itself has no collection entry point.
    pub fn initialize(
        env: Env,
        access_registry: Address,
        fee_token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }

        let cfg = TreasuryConfig {
            access_registry,
            fee_token,
        };
        env.storage().instance().set(&CONFIG, &cfg);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<TreasuryConfig, ContractError> {
        load_config(&env)
    }

    // ── Withdrawals ───────────────────────────────────────────────────────────

    /// Transfer the full accumulated fee balance to the caller. Admin-only.
    pub fn withdraw_accumulated_fees(env: Env, caller: Address) -> Result<i128, ContractError> {
        caller.require_auth();
        let cfg = load_config(&env)?;
        require_admin(&env, &cfg, &caller)?;

        let fee_client = token::Client::new(&env, &cfg.fee_token);
        let balance = fee_client.balance(&env.current_contract_address());
        if balance <= 0 {
            return Err(ContractError::NoFeesToWithdraw);
        }

        fee_client.transfer(&env.current_contract_address(), &caller, &balance);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("FEES_WDRN"), caller),
            (balance, env.ledger().timestamp()),
        );

        Ok(balance)
    }

    /// Sweep the full balance of a token that was sent to the treasury
    /// outside the fee flow. The fee token itself is excluded — that balance
    /// leaves only through `withdraw_accumulated_fees`.
    pub fn recover_stuck_tokens(
        env: Env,
        caller: Address,
        token_addr: Address,
    ) -> Result<i128, ContractError> {
        caller.require_auth();
        let cfg = load_config(&env)?;
        require_admin(&env, &cfg, &caller)?;

        if token_addr == cfg.fee_token {
            return Err(ContractError::FeeTokenNotRecoverable);
        }

        let client = token::Client::new(&env, &token_addr);
        let balance = client.balance(&env.current_contract_address());
        if balance <= 0 {
            return Err(ContractError::NoFundsToWithdraw);
        }

        client.transfer(&env.current_contract_address(), &caller, &balance);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("TOK_RECVD"), caller, token_addr),
            (balance, env.ledger().timestamp()),
        );

        Ok(balance)
    }

    // ── View functions ────────────────────────────────────────────────────────

    /// Current fee-token balance held by the treasury.
    pub fn get_accumulated_fees(env: Env) -> Result<i128, ContractError> {
        let cfg = load_config(&env)?;
        Ok(token::Client::new(&env, &cfg.fee_token).balance(&env.current_contract_address()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
