#![no_std]

use common::Role;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const ADMIN_COUNT: Symbol = symbol_short!("ADM_CNT");

// Per-account membership uses tuple keys: (prefix, account, role)
const ROLE_MEMBER: Symbol = symbol_short!("ROLE");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    LastAdmin = 4,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct AccessRegistryContract;

#[contractimpl]
impl AccessRegistryContract {
    /// Bootstrap the registry with its first Admin.
    ///
    /// From this point on `admin_count` never drops below one: the last
    /// Admin cannot be revoked.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .persistent()
            .set(&role_key(&admin, &Role::Admin), &true);
        env.storage().instance().set(&ADMIN_COUNT, &1u32);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("GRANTED"), admin),
            (Role::Admin, env.ledger().timestamp()),
        );

        Ok(())
    }

    // ── Role management ─────────────────────────────────────────────────────

    /// Grant `role` to `account`. Admin-only; granting an already-held role
    /// is a no-op.
    pub fn grant_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if holds(&env, &account, &role) {
            return Ok(());
        }

        env.storage()
            .persistent()
            .set(&role_key(&account, &role), &true);
        if role == Role::Admin {
            let count: u32 = env.storage().instance().get(&ADMIN_COUNT).unwrap_or(0);
            env.storage()
                .instance()
                .set(&ADMIN_COUNT, &count.saturating_add(1));
        }

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("GRANTED"), account),
            (role, env.ledger().timestamp()),
        );

        Ok(())
    }

    /// Revoke `role` from `account`. Admin-only; revoking an absent role is
    /// a no-op. Removing the final Admin fails with `LastAdmin`.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !holds(&env, &account, &role) {
            return Ok(());
        }

        if role == Role::Admin {
            let count: u32 = env.storage().instance().get(&ADMIN_COUNT).unwrap_or(0);
            if count <= 1 {
                return Err(ContractError::LastAdmin);
            }
            env.storage()
                .instance()
                .set(&ADMIN_COUNT, &count.saturating_sub(1));
        }

        env.storage().persistent().remove(&role_key(&account, &role));

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("REVOKED"), account),
            (role, env.ledger().timestamp()),
        );

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Returns true if `account` currently holds `role`.
    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        holds(&env, &account, &role)
    }

    /// Number of accounts currently holding `Role::Admin`.
    pub fn admin_count(env: Env) -> u32 {
        env.storage().instance().get(&ADMIN_COUNT).unwrap_or(0)
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

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !holds(env, caller, &Role::Admin) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}

fn role_key(account: &Address, role: &Role) -> (Symbol, Address, Role) {
    (ROLE_MEMBER, account.clone(), role.clone())
}

fn holds(env: &Env, account: &Address, role: &Role) -> bool {
    env.storage()
        .persistent()
        .get(&role_key(account, role))
        .unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
