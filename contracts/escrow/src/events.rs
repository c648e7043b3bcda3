#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired when principal enters custody for a stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserDepositedEvent {
    pub user: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when principal plus reward leaves custody on a claim.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserWithdrawnEvent {
    pub user: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an Admin tops up the reward pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsReplenishedEvent {
    pub from: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

/// Fired when the authorized staking platform is swapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformUpdatedEvent {
    pub old_platform: Option<Address>,
    pub new_platform: Address,
    pub timestamp: u64,
}

/// Fired when stray tokens are swept out of the contract.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensRecoveredEvent {
    pub to: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_user_deposited(env: &Env, user: Address, stake_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("DEPOSITED"), user.clone()),
        UserDepositedEvent {
            user,
            stake_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_user_withdrawn(env: &Env, user: Address, stake_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), user.clone()),
        UserWithdrawnEvent {
            user,
            stake_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_replenished(env: &Env, from: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("RWD_REPL"), from.clone()),
        RewardsReplenishedEvent {
            from,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_platform_updated(env: &Env, old_platform: Option<Address>, new_platform: Address) {
    env.events().publish(
        (symbol_short!("PLAT_UPD"),),
        PlatformUpdatedEvent {
            old_platform,
            new_platform,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_recovered(env: &Env, to: Address, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TOK_RECVD"), to.clone(), token.clone()),
        TokensRecoveredEvent {
            to,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
