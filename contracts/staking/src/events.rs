#![allow(deprecated)] // events().publish migration tracked separately

use common::Tier;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired when a stake is created and its principal escrowed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeCreatedEvent {
    pub stake_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub tier: Tier,
    pub reward: i128,
    pub unlock_at: u64,
    pub timestamp: u64,
}

/// Fired when a stake is claimed and its payout released.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeClaimedEvent {
    pub stake_id: u64,
    pub owner: Address,
    pub payout: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_stake_created(env: &Env, stake: &crate::stakes::Stake) {
    env.events().publish(
        (symbol_short!("STK_NEW"), stake.owner.clone()),
        StakeCreatedEvent {
            stake_id: stake.id,
            owner: stake.owner.clone(),
            amount: stake.amount,
            tier: stake.tier.clone(),
            reward: stake.reward,
            unlock_at: stake.unlock_at(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_claimed(env: &Env, stake_id: u64, owner: Address, payout: i128) {
    env.events().publish(
        (symbol_short!("STK_CLMD"), owner.clone()),
        StakeClaimedEvent {
            stake_id,
            owner,
            payout,
            timestamp: env.ledger().timestamp(),
        },
    );
}
