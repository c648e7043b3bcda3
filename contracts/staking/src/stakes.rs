use common::Tier;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage key constants ───────────────────────────────────────────────────

/// Counter for allocating monotonic stake IDs.
const STAKE_CTR: Symbol = symbol_short!("STK_CTR");

// ── Types ───────────────────────────────────────────────────────────────────

/// A principal lock under one duration tier.
///
/// The reward is computed once, at creation, from the tier's rate at that
/// moment; later rate changes never touch it. `claimed` flips to `true`
/// exactly once and the record is never deleted, so claimed stakes remain
/// queryable as an audit trail.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    /// Auto-incremented unique identifier, starting at 0, never reused.
    pub id: u64,
    /// The account that locked the principal.
    pub owner: Address,
    /// Locked principal in token base units.
    pub amount: i128,
    /// Duration tier the stake was created under.
    pub tier: Tier,
    /// Payout on top of the principal, frozen at creation.
    pub reward: i128,
    /// Ledger timestamp of creation; the lock runs from here.
    pub created_at: u64,
    /// Becomes `true` once principal + reward have been released.
    pub claimed: bool,
}

impl Stake {
    /// First ledger timestamp at which the stake may be claimed.
    pub fn unlock_at(&self) -> u64 {
        self.created_at.saturating_add(self.tier.lock_duration())
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn stake_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("STAKE"), id)
}

fn user_index_key(user: &Address) -> (Symbol, Address) {
    (symbol_short!("USR_IDX"), user.clone())
}

fn tier_index_key(user: &Address, tier: &Tier) -> (Symbol, Address, Tier) {
    (symbol_short!("TIER_IDX"), user.clone(), tier.clone())
}

/// Persist a `Stake` record.
pub fn store_stake(env: &Env, stake: &Stake) {
    env.storage().persistent().set(&stake_key(stake.id), stake);
}

/// Retrieve a `Stake` by ID, returning `None` when not found.
pub fn get_stake(env: &Env, id: u64) -> Option<Stake> {
    env.storage().persistent().get(&stake_key(id))
}

/// Allocate and return the next stake ID (0-based, strictly increasing).
pub fn next_stake_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&STAKE_CTR).unwrap_or(0u64);
    env.storage()
        .instance()
        .set(&STAKE_CTR, &current.saturating_add(1));
    current
}

/// Number of stakes ever created.
pub fn stake_count(env: &Env) -> u64 {
    env.storage().instance().get(&STAKE_CTR).unwrap_or(0u64)
}

/// Append a freshly created stake's ID to the owner's global index and to
/// the `(owner, tier)` index.
pub fn append_to_indexes(env: &Env, stake: &Stake) {
    let global_key = user_index_key(&stake.owner);
    let mut global: Vec<u64> = env
        .storage()
        .persistent()
        .get(&global_key)
        .unwrap_or_else(|| Vec::new(env));
    global.push_back(stake.id);
    env.storage().persistent().set(&global_key, &global);

    let tier_key = tier_index_key(&stake.owner, &stake.tier);
    let mut in_tier: Vec<u64> = env
        .storage()
        .persistent()
        .get(&tier_key)
        .unwrap_or_else(|| Vec::new(env));
    in_tier.push_back(stake.id);
    env.storage().persistent().set(&tier_key, &in_tier);
}

/// Drop `id` from the `(user, tier)` index. The global index keeps the ID
/// so historical queries still see the stake.
pub fn remove_from_tier_index(env: &Env, user: &Address, tier: &Tier, id: u64) {
    let key = tier_index_key(user, tier);
    let mut in_tier: Vec<u64> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    if let Some(pos) = in_tier.first_index_of(id) {
        in_tier.remove_unchecked(pos);
        env.storage().persistent().set(&key, &in_tier);
    }
}

/// Every stake ID the user has ever created, claimed or not.
pub fn user_stake_ids(env: &Env, user: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&user_index_key(user))
        .unwrap_or_else(|| Vec::new(env))
}

/// The user's unclaimed stake IDs within one tier.
pub fn user_stake_ids_in_tier(env: &Env, user: &Address, tier: &Tier) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&tier_index_key(user, tier))
        .unwrap_or_else(|| Vec::new(env))
}
