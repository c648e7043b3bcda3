//! Cross-contract interfaces.
//!
//! Every collaborator seam in the suite is expressed as a trait annotated
//! with `#[contractclient]`. The generated clients invoke whatever contract
//! is deployed at the given address, which keeps the wiring injectable: an
//! Admin can rotate a collaborator, and tests can substitute one.

use soroban_sdk::{contractclient, Address, Env};

use crate::{roles::Role, tier::Tier};

/// Role-membership queries answered by the access registry.
#[contractclient(name = "AccessRegistryClient")]
pub trait AccessRegistryInterface {
    /// Returns true if `account` currently holds `role`.
    fn has_role(env: Env, account: Address, role: Role) -> bool;

    /// Number of accounts currently holding [`Role::Admin`]. Always at
    /// least one once the registry is initialized.
    fn admin_count(env: Env) -> u32;
}

/// Per-tier reward percentages and reward computation.
#[contractclient(name = "RewardRateClient")]
pub trait RewardRateInterface {
    fn get_reward_rate(env: Env, tier: Tier) -> u32;

    /// `amount * rate(tier) / 100`, floored. Traps on overflow.
    fn compute_reward(env: Env, amount: i128, tier: Tier) -> i128;
}

/// Fee validation and collection.
#[contractclient(name = "FeeGateClient")]
pub trait FeeGateInterface {
    fn fetch_current_fee(env: Env) -> i128;

    /// Validates that `paid` covers `actions` fee-bearing actions and moves
    /// the full payment from `payer` to the treasury. Excess over the
    /// required fee is retained, not refunded.
    fn collect_fee(env: Env, payer: Address, paid: i128, actions: u32);
}

/// Principal and reward custody. Only the registered staking platform may
/// call `deposit` and `release`.
#[contractclient(name = "EscrowClient")]
pub trait EscrowInterface {
    fn deposit(env: Env, caller: Address, user: Address, stake_id: u64, amount: i128);

    fn release(env: Env, caller: Address, user: Address, stake_id: u64, total_amount: i128);
}

/// The central stake ledger, as seen by the pool facades.
#[contractclient(name = "StakingPlatformClient")]
pub trait StakingPlatformInterface {
    fn create_stake(env: Env, user: Address, amount: i128, tier: Tier) -> u64;
}
