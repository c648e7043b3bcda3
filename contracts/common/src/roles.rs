use soroban_sdk::{contracttype, Address, Env};

use crate::interfaces::AccessRegistryClient;

// ── Role enum ────────────────────────────────────────────────────────────────

/// The two privileged roles recognised by every contract in the suite.
///
/// - `Admin`    – manages custody wiring (escrow platform rotation, facade
///                rewiring), withdraws accumulated fees, and recovers stray
///                funds.
/// - `Operator` – tunes economic parameters: per-tier reward rates and the
///                per-action fee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Operator = 2,
}

// ── Guards ───────────────────────────────────────────────────────────────────

/// Query the access registry at `registry` for `who`'s membership in `role`.
///
/// Callers must authenticate `who` via `require_auth()` beforehand; this
/// helper only answers the membership question.
pub fn has_role(env: &Env, registry: &Address, who: &Address, role: Role) -> bool {
    AccessRegistryClient::new(env, registry).has_role(who, &role)
}
