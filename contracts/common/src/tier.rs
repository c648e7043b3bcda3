use soroban_sdk::contracttype;

const DAY: u64 = 86_400;

// ── Tier enum ────────────────────────────────────────────────────────────────

/// A staking duration category.
///
/// Each tier carries its own lock duration. The reward percentage for a tier
/// lives in the reward-rate contract and may change over time; the lock
/// durations are fixed protocol constants.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Tier {
    OneDay = 0,
    OneWeek = 1,
    OneMonth = 2,
    SixMonth = 3,
    OneYear = 4,
}

impl Tier {
    /// Seconds a stake in this tier stays locked after creation.
    pub fn lock_duration(&self) -> u64 {
        match self {
            Tier::OneDay => DAY,
            Tier::OneWeek => 7 * DAY,
            Tier::OneMonth => 30 * DAY,
            Tier::SixMonth => 180 * DAY,
            Tier::OneYear => 365 * DAY,
        }
    }
}
