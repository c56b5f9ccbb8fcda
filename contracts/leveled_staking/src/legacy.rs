use soroban_sdk::{contractclient, contracttype, Address, Env};

/// What the legacy (non-tiered) registry knows about one of its tokens.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegacyHolding {
    pub owner: Address,
    /// Level id the holding maps onto in this ledger.
    pub level: u32,
    pub on_upgrade: bool,
    pub on_auction: bool,
}

/// Read-only surface the migration bridge consumes from the legacy registry.
#[contractclient(name = "LegacyRegistryClient")]
pub trait LegacyRegistry {
    /// Returns `None` when the registry has no owner recorded for the id.
    fn legacy_holding(env: Env, token_id: u64) -> Option<LegacyHolding>;
}
