#![allow(deprecated)] // events().publish migration tracked separately

use common::Role;
use soroban_sdk::{symbol_short, Address, Env, String};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub legacy_boundary: u64,
    pub block: u32,
}

/// Fired when a role is granted or revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub granted: bool,
    pub by: Address,
}

/// Fired when the pause flag flips.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub paused: bool,
    pub by: Address,
    pub block: u32,
}

/// Fired after a version initializer ran.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub from_version: u32,
    pub to_version: u32,
    pub code_replaced: bool,
    pub by: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LevelChangedEvent {
    pub level_id: u32,
    pub name: String,
    pub is_special: bool,
    pub stake_required: i128,
    pub reward_factor: i128,
    pub maturity_duration: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyChangedEvent {
    pub level_id: u32,
    pub cap: u32,
    pub circulating: u32,
    pub block: u32,
}

/// Fired when a position is created by mint, migration or whitelist grant.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionCreatedEvent {
    pub token_id: u64,
    pub level_id: u32,
    pub owner: Address,
    pub stake_amount: i128,
    pub maturity_end: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnedEvent {
    pub token_id: u64,
    pub level_id: u32,
    pub owner: Address,
    pub stake_amount: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferredEvent {
    pub token_id: u64,
    pub from: Address,
    pub to: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerAddedEvent {
    pub token_id: u64,
    pub owner: Address,
    pub manager: Address,
}

/// Fired whenever an explicit manager assignment is dropped: on
/// `remove_manager`, on transfer (control passes to the new owner) and on
/// burn (no successor).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagementRevokedEvent {
    pub token_id: u64,
    pub previous_manager: Option<Address>,
    pub successor: Option<Address>,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostPriceSetEvent {
    pub level_id: u32,
    pub price_per_block: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostedEvent {
    pub token_id: u64,
    pub payer: Address,
    pub cost: i128,
    pub blocks_skipped: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressSetEvent {
    pub value: Address,
    pub by: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratedEvent {
    pub token_id: u64,
    pub owner: Address,
    pub level_id: u32,
    pub from_whitelist: bool,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistChangedEvent {
    pub token_id: u64,
    pub owner: Address,
    pub level_id: u32,
    pub added: bool,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchAppliedEvent {
    pub applied: u32,
    pub rejected: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationEvent {
    pub token_id: u64,
    pub validator: Address,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub token_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LostRewardsEvent {
    pub owner: Address,
    pub token_id: u64,
    pub amount: i128,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, legacy_boundary: u64) {
    let data = InitializedEvent {
        admin,
        legacy_boundary,
        block: env.ledger().sequence(),
    };
    env.events().publish((symbol_short!("INIT"),), data);
}

pub fn publish_role_changed(env: &Env, role: Role, account: Address, granted: bool, by: Address) {
    let data = RoleChangedEvent {
        role,
        account,
        granted,
        by,
    };
    env.events().publish((symbol_short!("ROLE"),), data);
}

pub fn publish_pause_changed(env: &Env, paused: bool, by: Address) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    let data = PauseChangedEvent {
        paused,
        by,
        block: env.ledger().sequence(),
    };
    env.events().publish((topic,), data);
}

pub fn publish_upgraded(
    env: &Env,
    from_version: u32,
    to_version: u32,
    code_replaced: bool,
    by: Address,
) {
    let data = UpgradedEvent {
        from_version,
        to_version,
        code_replaced,
        by,
    };
    env.events().publish((symbol_short!("UPGRADE"),), data);
}

pub fn publish_level_changed(env: &Env, level: &crate::levels::Level, created: bool) {
    let topic = if created {
        symbol_short!("LVL_ADD")
    } else {
        symbol_short!("LVL_UPD")
    };
    let data = LevelChangedEvent {
        level_id: level.id,
        name: level.name.clone(),
        is_special: level.is_special,
        stake_required: level.stake_required,
        reward_factor: level.reward_factor,
        maturity_duration: level.maturity_duration,
    };
    env.events().publish((topic, level.id), data);
}

pub fn publish_supply_changed(env: &Env, level_id: u32, cap: u32, circulating: u32) {
    let data = SupplyChangedEvent {
        level_id,
        cap,
        circulating,
        block: env.ledger().sequence(),
    };
    env.events().publish((symbol_short!("SUPPLY"), level_id), data);
}

pub fn publish_position_created(env: &Env, position: &crate::positions::Position) {
    let data = PositionCreatedEvent {
        token_id: position.id,
        level_id: position.level_id,
        owner: position.owner.clone(),
        stake_amount: position.stake_amount,
        maturity_end: position.maturity_end,
    };
    env.events()
        .publish((symbol_short!("MINT"), position.id), data);
}

pub fn publish_burned(env: &Env, position: &crate::positions::Position) {
    let data = BurnedEvent {
        token_id: position.id,
        level_id: position.level_id,
        owner: position.owner.clone(),
        stake_amount: position.stake_amount,
    };
    env.events()
        .publish((symbol_short!("BURN"), position.id), data);
}

pub fn publish_transferred(env: &Env, token_id: u64, from: Address, to: Address) {
    let data = TransferredEvent { token_id, from, to };
    env.events().publish((symbol_short!("TRANSFER"), token_id), data);
}

pub fn publish_manager_added(env: &Env, token_id: u64, owner: Address, manager: Address) {
    let data = ManagerAddedEvent {
        token_id,
        owner,
        manager,
    };
    env.events().publish((symbol_short!("MGR_ADD"), token_id), data);
}

pub fn publish_management_revoked(
    env: &Env,
    token_id: u64,
    previous_manager: Option<Address>,
    successor: Option<Address>,
) {
    let data = ManagementRevokedEvent {
        token_id,
        previous_manager,
        successor,
    };
    env.events().publish((symbol_short!("MGR_REV"), token_id), data);
}

pub fn publish_boost_price_set(env: &Env, level_id: u32, price_per_block: i128) {
    let data = BoostPriceSetEvent {
        level_id,
        price_per_block,
    };
    env.events().publish((symbol_short!("BST_PX"), level_id), data);
}

pub fn publish_boosted(env: &Env, token_id: u64, payer: Address, cost: i128, blocks_skipped: u32) {
    let data = BoostedEvent {
        token_id,
        payer,
        cost,
        blocks_skipped,
    };
    env.events().publish((symbol_short!("BOOST"), token_id), data);
}

pub fn publish_orchestrator_set(env: &Env, orchestrator: Address, by: Address) {
    let data = AddressSetEvent {
        value: orchestrator,
        by,
    };
    env.events().publish((symbol_short!("ORCH_SET"),), data);
}

pub fn publish_legacy_registry_set(env: &Env, registry: Address, by: Address) {
    let data = AddressSetEvent {
        value: registry,
        by,
    };
    env.events().publish((symbol_short!("LEG_SET"),), data);
}

pub fn publish_stake_vault_set(env: &Env, vault: Address, by: Address) {
    let data = AddressSetEvent { value: vault, by };
    env.events().publish((symbol_short!("VLT_SET"),), data);
}

pub fn publish_migrated(
    env: &Env,
    token_id: u64,
    owner: Address,
    level_id: u32,
    from_whitelist: bool,
) {
    let data = MigratedEvent {
        token_id,
        owner,
        level_id,
        from_whitelist,
    };
    env.events().publish((symbol_short!("MIGRATE"), token_id), data);
}

pub fn publish_whitelist_changed(env: &Env, entry: &crate::whitelist::WhitelistEntry, added: bool) {
    let topic = if added {
        symbol_short!("WL_ADD")
    } else {
        symbol_short!("WL_REM")
    };
    let data = WhitelistChangedEvent {
        token_id: entry.token_id,
        owner: entry.owner.clone(),
        level_id: entry.level_id,
        added,
    };
    env.events().publish((topic, entry.token_id), data);
}

pub fn publish_batch_applied(env: &Env, operation: soroban_sdk::Symbol, applied: u32, rejected: u32) {
    let data = BatchAppliedEvent { applied, rejected };
    env.events().publish((symbol_short!("BATCH"), operation), data);
}

pub fn publish_validator_changed(env: &Env, validator: Address, added: bool) {
    let topic = if added {
        symbol_short!("VAL_ADD")
    } else {
        symbol_short!("VAL_REM")
    };
    env.events().publish((topic,), validator);
}

pub fn publish_delegated(env: &Env, token_id: u64, validator: Address) {
    let data = DelegationEvent {
        token_id,
        validator,
        block: env.ledger().sequence(),
    };
    env.events().publish((symbol_short!("DELEGATE"), token_id), data);
}

pub fn publish_exit_requested(env: &Env, token_id: u64, validator: Address) {
    let data = DelegationEvent {
        token_id,
        validator,
        block: env.ledger().sequence(),
    };
    env.events().publish((symbol_short!("EXIT_REQ"), token_id), data);
}

pub fn publish_rewards_claimed(env: &Env, token_id: u64, owner: Address, amount: i128) {
    let data = RewardsClaimedEvent {
        token_id,
        owner,
        amount,
        block: env.ledger().sequence(),
    };
    env.events().publish((symbol_short!("CLAIM"), token_id), data);
}

pub fn publish_lost_rewards_seeded(env: &Env, owner: Address, token_id: u64, amount: i128) {
    let data = LostRewardsEvent {
        owner,
        token_id,
        amount,
    };
    env.events().publish((symbol_short!("LOST_SEED"), token_id), data);
}

pub fn publish_lost_rewards_claimed(env: &Env, owner: Address, token_id: u64, amount: i128) {
    let data = LostRewardsEvent {
        owner,
        token_id,
        amount,
    };
    env.events().publish((symbol_short!("LOST_CLM"), token_id), data);
}
