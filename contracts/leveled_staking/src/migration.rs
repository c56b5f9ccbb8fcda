//! Admission of legacy holdings and whitelist grants into the reserved id
//! range `1..=legacy_boundary`.

use common::ttl;
use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::{
    events,
    legacy::LegacyRegistryClient,
    levels,
    levels::Level,
    maturity, positions,
    positions::Position,
    upgrade::MigrationInit,
    whitelist, ContractError,
};

// ── Storage keys ────────────────────────────────────────────────────────────

const LEGACY_REGISTRY: Symbol = symbol_short!("LEG_REG");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const STAKE_VAULT: Symbol = symbol_short!("STK_VLT");
const MIGRATED: Symbol = symbol_short!("MIGRATED");

// ── Configuration ───────────────────────────────────────────────────────────

pub fn init(env: &Env, args: &MigrationInit) -> Result<(), ContractError> {
    // Stake and reward assets share no accounting, so they must differ.
    if maturity::reward_token(env).ok().as_ref() == Some(&args.stake_token) {
        return Err(ContractError::InvalidInput);
    }
    env.storage()
        .instance()
        .set(&LEGACY_REGISTRY, &args.legacy_registry);
    env.storage().instance().set(&STAKE_TOKEN, &args.stake_token);
    env.storage().instance().set(&STAKE_VAULT, &args.stake_vault);
    Ok(())
}

pub fn legacy_registry(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&LEGACY_REGISTRY)
        .ok_or(ContractError::FeatureNotEnabled)
}

pub fn set_legacy_registry(env: &Env, registry: &Address) {
    env.storage().instance().set(&LEGACY_REGISTRY, registry);
}

pub fn stake_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&STAKE_TOKEN)
        .ok_or(ContractError::FeatureNotEnabled)
}

pub fn stake_vault(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&STAKE_VAULT)
        .ok_or(ContractError::FeatureNotEnabled)
}

pub fn set_stake_vault(env: &Env, vault: &Address) {
    env.storage().instance().set(&STAKE_VAULT, vault);
}

// ── Migration ───────────────────────────────────────────────────────────────

/// True once `token_id` has been admitted through either migration path.
/// The marker outlives the position, so a burned migrated id stays closed.
pub fn is_migrated(env: &Env, token_id: u64) -> bool {
    env.storage().persistent().has(&(MIGRATED, token_id))
}

fn mark_migrated(env: &Env, token_id: u64) {
    let key = (MIGRATED, token_id);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
}

/// Takes a supply slot in `level`. Special levels widen their cap by one so
/// the cap tracks admitted holders; regular levels respect it.
fn admit(env: &Env, level: &Level) -> Result<(), ContractError> {
    if level.is_special {
        levels::admit_special(env, level.id)?;
    } else {
        levels::increment_circulating(env, level.id)?;
    }
    Ok(())
}

/// Moves a legacy holding into the ledger at the same id. The legacy holder
/// must authorize; the position is created already mature.
pub fn migrate(env: &Env, legacy_token_id: u64) -> Result<Position, ContractError> {
    if legacy_token_id == 0 {
        return Err(ContractError::ValueCannotBeZero);
    }
    if legacy_token_id > positions::legacy_boundary(env)
        || is_migrated(env, legacy_token_id)
        || positions::exists(env, legacy_token_id)
    {
        return Err(ContractError::TokenNotEligible);
    }

    let registry = LegacyRegistryClient::new(env, &legacy_registry(env)?);
    let holding = registry
        .legacy_holding(&legacy_token_id)
        .ok_or(ContractError::TokenNotEligible)?;
    holding.owner.require_auth();

    if holding.on_upgrade || holding.on_auction {
        return Err(ContractError::TokenNotReadyForMigration);
    }
    let level = levels::get_level(env, holding.level)?;
    admit(env, &level)?;

    let now = env.ledger().sequence();
    let position = positions::create(env, legacy_token_id, &level, &holding.owner, now);
    mark_migrated(env, legacy_token_id);

    events::publish_migrated(env, legacy_token_id, holding.owner, level.id, false);
    Ok(position)
}

/// Redeems the caller's whitelist entry: collects the level's current stake
/// into the vault and creates the position with a full maturity window.
pub fn migrate_from_whitelist(
    env: &Env,
    caller: &Address,
    token_id: u64,
) -> Result<Position, ContractError> {
    let entry = whitelist::get(env, token_id).ok_or(ContractError::WhitelistEntryNotFound)?;
    if entry.owner != *caller {
        return Err(ContractError::NotWhitelisted);
    }
    // The id space may have moved on since the entry was written.
    whitelist::validate(env, &entry)?;

    let level = levels::get_level(env, entry.level_id)?;
    admit(env, &level)?;

    let stake = token::Client::new(env, &stake_token(env)?);
    if stake.balance(caller) < level.stake_required {
        return Err(ContractError::InsufficientBalance);
    }
    stake.transfer(caller, &stake_vault(env)?, &level.stake_required);

    whitelist::remove(env, token_id)?;

    let maturity_end = env.ledger().sequence().saturating_add(level.maturity_duration);
    let position = positions::create(env, token_id, &level, caller, maturity_end);
    mark_migrated(env, token_id);

    events::publish_migrated(env, token_id, caller.clone(), level.id, true);
    Ok(position)
}
