//! Whitelist of token ids granted a one-time admission at a chosen level.
//!
//! Entries are keyed by token id with a reverse index so each owner holds at
//! most one active entry.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{
    batch::BatchOutcome, events, levels, migration, positions, ContractError,
};

const ENTRY: Symbol = symbol_short!("WL");
const OWNER_ENTRY: Symbol = symbol_short!("WL_OWN");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistEntry {
    pub owner: Address,
    pub token_id: u64,
    pub level_id: u32,
}

fn entry_key(token_id: u64) -> (Symbol, u64) {
    (ENTRY, token_id)
}

fn owner_key(owner: &Address) -> (Symbol, Address) {
    (OWNER_ENTRY, owner.clone())
}

pub fn get(env: &Env, token_id: u64) -> Option<WhitelistEntry> {
    ttl::read_persistent(env, &entry_key(token_id))
}

pub fn token_of(env: &Env, owner: &Address) -> Option<u64> {
    ttl::read_persistent(env, &owner_key(owner))
}

/// Checks an entry against the id space and level registry without writing.
pub fn validate(env: &Env, entry: &WhitelistEntry) -> Result<(), ContractError> {
    if entry.token_id == 0 {
        return Err(ContractError::ValueCannotBeZero);
    }
    // Grants live in the reserved range; everything above belongs to the
    // mint counter, including burned ids.
    if entry.token_id > positions::legacy_boundary(env) {
        return Err(ContractError::InvalidTokenId);
    }
    if positions::exists(env, entry.token_id) || migration::is_migrated(env, entry.token_id) {
        return Err(ContractError::AlreadyMigrated);
    }
    if entry.level_id == 0 || entry.level_id > levels::max_level_id(env) {
        return Err(ContractError::InvalidLevelId);
    }
    Ok(())
}

/// Validates and stores `entry`, replacing the owner's previous entry and
/// any entry another owner held for the same id.
pub fn put(env: &Env, entry: &WhitelistEntry) -> Result<(), ContractError> {
    validate(env, entry)?;

    if let Some(previous_id) = token_of(env, &entry.owner) {
        if previous_id != entry.token_id {
            env.storage().persistent().remove(&entry_key(previous_id));
        }
    }
    if let Some(displaced) = get(env, entry.token_id) {
        if displaced.owner != entry.owner {
            env.storage()
                .persistent()
                .remove(&owner_key(&displaced.owner));
        }
    }

    let key = entry_key(entry.token_id);
    env.storage().persistent().set(&key, entry);
    ttl::extend_persistent(env, &key);
    let reverse = owner_key(&entry.owner);
    env.storage().persistent().set(&reverse, &entry.token_id);
    ttl::extend_persistent(env, &reverse);

    events::publish_whitelist_changed(env, entry, true);
    Ok(())
}

/// Deletes the entry for `token_id`, returning it.
pub fn remove(env: &Env, token_id: u64) -> Result<WhitelistEntry, ContractError> {
    let entry = get(env, token_id).ok_or(ContractError::WhitelistEntryNotFound)?;
    env.storage().persistent().remove(&entry_key(token_id));
    env.storage().persistent().remove(&owner_key(&entry.owner));

    events::publish_whitelist_changed(env, &entry, false);
    Ok(entry)
}

pub fn add_batch(
    env: &Env,
    entries: &Vec<WhitelistEntry>,
) -> Result<BatchOutcome, ContractError> {
    if entries.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    let mut outcome = BatchOutcome::new(env);
    for (index, entry) in entries.iter().enumerate() {
        outcome.record(index as u32, put(env, &entry));
    }
    events::publish_batch_applied(
        env,
        symbol_short!("WL_ADD"),
        outcome.applied,
        outcome.rejected_count(),
    );
    Ok(outcome)
}

pub fn remove_batch(env: &Env, token_ids: &Vec<u64>) -> Result<BatchOutcome, ContractError> {
    if token_ids.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    let mut outcome = BatchOutcome::new(env);
    for (index, token_id) in token_ids.iter().enumerate() {
        outcome.record(index as u32, remove(env, token_id).map(|_| ()));
    }
    events::publish_batch_applied(
        env,
        symbol_short!("WL_REM"),
        outcome.applied,
        outcome.rejected_count(),
    );
    Ok(outcome)
}
