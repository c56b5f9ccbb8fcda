//! Manager relation `{token_id → manager}`.
//!
//! An absent entry means the owner manages the position. Transfer and burn
//! both go through [`reset_control`] so the cascade lives in one place.

use common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{events, positions, positions::Position, ContractError};

const MANAGER: Symbol = symbol_short!("MANAGER");

fn manager_key(token_id: u64) -> (Symbol, u64) {
    (MANAGER, token_id)
}

/// Explicitly assigned manager, if any.
pub fn explicit_manager(env: &Env, token_id: u64) -> Option<Address> {
    ttl::read_persistent(env, &manager_key(token_id))
}

/// Effective manager: the explicit assignment or, failing that, the owner.
pub fn get_manager(env: &Env, token_id: u64) -> Result<Address, ContractError> {
    let position = positions::get(env, token_id)?;
    Ok(explicit_manager(env, token_id).unwrap_or(position.owner))
}

pub fn is_token_manager(env: &Env, token_id: u64, account: &Address) -> Result<bool, ContractError> {
    Ok(get_manager(env, token_id)? == *account)
}

/// Guard for operations the owner may hand off: delegation and claims.
pub fn require_owner_or_manager(
    env: &Env,
    position: &Position,
    caller: &Address,
) -> Result<(), ContractError> {
    if position.owner == *caller {
        return Ok(());
    }
    match explicit_manager(env, position.id) {
        Some(manager) if manager == *caller => Ok(()),
        _ => Err(ContractError::NotTokenManagerOrOwner),
    }
}

pub fn add_manager(
    env: &Env,
    owner: &Address,
    manager: &Address,
    token_id: u64,
) -> Result<(), ContractError> {
    let position = positions::get(env, token_id)?;
    positions::require_owner(&position, owner)?;
    if manager == owner {
        return Err(ContractError::SelfManager);
    }

    let key = manager_key(token_id);
    env.storage().persistent().set(&key, manager);
    ttl::extend_persistent(env, &key);

    events::publish_manager_added(env, token_id, owner.clone(), manager.clone());
    Ok(())
}

pub fn remove_manager(env: &Env, caller: &Address, token_id: u64) -> Result<(), ContractError> {
    let position = positions::get(env, token_id)?;
    let current = explicit_manager(env, token_id);

    let allowed = position.owner == *caller || current.as_ref() == Some(caller);
    if !allowed {
        return Err(ContractError::NotTokenManagerOrOwner);
    }
    if current.is_none() {
        return Err(ContractError::NoTokenManager);
    }

    reset_control(env, token_id, Some(position.owner));
    Ok(())
}

/// Drops any explicit manager so control rests with `successor` (the owner
/// after the change), or with nobody when the position is being burned.
pub fn reset_control(env: &Env, token_id: u64, successor: Option<Address>) {
    let previous = explicit_manager(env, token_id);
    env.storage().persistent().remove(&manager_key(token_id));
    events::publish_management_revoked(env, token_id, previous, successor);
}
