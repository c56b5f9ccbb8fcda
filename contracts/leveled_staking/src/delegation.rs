//! Validator delegation and block-based reward accrual.
//!
//! A delegated position earns `level.reward_factor` reward units per block
//! from `reward_accrual_start` until it is claimed or, once an exit is
//! requested, until `exit_requested_at`.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, token, Address, Env, Symbol};

use crate::{events, levels, managers, maturity, positions, upgrade::DelegationInit, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

const VALIDATOR: Symbol = symbol_short!("VALIDATOR");
const DELEGATION: Symbol = symbol_short!("DELEG");
const ACTIVE_COUNT: Symbol = symbol_short!("VAL_LOAD");

// ── Types ───────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DelegationStatus {
    None = 0,
    Active = 1,
    ExitRequested = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationRecord {
    pub token_id: u64,
    pub validator: Address,
    pub status: DelegationStatus,
    pub reward_accrual_start: u32,
    /// Block at which accrual froze; 0 while the record is active.
    pub exit_requested_at: u32,
}

fn delegation_key(token_id: u64) -> (Symbol, u64) {
    (DELEGATION, token_id)
}

fn validator_key(validator: &Address) -> (Symbol, Address) {
    (VALIDATOR, validator.clone())
}

fn active_count_key(validator: &Address) -> (Symbol, Address) {
    (ACTIVE_COUNT, validator.clone())
}

/// Number of `Active` delegations pointing at `validator`.
pub fn active_delegations(env: &Env, validator: &Address) -> u32 {
    ttl::read_persistent(env, &active_count_key(validator)).unwrap_or(0)
}

fn adjust_active(env: &Env, validator: &Address, up: bool) {
    let key = active_count_key(validator);
    let current = active_delegations(env, validator);
    let next = if up {
        current.saturating_add(1)
    } else {
        current.saturating_sub(1)
    };
    if next == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &next);
        ttl::extend_persistent(env, &key);
    }
}

// ── Validator set ───────────────────────────────────────────────────────────

pub fn init(env: &Env, args: &DelegationInit) {
    for validator in args.validators.iter() {
        add_validator(env, &validator);
    }
}

pub fn is_validator(env: &Env, validator: &Address) -> bool {
    env.storage().persistent().has(&validator_key(validator))
}

pub fn add_validator(env: &Env, validator: &Address) {
    let key = validator_key(validator);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
    events::publish_validator_changed(env, validator.clone(), true);
}

/// Refuses while active delegations still accrue against `validator`;
/// their holders must request an exit first.
pub fn remove_validator(env: &Env, validator: &Address) -> Result<(), ContractError> {
    if !is_validator(env, validator) {
        return Err(ContractError::ValidatorNotFound);
    }
    if active_delegations(env, validator) > 0 {
        return Err(ContractError::ValidatorHasDelegations);
    }
    env.storage().persistent().remove(&validator_key(validator));
    events::publish_validator_changed(env, validator.clone(), false);
    Ok(())
}

// ── Records ─────────────────────────────────────────────────────────────────

pub fn load(env: &Env, token_id: u64) -> Option<DelegationRecord> {
    ttl::read_persistent(env, &delegation_key(token_id))
}

fn store(env: &Env, record: &DelegationRecord) {
    let key = delegation_key(record.token_id);
    env.storage().persistent().set(&key, record);
    ttl::extend_persistent(env, &key);
}

/// Drops the record of a burned position. Unclaimed accrual is forfeited.
pub fn clear(env: &Env, token_id: u64) {
    if let Some(record) = load(env, token_id) {
        if record.status == DelegationStatus::Active {
            adjust_active(env, &record.validator, false);
        }
        env.storage().persistent().remove(&delegation_key(token_id));
    }
}

/// The stored record, or a `None`-status placeholder owned by the contract.
pub fn get_delegation(env: &Env, token_id: u64) -> Result<DelegationRecord, ContractError> {
    positions::get(env, token_id)?;
    Ok(load(env, token_id).unwrap_or(DelegationRecord {
        token_id,
        validator: env.current_contract_address(),
        status: DelegationStatus::None,
        reward_accrual_start: 0,
        exit_requested_at: 0,
    }))
}

// ── Accrual ─────────────────────────────────────────────────────────────────

pub fn delegate(
    env: &Env,
    caller: &Address,
    token_id: u64,
    validator: &Address,
) -> Result<(), ContractError> {
    let position = positions::get(env, token_id)?;
    managers::require_owner_or_manager(env, &position, caller)?;
    if !is_validator(env, validator) {
        return Err(ContractError::ValidatorNotFound);
    }
    if load(env, token_id).is_some() {
        return Err(ContractError::AlreadyDelegated);
    }

    store(
        env,
        &DelegationRecord {
            token_id,
            validator: validator.clone(),
            status: DelegationStatus::Active,
            reward_accrual_start: env.ledger().sequence(),
            exit_requested_at: 0,
        },
    );
    adjust_active(env, validator, true);
    events::publish_delegated(env, token_id, validator.clone());
    Ok(())
}

pub fn request_exit(env: &Env, caller: &Address, token_id: u64) -> Result<(), ContractError> {
    let position = positions::get(env, token_id)?;
    managers::require_owner_or_manager(env, &position, caller)?;

    let mut record = match load(env, token_id) {
        Some(r) if r.status == DelegationStatus::Active => r,
        _ => return Err(ContractError::NotDelegated),
    };
    record.status = DelegationStatus::ExitRequested;
    record.exit_requested_at = env.ledger().sequence();
    store(env, &record);
    adjust_active(env, &record.validator, false);

    events::publish_exit_requested(env, token_id, record.validator);
    Ok(())
}

fn accrual_end(env: &Env, record: &DelegationRecord) -> u32 {
    let now = env.ledger().sequence();
    match record.status {
        DelegationStatus::ExitRequested => now.min(record.exit_requested_at),
        _ => now,
    }
}

/// Rewards earned but not yet claimed. Zero for undelegated positions.
pub fn pending_rewards(env: &Env, token_id: u64) -> Result<i128, ContractError> {
    let position = positions::get(env, token_id)?;
    let record = match load(env, token_id) {
        Some(r) => r,
        None => return Ok(0),
    };
    let level = levels::get_level(env, position.level_id)?;
    let blocks = accrual_end(env, &record).saturating_sub(record.reward_accrual_start);
    Ok((blocks as i128).saturating_mul(level.reward_factor))
}

/// Pays pending rewards to the owner from the contract's reward balance.
/// Claiming after an exit request settles the frozen entitlement and ends
/// the delegation.
pub fn claim(env: &Env, caller: &Address, token_id: u64) -> Result<i128, ContractError> {
    let position = positions::get(env, token_id)?;
    managers::require_owner_or_manager(env, &position, caller)?;
    let mut record = load(env, token_id).ok_or(ContractError::NotDelegated)?;

    let amount = pending_rewards(env, token_id)?;
    if amount > 0 {
        let reward = token::Client::new(env, &maturity::reward_token(env)?);
        let this = env.current_contract_address();
        if reward.balance(&this) < amount {
            return Err(ContractError::InsufficientBalance);
        }
        reward.transfer(&this, &position.owner, &amount);
    }

    match record.status {
        DelegationStatus::ExitRequested => clear(env, token_id),
        _ => {
            record.reward_accrual_start = env.ledger().sequence();
            store(env, &record);
        }
    }

    events::publish_rewards_claimed(env, token_id, position.owner, amount);
    Ok(amount)
}

