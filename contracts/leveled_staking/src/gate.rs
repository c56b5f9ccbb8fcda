//! Cross-cutting guards: initialization, the global pause flag, role checks
//! and the version counter that unlocks each component.

use common::roles::{self, Role};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{events, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const PAUSED: Symbol = symbol_short!("PAUSED");
const VERSION: Symbol = symbol_short!("VERSION");

// ── Versions ────────────────────────────────────────────────────────────────

/// Levels, positions, managers, roles and pausing.
pub const BASE_VERSION: u32 = 1;
/// Maturity windows can be skipped by paying a boost fee.
pub const BOOST_VERSION: u32 = 2;
/// Legacy registry migration and whitelist grants.
pub const MIGRATION_VERSION: u32 = 3;
/// Validator delegation and block-based reward accrual.
pub const DELEGATION_VERSION: u32 = 4;
/// Lost-rewards compensation ledger.
pub const COMPENSATION_VERSION: u32 = 5;

pub const LATEST_VERSION: u32 = COMPENSATION_VERSION;

// ── Initialization ──────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn mark_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
    env.storage().instance().set(&VERSION, &BASE_VERSION);
}

/// Guard: revert if the contract is not yet initialized.
pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

// ── Pausing ─────────────────────────────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Guard applied by every state-mutating entry point except `upgrade`.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Combined guard for mutating entry points of a component introduced at
/// `min_version`.
pub fn require_live(env: &Env, min_version: u32) -> Result<(), ContractError> {
    require_initialized(env)?;
    require_not_paused(env)?;
    require_version(env, min_version)
}

pub fn set_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), ContractError> {
    require_role(env, Role::Pauser, caller)?;
    env.storage().instance().set(&PAUSED, &paused);
    events::publish_pause_changed(env, paused, caller.clone());
    Ok(())
}

// ── Roles ───────────────────────────────────────────────────────────────────

/// The single role gate shared by every privileged operation.
pub fn require_role(env: &Env, role: Role, caller: &Address) -> Result<(), ContractError> {
    if !roles::has_role(env, role, caller) {
        return Err(ContractError::MissingRole);
    }
    Ok(())
}

// ── Versioning ──────────────────────────────────────────────────────────────

pub fn version(env: &Env) -> u32 {
    env.storage().instance().get(&VERSION).unwrap_or(0)
}

pub fn require_version(env: &Env, min_version: u32) -> Result<(), ContractError> {
    if version(env) < min_version {
        return Err(ContractError::FeatureNotEnabled);
    }
    Ok(())
}

pub(crate) fn set_version(env: &Env, version: u32) {
    env.storage().instance().set(&VERSION, &version);
}
