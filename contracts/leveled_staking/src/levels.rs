//! Level registry: tier definitions, per-level supply caps and the
//! checkpointed circulating-supply history.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::{events, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

const LEVEL_CTR: Symbol = symbol_short!("LVL_CTR");
const LEVEL: Symbol = symbol_short!("LEVEL");
const SUPPLY: Symbol = symbol_short!("SUPPLY");
const HISTORY: Symbol = symbol_short!("SUP_HIST");
const HISTORY_LEN: Symbol = symbol_short!("HIST_LEN");

/// Most checkpoints a single `supply_history` page returns.
pub const MAX_HISTORY_PAGE: u32 = 100;

// ── Types ───────────────────────────────────────────────────────────────────

/// Caller-supplied level definition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LevelSpec {
    pub name: String,
    /// Special ("X") levels are reachable only through migration.
    pub is_special: bool,
    pub stake_required: i128,
    /// Reward units accrued per delegated block.
    pub reward_factor: i128,
    /// Blocks a freshly minted position stays immature.
    pub maturity_duration: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub is_special: bool,
    pub stake_required: i128,
    pub reward_factor: i128,
    pub maturity_duration: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LevelSupply {
    pub cap: u32,
    pub circulating: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyCheckpoint {
    pub block: u32,
    pub circulating: u32,
}

impl Level {
    fn from_spec(id: u32, spec: LevelSpec) -> Self {
        Level {
            id,
            name: spec.name,
            is_special: spec.is_special,
            stake_required: spec.stake_required,
            reward_factor: spec.reward_factor,
            maturity_duration: spec.maturity_duration,
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

fn validate_spec(spec: &LevelSpec) -> Result<(), ContractError> {
    if spec.name.len() == 0 {
        return Err(ContractError::EmptyName);
    }
    if spec.stake_required <= 0 {
        return Err(ContractError::ValueCannotBeZero);
    }
    if spec.reward_factor < 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

// ── Registry ────────────────────────────────────────────────────────────────

/// Registers a new level under the next sequential id (starting at 1).
pub fn add_level(
    env: &Env,
    spec: LevelSpec,
    cap: u32,
    initial_circulating: u32,
) -> Result<u32, ContractError> {
    validate_spec(&spec)?;
    if initial_circulating > cap {
        return Err(ContractError::CirculatingSupplyGreaterThanCap);
    }

    let id = max_level_id(env)
        .checked_add(1)
        .ok_or(ContractError::InvalidInput)?;
    env.storage().instance().set(&LEVEL_CTR, &id);

    let level = Level::from_spec(id, spec);
    store_level(env, &level);
    write_supply(
        env,
        id,
        &LevelSupply {
            cap,
            circulating: initial_circulating,
        },
    );

    events::publish_level_changed(env, &level, true);
    Ok(id)
}

/// Overwrites every field except the id.
///
/// Existing positions keep the maturity end and stake amount recorded at
/// creation.
pub fn update_level(env: &Env, level_id: u32, spec: LevelSpec) -> Result<Level, ContractError> {
    validate_spec(&spec)?;
    get_level(env, level_id)?;

    let level = Level::from_spec(level_id, spec);
    store_level(env, &level);

    events::publish_level_changed(env, &level, false);
    Ok(level)
}

pub fn set_cap(env: &Env, level_id: u32, cap: u32) -> Result<LevelSupply, ContractError> {
    let mut supply = get_supply(env, level_id)?;
    if supply.circulating > cap {
        return Err(ContractError::CirculatingSupplyGreaterThanCap);
    }
    supply.cap = cap;
    write_supply(env, level_id, &supply);
    Ok(supply)
}

pub fn get_level(env: &Env, level_id: u32) -> Result<Level, ContractError> {
    ttl::read_persistent(env, &(LEVEL, level_id)).ok_or(ContractError::LevelNotFound)
}

pub fn get_supply(env: &Env, level_id: u32) -> Result<LevelSupply, ContractError> {
    ttl::read_persistent(env, &(SUPPLY, level_id)).ok_or(ContractError::LevelNotFound)
}

/// Highest level id assigned so far; 0 before the first level exists.
pub fn max_level_id(env: &Env) -> u32 {
    env.storage().instance().get(&LEVEL_CTR).unwrap_or(0)
}

// ── Supply accounting ───────────────────────────────────────────────────────

/// Takes one unit of supply for a regular admission.
pub fn increment_circulating(env: &Env, level_id: u32) -> Result<LevelSupply, ContractError> {
    let mut supply = get_supply(env, level_id)?;
    if supply.circulating >= supply.cap {
        return Err(ContractError::LevelCapReached);
    }
    supply.circulating += 1;
    write_supply(env, level_id, &supply);
    Ok(supply)
}

/// Admits one migrated holder into a special level: the cap grows with the
/// circulating supply so it always equals the number of admitted holders
/// plus whatever headroom was configured.
pub fn admit_special(env: &Env, level_id: u32) -> Result<LevelSupply, ContractError> {
    let mut supply = get_supply(env, level_id)?;
    supply.cap = supply
        .cap
        .checked_add(1)
        .ok_or(ContractError::LevelCapReached)?;
    supply.circulating += 1;
    write_supply(env, level_id, &supply);
    Ok(supply)
}

pub fn decrement_circulating(env: &Env, level_id: u32) -> Result<LevelSupply, ContractError> {
    let mut supply = get_supply(env, level_id)?;
    supply.circulating = supply.circulating.saturating_sub(1);
    write_supply(env, level_id, &supply);
    Ok(supply)
}

/// Circulating supply of `level_id` as it stood at the end of `block`.
pub fn circulating_at(env: &Env, level_id: u32, block: u32) -> Result<u32, ContractError> {
    if block > env.ledger().sequence() {
        return Err(ContractError::BlockInFuture);
    }
    get_supply(env, level_id)?;

    // Index of the first checkpoint strictly after `block`.
    let mut lo: u32 = 0;
    let mut hi: u32 = history_len(env, level_id);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match checkpoint(env, level_id, mid) {
            Some(cp) if cp.block <= block => lo = mid + 1,
            _ => hi = mid,
        }
    }

    if lo == 0 {
        return Ok(0);
    }
    Ok(checkpoint(env, level_id, lo - 1)
        .map(|cp| cp.circulating)
        .unwrap_or(0))
}

/// Number of checkpoints recorded for `level_id`.
pub fn history_len(env: &Env, level_id: u32) -> u32 {
    ttl::read_persistent(env, &(HISTORY_LEN, level_id)).unwrap_or(0)
}

/// Up to `limit` checkpoints starting at index `start`, oldest first.
/// `limit` is clamped to [`MAX_HISTORY_PAGE`].
pub fn supply_history(env: &Env, level_id: u32, start: u32, limit: u32) -> Vec<SupplyCheckpoint> {
    let end = start
        .saturating_add(limit.min(MAX_HISTORY_PAGE))
        .min(history_len(env, level_id));
    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(cp) = checkpoint(env, level_id, index) {
            page.push_back(cp);
        }
    }
    page
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn store_level(env: &Env, level: &Level) {
    let key = (LEVEL, level.id);
    env.storage().persistent().set(&key, level);
    ttl::extend_persistent(env, &key);
}

fn checkpoint(env: &Env, level_id: u32, index: u32) -> Option<SupplyCheckpoint> {
    ttl::read_persistent(env, &(HISTORY, level_id, index))
}

/// Persists the supply and records a checkpoint, folding changes made in
/// the same block into the last entry. Each checkpoint lives under its own
/// key so a write touches a constant amount of storage.
fn write_supply(env: &Env, level_id: u32, supply: &LevelSupply) {
    let key = (SUPPLY, level_id);
    env.storage().persistent().set(&key, supply);
    ttl::extend_persistent(env, &key);

    let block = env.ledger().sequence();
    let len = history_len(env, level_id);
    let last = len
        .checked_sub(1)
        .and_then(|i| checkpoint(env, level_id, i).map(|cp| (i, cp)));
    let index = match last {
        Some((last, cp)) if cp.block == block => last,
        _ => {
            let len_key = (HISTORY_LEN, level_id);
            env.storage().persistent().set(&len_key, &(len + 1));
            ttl::extend_persistent(env, &len_key);
            len
        }
    };

    let cp_key = (HISTORY, level_id, index);
    env.storage().persistent().set(
        &cp_key,
        &SupplyCheckpoint {
            block,
            circulating: supply.circulating,
        },
    );
    ttl::extend_persistent(env, &cp_key);

    events::publish_supply_changed(env, level_id, supply.cap, supply.circulating);
}
