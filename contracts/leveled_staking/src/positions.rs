//! Position ledger: ownership, the per-owner index and the partitioned id
//! space.
//!
//! Ids `1..=legacy_boundary` are reserved for migrated legacy holdings and
//! whitelist grants; fresh mints draw from a single counter that starts at
//! `legacy_boundary + 1`.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{delegation, events, levels, levels::Level, managers, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

const LEGACY_BOUNDARY: Symbol = symbol_short!("LEG_BND");
const NEXT_ID: Symbol = symbol_short!("NEXT_ID");
const POSITION: Symbol = symbol_short!("POS");
const OWNED: Symbol = symbol_short!("OWNED");

// ── Types ───────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub id: u64,
    pub level_id: u32,
    pub owner: Address,
    /// Block at which the position was created.
    pub minted_at: u32,
    /// Stake recorded from the level requirement at creation time.
    pub stake_amount: i128,
    /// First block at which the position counts as mature.
    pub maturity_end: u32,
}

// ── Id space ────────────────────────────────────────────────────────────────

pub fn init(env: &Env, legacy_boundary: u64) {
    env.storage()
        .instance()
        .set(&LEGACY_BOUNDARY, &legacy_boundary);
}

pub fn legacy_boundary(env: &Env) -> u64 {
    env.storage().instance().get(&LEGACY_BOUNDARY).unwrap_or(0)
}

/// The id the next `mint` will assign.
pub fn next_token_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&NEXT_ID)
        .unwrap_or_else(|| legacy_boundary(env).saturating_add(1))
}

// ── Lookups ─────────────────────────────────────────────────────────────────

fn position_key(token_id: u64) -> (Symbol, u64) {
    (POSITION, token_id)
}

pub fn exists(env: &Env, token_id: u64) -> bool {
    env.storage().persistent().has(&position_key(token_id))
}

pub fn get(env: &Env, token_id: u64) -> Result<Position, ContractError> {
    ttl::read_persistent(env, &position_key(token_id)).ok_or(ContractError::TokenNotFound)
}

pub fn store(env: &Env, position: &Position) {
    let key = position_key(position.id);
    env.storage().persistent().set(&key, position);
    ttl::extend_persistent(env, &key);
}

pub fn tokens_of(env: &Env, owner: &Address) -> Vec<u64> {
    ttl::read_persistent(env, &(OWNED, owner.clone())).unwrap_or(Vec::new(env))
}

/// Guard: `caller` must be the position's owner.
pub fn require_owner(position: &Position, caller: &Address) -> Result<(), ContractError> {
    if position.owner != *caller {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

// ── Lifecycle ───────────────────────────────────────────────────────────────

/// Writes a new position at `token_id` and indexes it under `owner`.
///
/// Supply accounting is the caller's job; every creation path admits the
/// position into its level before calling this.
pub fn create(
    env: &Env,
    token_id: u64,
    level: &Level,
    owner: &Address,
    maturity_end: u32,
) -> Position {
    let position = Position {
        id: token_id,
        level_id: level.id,
        owner: owner.clone(),
        minted_at: env.ledger().sequence(),
        stake_amount: level.stake_required,
        maturity_end,
    };
    store(env, &position);
    index_add(env, owner, token_id);

    events::publish_position_created(env, &position);
    position
}

/// Mints a fresh position at the next auto-assigned id.
pub fn mint(env: &Env, level_id: u32, owner: &Address) -> Result<Position, ContractError> {
    let level = levels::get_level(env, level_id)?;
    if level.is_special {
        return Err(ContractError::CannotMintXToken);
    }
    levels::increment_circulating(env, level_id)?;

    let token_id = next_token_id(env);
    let following = token_id
        .checked_add(1)
        .ok_or(ContractError::InvalidTokenId)?;
    env.storage().instance().set(&NEXT_ID, &following);

    let now = env.ledger().sequence();
    let maturity_end = now.saturating_add(level.maturity_duration);
    Ok(create(env, token_id, &level, owner, maturity_end))
}

/// Removes a position entirely, releasing its supply slot, its delegation
/// record and any manager assignment.
pub fn burn(env: &Env, token_id: u64) -> Result<Position, ContractError> {
    let position = get(env, token_id)?;

    levels::decrement_circulating(env, position.level_id)?;
    delegation::clear(env, token_id);
    managers::reset_control(env, token_id, None);

    env.storage().persistent().remove(&position_key(token_id));
    index_remove(env, &position.owner, token_id);

    events::publish_burned(env, &position);
    Ok(position)
}

/// Moves ownership from `from` to `to`; control passes to `to` as well.
pub fn transfer(
    env: &Env,
    from: &Address,
    to: &Address,
    token_id: u64,
) -> Result<Position, ContractError> {
    let mut position = get(env, token_id)?;
    require_owner(&position, from)?;

    position.owner = to.clone();
    store(env, &position);
    index_remove(env, from, token_id);
    index_add(env, to, token_id);
    managers::reset_control(env, token_id, Some(to.clone()));

    events::publish_transferred(env, token_id, from.clone(), to.clone());
    Ok(position)
}

// ── Owner index ─────────────────────────────────────────────────────────────

fn index_add(env: &Env, owner: &Address, token_id: u64) {
    let key = (OWNED, owner.clone());
    let mut owned = tokens_of(env, owner);
    owned.push_back(token_id);
    env.storage().persistent().set(&key, &owned);
    ttl::extend_persistent(env, &key);
}

fn index_remove(env: &Env, owner: &Address, token_id: u64) {
    let key = (OWNED, owner.clone());
    let owned = tokens_of(env, owner);
    let mut remaining = Vec::new(env);
    for id in owned.iter() {
        if id != token_id {
            remaining.push_back(id);
        }
    }
    if remaining.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &remaining);
        ttl::extend_persistent(env, &key);
    }
}
