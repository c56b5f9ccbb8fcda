//! Maturity windows and the boost fee that ends them early.
//!
//! The boost cost is `remaining_blocks * price_per_block(level)`, falling
//! linearly to zero exactly at `maturity_end`.

use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::{events, levels, positions, positions::Position, upgrade::BoostInit, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const ORCHESTRATOR: Symbol = symbol_short!("ORCH");
const BOOST_PRICE: Symbol = symbol_short!("BST_PX");

// ── Configuration ───────────────────────────────────────────────────────────

pub fn init(env: &Env, args: &BoostInit) -> Result<(), ContractError> {
    if args.reward_token == env.current_contract_address() {
        return Err(ContractError::InvalidInput);
    }
    env.storage()
        .instance()
        .set(&REWARD_TOKEN, &args.reward_token);
    env.storage()
        .instance()
        .set(&ORCHESTRATOR, &args.orchestrator);
    Ok(())
}

/// Asset used for boost fees and reward payouts.
pub fn reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(ContractError::FeatureNotEnabled)
}

pub fn orchestrator(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ORCHESTRATOR)
        .ok_or(ContractError::FeatureNotEnabled)
}

pub fn set_orchestrator(env: &Env, orchestrator: &Address) {
    env.storage().instance().set(&ORCHESTRATOR, orchestrator);
}

pub fn boost_price(env: &Env, level_id: u32) -> i128 {
    common::ttl::read_persistent(env, &(BOOST_PRICE, level_id)).unwrap_or(0)
}

pub fn set_boost_price(env: &Env, level_id: u32, price_per_block: i128) -> Result<(), ContractError> {
    if price_per_block < 0 {
        return Err(ContractError::InvalidInput);
    }
    levels::get_level(env, level_id)?;

    let key = (BOOST_PRICE, level_id);
    env.storage().persistent().set(&key, &price_per_block);
    common::ttl::extend_persistent(env, &key);

    events::publish_boost_price_set(env, level_id, price_per_block);
    Ok(())
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

pub fn remaining_blocks(env: &Env, position: &Position) -> u32 {
    position
        .maturity_end
        .saturating_sub(env.ledger().sequence())
}

pub fn is_under_maturity(env: &Env, position: &Position) -> bool {
    env.ledger().sequence() < position.maturity_end
}

pub fn remaining_boost_cost(env: &Env, position: &Position) -> i128 {
    let blocks = remaining_blocks(env, position) as i128;
    blocks.saturating_mul(boost_price(env, position.level_id))
}

// ── Boost ───────────────────────────────────────────────────────────────────

/// Ends the maturity window of `token_id` now, charging `payer` the
/// remaining cost in the reward asset through its allowance to this
/// contract.
pub fn boost(env: &Env, token_id: u64, payer: &Address) -> Result<i128, ContractError> {
    let mut position = positions::get(env, token_id)?;
    if !is_under_maturity(env, &position) {
        return Err(ContractError::MaturityPeriodEnded);
    }

    let blocks_skipped = remaining_blocks(env, &position);
    let cost = remaining_boost_cost(env, &position);

    if cost > 0 {
        let token = token::Client::new(env, &reward_token(env)?);
        let this = env.current_contract_address();
        if token.allowance(payer, &this) < cost {
            return Err(ContractError::InsufficientAllowance);
        }
        if token.balance(payer) < cost {
            return Err(ContractError::InsufficientBalance);
        }
        token.transfer_from(&this, payer, &this, &cost);
    }

    position.maturity_end = env.ledger().sequence();
    positions::store(env, &position);

    events::publish_boosted(env, token_id, payer.clone(), cost, blocks_skipped);
    Ok(cost)
}
