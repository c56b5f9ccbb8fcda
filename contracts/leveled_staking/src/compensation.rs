//! Lost-rewards ledger: one-shot compensation for rewards forfeited by
//! positions that were burned or migrated while delegated.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, token, Address, Env, Symbol, Vec};

use crate::{batch::BatchOutcome, events, maturity, ContractError};

const LOST: Symbol = symbol_short!("LOST");
const OUTSTANDING: Symbol = symbol_short!("LOST_OUT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LostRewardEntry {
    pub owner: Address,
    pub token_id: u64,
    pub amount: i128,
    pub claimed: bool,
}

fn entry_key(owner: &Address, token_id: u64) -> (Symbol, Address, u64) {
    (LOST, owner.clone(), token_id)
}

pub fn get(env: &Env, owner: &Address, token_id: u64) -> Option<LostRewardEntry> {
    ttl::read_persistent(env, &entry_key(owner, token_id))
}

/// Seeded but not yet claimed, summed over every entry.
pub fn outstanding(env: &Env) -> i128 {
    env.storage().instance().get(&OUTSTANDING).unwrap_or(0)
}

fn adjust_outstanding(env: &Env, delta: i128) {
    let total = outstanding(env).saturating_add(delta);
    env.storage().instance().set(&OUTSTANDING, &total);
}

fn store(env: &Env, entry: &LostRewardEntry) {
    let key = entry_key(&entry.owner, entry.token_id);
    env.storage().persistent().set(&key, entry);
    ttl::extend_persistent(env, &key);
}

fn seed_one(env: &Env, owner: &Address, token_id: u64, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 || token_id == 0 {
        return Err(ContractError::ValueCannotBeZero);
    }
    // Claimed entries also count as seeded and are never rewritten.
    if get(env, owner, token_id).is_some() {
        return Err(ContractError::AlreadySeeded);
    }
    store(
        env,
        &LostRewardEntry {
            owner: owner.clone(),
            token_id,
            amount,
            claimed: false,
        },
    );
    adjust_outstanding(env, amount);
    events::publish_lost_rewards_seeded(env, owner.clone(), token_id, amount);
    Ok(())
}

/// Records compensation amounts from three parallel vectors.
pub fn seed(
    env: &Env,
    owners: &Vec<Address>,
    token_ids: &Vec<u64>,
    amounts: &Vec<i128>,
) -> Result<BatchOutcome, ContractError> {
    if owners.len() != token_ids.len() || owners.len() != amounts.len() {
        return Err(ContractError::BatchLengthMismatch);
    }
    if owners.is_empty() {
        return Err(ContractError::EmptyBatch);
    }

    let mut outcome = BatchOutcome::new(env);
    for i in 0..owners.len() {
        let result = match (owners.get(i), token_ids.get(i), amounts.get(i)) {
            (Some(owner), Some(token_id), Some(amount)) => seed_one(env, &owner, token_id, amount),
            _ => Err(ContractError::BatchLengthMismatch),
        };
        outcome.record(i, result);
    }
    events::publish_batch_applied(
        env,
        symbol_short!("LOST_SEED"),
        outcome.applied,
        outcome.rejected_count(),
    );
    Ok(outcome)
}

/// Pays the seeded amount to `owner` once. Repeat claims and claims with
/// nothing seeded return 0 and move nothing.
pub fn claim(env: &Env, owner: &Address, token_id: u64) -> Result<i128, ContractError> {
    let mut entry = match get(env, owner, token_id) {
        Some(e) if !e.claimed => e,
        _ => return Ok(0),
    };

    let reward = token::Client::new(env, &maturity::reward_token(env)?);
    let this = env.current_contract_address();
    if reward.balance(&this) < entry.amount {
        return Err(ContractError::InsufficientBalance);
    }
    reward.transfer(&this, owner, &entry.amount);

    entry.claimed = true;
    store(env, &entry);
    adjust_outstanding(env, -entry.amount);

    events::publish_lost_rewards_claimed(env, owner.clone(), token_id, entry.amount);
    Ok(entry.amount)
}
