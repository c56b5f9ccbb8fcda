use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ttl;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_LIST: Symbol = symbol_short!("ROLE_LST");

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Closed set of capabilities recognised by the staking contracts.
///
/// - `Admin`        – Grants and revokes roles, rewires external addresses.
/// - `Operator`     – Manages levels, caps, boost prices and validators.
/// - `Minter`       – The orchestration boundary: mints and burns positions.
/// - `Pauser`       – Flips the global pause flag.
/// - `Upgrader`     – Runs version initializers and swaps the contract code.
/// - `Whitelister`  – Maintains migration whitelist entries.
/// - `RewardSeeder` – Seeds the lost-rewards compensation ledger.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Operator = 2,
    Minter = 3,
    Pauser = 4,
    Upgrader = 5,
    Whitelister = 6,
    RewardSeeder = 7,
}

impl Role {
    /// Every role, in discriminant order.
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Operator,
        Role::Minter,
        Role::Pauser,
        Role::Upgrader,
        Role::Whitelister,
        Role::RewardSeeder,
    ];
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn list_key(role: Role) -> (Symbol, Role) {
    (ROLE_LIST, role)
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns true if `account` currently holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        ttl::extend_persistent(env, &key);
    }
    held
}

/// Grants `role` to `account`.
///
/// Only callable internally; callers must verify authorization beforehand.
/// Returns `false` if the account already held the role.
pub fn grant_role(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);

    let mut members = role_members(env, role);
    members.push_back(account.clone());
    env.storage().persistent().set(&list_key(role), &members);
    true
}

/// Revokes `role` from `account`. Returns `false` if it was not held.
pub fn revoke_role(env: &Env, role: Role, account: &Address) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));

    let members = role_members(env, role);
    let mut remaining = Vec::new(env);
    for member in members.iter() {
        if member != *account {
            remaining.push_back(member);
        }
    }
    env.storage().persistent().set(&list_key(role), &remaining);
    true
}

/// Returns every account holding `role`, in grant order.
pub fn role_members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&list_key(role))
        .unwrap_or(Vec::new(env))
}

/// Grants every role to the bootstrap admin during initialization.
pub fn bootstrap(env: &Env, admin: &Address) {
    for role in Role::ALL {
        grant_role(env, role, admin);
    }
}
