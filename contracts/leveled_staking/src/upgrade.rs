//! Versioned initializer table.
//!
//! Each version step carries exactly one initializer payload. Initializers
//! only add storage keys; nothing written by an earlier version is rewritten.

use common::roles::{self, Role};
use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::{delegation, events, gate, maturity, migration, ContractError};

/// Configuration for version 2 (maturity boost).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostInit {
    pub reward_token: Address,
    pub orchestrator: Address,
}

/// Configuration for version 3 (legacy migration and whitelist).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationInit {
    pub legacy_registry: Address,
    pub stake_token: Address,
    pub stake_vault: Address,
}

/// Configuration for version 4 (delegation).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationInit {
    pub validators: Vec<Address>,
}

/// Configuration for version 5 (lost-rewards compensation).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompensationInit {
    pub seeder: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VersionInit {
    Boost(BoostInit),
    Migration(MigrationInit),
    Delegation(DelegationInit),
    Compensation(CompensationInit),
}

impl VersionInit {
    /// The version this payload initializes.
    pub fn target_version(&self) -> u32 {
        match self {
            VersionInit::Boost(_) => gate::BOOST_VERSION,
            VersionInit::Migration(_) => gate::MIGRATION_VERSION,
            VersionInit::Delegation(_) => gate::DELEGATION_VERSION,
            VersionInit::Compensation(_) => gate::COMPENSATION_VERSION,
        }
    }
}

/// Runs the initializer for `version + 1`, bumps the version and, if a hash
/// is supplied, swaps the executing code. Returns the new version.
pub fn apply(
    env: &Env,
    caller: &Address,
    new_wasm_hash: Option<BytesN<32>>,
    init: &VersionInit,
) -> Result<u32, ContractError> {
    let from = gate::version(env);
    let target = from.checked_add(1).ok_or(ContractError::VersionMismatch)?;
    if target > gate::LATEST_VERSION || init.target_version() != target {
        return Err(ContractError::VersionMismatch);
    }

    match init {
        VersionInit::Boost(args) => maturity::init(env, args)?,
        VersionInit::Migration(args) => migration::init(env, args)?,
        VersionInit::Delegation(args) => delegation::init(env, args),
        VersionInit::Compensation(args) => {
            roles::grant_role(env, Role::RewardSeeder, &args.seeder);
        }
    }
    gate::set_version(env, target);
    common::ttl::extend_instance(env);

    let code_replaced = new_wasm_hash.is_some();
    if let Some(hash) = new_wasm_hash {
        env.deployer().update_current_contract_wasm(hash);
    }

    events::publish_upgraded(env, from, target, code_replaced, caller.clone());
    Ok(target)
}
