#![no_std]

pub mod batch;
pub mod compensation;
pub mod delegation;
pub mod errors;
pub mod events;
pub mod gate;
pub mod legacy;
pub mod levels;
pub mod managers;
pub mod maturity;
pub mod migration;
pub mod positions;
pub mod upgrade;
pub mod whitelist;

pub use batch::{BatchItemError, BatchOutcome};
pub use common::Role;
pub use compensation::LostRewardEntry;
pub use delegation::{DelegationRecord, DelegationStatus};
pub use errors::{ContractError, ErrorCategory};
pub use legacy::LegacyHolding;
pub use levels::{Level, LevelSpec, LevelSupply, SupplyCheckpoint};
pub use positions::Position;
pub use upgrade::{BoostInit, CompensationInit, DelegationInit, MigrationInit, VersionInit};
pub use whitelist::WhitelistEntry;

use common::{roles, ttl};
use gate::{BASE_VERSION, BOOST_VERSION, COMPENSATION_VERSION, DELEGATION_VERSION, MIGRATION_VERSION};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LeveledStakingContract;

#[contractimpl]
impl LeveledStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract at version 1.
    ///
    /// * `admin`           – receives every role.
    /// * `legacy_boundary` – highest id reserved for migrated and whitelisted
    ///   positions; fresh mints start right above it.
    pub fn initialize(env: Env, admin: Address, legacy_boundary: u64) -> Result<(), ContractError> {
        if gate::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        positions::init(&env, legacy_boundary);
        roles::bootstrap(&env, &admin);
        gate::mark_initialized(&env);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, admin, legacy_boundary);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        gate::is_initialized(&env)
    }

    // ── Roles ───────────────────────────────────────────────────────────────

    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Admin, &caller)?;

        if roles::grant_role(&env, role, &account) {
            events::publish_role_changed(&env, role, account, true, caller);
        }
        Ok(())
    }

    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Admin, &caller)?;

        if roles::revoke_role(&env, role, &account) {
            events::publish_role_changed(&env, role, account, false, caller);
        }
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        roles::has_role(&env, role, &account)
    }

    pub fn role_members(env: Env, role: Role) -> Vec<Address> {
        roles::role_members(&env, role)
    }

    // ── Pause & upgrade ─────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        gate::require_initialized(&env)?;
        caller.require_auth();
        gate::set_paused(&env, &caller, true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        gate::require_initialized(&env)?;
        caller.require_auth();
        gate::set_paused(&env, &caller, false)
    }

    pub fn is_paused(env: Env) -> bool {
        gate::is_paused(&env)
    }

    pub fn version(env: Env) -> u32 {
        gate::version(&env)
    }

    /// Step to the next version. Runs while paused so a paused contract can
    /// be fixed in place.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: Option<BytesN<32>>,
        init: VersionInit,
    ) -> Result<u32, ContractError> {
        gate::require_initialized(&env)?;
        caller.require_auth();
        gate::require_role(&env, Role::Upgrader, &caller)?;

        upgrade::apply(&env, &caller, new_wasm_hash, &init)
    }

    // ── Levels ──────────────────────────────────────────────────────────────

    pub fn add_level(
        env: Env,
        caller: Address,
        spec: LevelSpec,
        cap: u32,
        initial_circulating: u32,
    ) -> Result<u32, ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Operator, &caller)?;

        levels::add_level(&env, spec, cap, initial_circulating)
    }

    pub fn update_level(
        env: Env,
        caller: Address,
        level_id: u32,
        spec: LevelSpec,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Operator, &caller)?;

        levels::update_level(&env, level_id, spec).map(|_| ())
    }

    pub fn set_level_cap(
        env: Env,
        caller: Address,
        level_id: u32,
        cap: u32,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Operator, &caller)?;

        levels::set_cap(&env, level_id, cap).map(|_| ())
    }

    pub fn get_level(env: Env, level_id: u32) -> Result<Level, ContractError> {
        levels::get_level(&env, level_id)
    }

    pub fn get_supply(env: Env, level_id: u32) -> Result<LevelSupply, ContractError> {
        levels::get_supply(&env, level_id)
    }

    pub fn max_level_id(env: Env) -> u32 {
        levels::max_level_id(&env)
    }

    pub fn circulating_at(env: Env, level_id: u32, block: u32) -> Result<u32, ContractError> {
        levels::circulating_at(&env, level_id, block)
    }

    /// One page of the checkpoint history, at most `MAX_HISTORY_PAGE`
    /// entries from index `start`.
    pub fn supply_history(
        env: Env,
        level_id: u32,
        start: u32,
        limit: u32,
    ) -> Result<Vec<SupplyCheckpoint>, ContractError> {
        levels::get_supply(&env, level_id)?;
        Ok(levels::supply_history(&env, level_id, start, limit))
    }

    pub fn supply_history_len(env: Env, level_id: u32) -> Result<u32, ContractError> {
        levels::get_supply(&env, level_id)?;
        Ok(levels::history_len(&env, level_id))
    }

    // ── Positions ───────────────────────────────────────────────────────────

    /// Mint a position at `level_id` for `owner`. Called by the orchestration
    /// layer after it has collected the stake.
    pub fn mint(env: Env, caller: Address, level_id: u32, owner: Address) -> Result<u64, ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Minter, &caller)?;

        positions::mint(&env, level_id, &owner).map(|p| p.id)
    }

    /// Burn a position and return its recorded stake for release.
    pub fn burn(env: Env, caller: Address, token_id: u64) -> Result<i128, ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Minter, &caller)?;

        positions::burn(&env, token_id).map(|p| p.stake_amount)
    }

    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        from.require_auth();

        positions::transfer(&env, &from, &to, token_id).map(|_| ())
    }

    pub fn add_manager(
        env: Env,
        owner: Address,
        manager: Address,
        token_id: u64,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        owner.require_auth();

        managers::add_manager(&env, &owner, &manager, token_id)
    }

    pub fn remove_manager(env: Env, caller: Address, token_id: u64) -> Result<(), ContractError> {
        gate::require_live(&env, BASE_VERSION)?;
        caller.require_auth();

        managers::remove_manager(&env, &caller, token_id)
    }

    pub fn get_position(env: Env, token_id: u64) -> Result<Position, ContractError> {
        positions::get(&env, token_id)
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, ContractError> {
        positions::get(&env, token_id).map(|p| p.owner)
    }

    pub fn get_manager(env: Env, token_id: u64) -> Result<Address, ContractError> {
        managers::get_manager(&env, token_id)
    }

    pub fn is_token_manager(env: Env, token_id: u64, account: Address) -> Result<bool, ContractError> {
        managers::is_token_manager(&env, token_id, &account)
    }

    pub fn tokens_of(env: Env, owner: Address) -> Vec<u64> {
        positions::tokens_of(&env, &owner)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        positions::tokens_of(&env, &owner).len()
    }

    pub fn next_token_id(env: Env) -> u64 {
        positions::next_token_id(&env)
    }

    pub fn legacy_boundary(env: Env) -> u64 {
        positions::legacy_boundary(&env)
    }

    // ── Maturity & boost (v2) ───────────────────────────────────────────────

    pub fn maturity_end(env: Env, token_id: u64) -> Result<u32, ContractError> {
        positions::get(&env, token_id).map(|p| p.maturity_end)
    }

    pub fn is_under_maturity(env: Env, token_id: u64) -> Result<bool, ContractError> {
        let position = positions::get(&env, token_id)?;
        Ok(maturity::is_under_maturity(&env, &position))
    }

    pub fn boost_price(env: Env, level_id: u32) -> i128 {
        maturity::boost_price(&env, level_id)
    }

    pub fn set_boost_price(
        env: Env,
        caller: Address,
        level_id: u32,
        price_per_block: i128,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, BOOST_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Operator, &caller)?;

        maturity::set_boost_price(&env, level_id, price_per_block)
    }

    pub fn remaining_boost_cost(env: Env, token_id: u64) -> Result<i128, ContractError> {
        gate::require_version(&env, BOOST_VERSION)?;
        let position = positions::get(&env, token_id)?;
        Ok(maturity::remaining_boost_cost(&env, &position))
    }

    /// Skip the rest of the maturity window, paid from `payer`'s allowance.
    pub fn boost(env: Env, payer: Address, token_id: u64) -> Result<i128, ContractError> {
        gate::require_live(&env, BOOST_VERSION)?;
        payer.require_auth();

        maturity::boost(&env, token_id, &payer)
    }

    /// Orchestrator-initiated boost, paid from the position owner's allowance.
    pub fn boost_for(env: Env, caller: Address, token_id: u64) -> Result<i128, ContractError> {
        gate::require_live(&env, BOOST_VERSION)?;
        caller.require_auth();
        if caller != maturity::orchestrator(&env)? {
            return Err(ContractError::UnauthorizedCaller);
        }

        let owner = positions::get(&env, token_id)?.owner;
        maturity::boost(&env, token_id, &owner)
    }

    pub fn set_orchestrator(
        env: Env,
        caller: Address,
        orchestrator: Address,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, BOOST_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Admin, &caller)?;

        maturity::set_orchestrator(&env, &orchestrator);
        events::publish_orchestrator_set(&env, orchestrator, caller);
        Ok(())
    }

    pub fn get_orchestrator(env: Env) -> Result<Address, ContractError> {
        maturity::orchestrator(&env)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        maturity::reward_token(&env)
    }

    // ── Migration (v3) ──────────────────────────────────────────────────────

    /// Bring a legacy holding over at its legacy id. The legacy holder
    /// authorizes.
    pub fn migrate(env: Env, legacy_token_id: u64) -> Result<u64, ContractError> {
        gate::require_live(&env, MIGRATION_VERSION)?;

        migration::migrate(&env, legacy_token_id).map(|p| p.id)
    }

    pub fn migrate_from_whitelist(
        env: Env,
        caller: Address,
        token_id: u64,
    ) -> Result<u64, ContractError> {
        gate::require_live(&env, MIGRATION_VERSION)?;
        caller.require_auth();

        migration::migrate_from_whitelist(&env, &caller, token_id).map(|p| p.id)
    }

    pub fn add_whitelist_entries(
        env: Env,
        caller: Address,
        entries: Vec<WhitelistEntry>,
    ) -> Result<BatchOutcome, ContractError> {
        gate::require_live(&env, MIGRATION_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Whitelister, &caller)?;

        whitelist::add_batch(&env, &entries)
    }

    pub fn remove_whitelist_entries(
        env: Env,
        caller: Address,
        token_ids: Vec<u64>,
    ) -> Result<BatchOutcome, ContractError> {
        gate::require_live(&env, MIGRATION_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Whitelister, &caller)?;

        whitelist::remove_batch(&env, &token_ids)
    }

    pub fn get_whitelist_entry(env: Env, token_id: u64) -> Option<WhitelistEntry> {
        whitelist::get(&env, token_id)
    }

    pub fn whitelisted_token_of(env: Env, owner: Address) -> Option<u64> {
        whitelist::token_of(&env, &owner)
    }

    pub fn is_migrated(env: Env, token_id: u64) -> bool {
        migration::is_migrated(&env, token_id)
    }

    pub fn set_legacy_registry(
        env: Env,
        caller: Address,
        registry: Address,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, MIGRATION_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Admin, &caller)?;

        migration::set_legacy_registry(&env, &registry);
        events::publish_legacy_registry_set(&env, registry, caller);
        Ok(())
    }

    pub fn set_stake_vault(env: Env, caller: Address, vault: Address) -> Result<(), ContractError> {
        gate::require_live(&env, MIGRATION_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Admin, &caller)?;

        migration::set_stake_vault(&env, &vault);
        events::publish_stake_vault_set(&env, vault, caller);
        Ok(())
    }

    // ── Delegation (v4) ─────────────────────────────────────────────────────

    pub fn add_validator(env: Env, caller: Address, validator: Address) -> Result<(), ContractError> {
        gate::require_live(&env, DELEGATION_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Operator, &caller)?;

        delegation::add_validator(&env, &validator);
        Ok(())
    }

    pub fn remove_validator(
        env: Env,
        caller: Address,
        validator: Address,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, DELEGATION_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::Operator, &caller)?;

        delegation::remove_validator(&env, &validator)
    }

    pub fn is_validator(env: Env, validator: Address) -> bool {
        delegation::is_validator(&env, &validator)
    }

    pub fn delegate(
        env: Env,
        caller: Address,
        token_id: u64,
        validator: Address,
    ) -> Result<(), ContractError> {
        gate::require_live(&env, DELEGATION_VERSION)?;
        caller.require_auth();

        delegation::delegate(&env, &caller, token_id, &validator)
    }

    pub fn request_exit(env: Env, caller: Address, token_id: u64) -> Result<(), ContractError> {
        gate::require_live(&env, DELEGATION_VERSION)?;
        caller.require_auth();

        delegation::request_exit(&env, &caller, token_id)
    }

    pub fn pending_rewards(env: Env, token_id: u64) -> Result<i128, ContractError> {
        gate::require_version(&env, DELEGATION_VERSION)?;
        delegation::pending_rewards(&env, token_id)
    }

    pub fn claim_rewards(env: Env, caller: Address, token_id: u64) -> Result<i128, ContractError> {
        gate::require_live(&env, DELEGATION_VERSION)?;
        caller.require_auth();

        delegation::claim(&env, &caller, token_id)
    }

    pub fn get_delegation(env: Env, token_id: u64) -> Result<DelegationRecord, ContractError> {
        delegation::get_delegation(&env, token_id)
    }

    // ── Lost-rewards compensation (v5) ──────────────────────────────────────

    pub fn seed_lost_rewards(
        env: Env,
        caller: Address,
        owners: Vec<Address>,
        token_ids: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<BatchOutcome, ContractError> {
        gate::require_live(&env, COMPENSATION_VERSION)?;
        caller.require_auth();
        gate::require_role(&env, Role::RewardSeeder, &caller)?;

        compensation::seed(&env, &owners, &token_ids, &amounts)
    }

    pub fn claim_lost_rewards(env: Env, owner: Address, token_id: u64) -> Result<i128, ContractError> {
        gate::require_live(&env, COMPENSATION_VERSION)?;
        owner.require_auth();

        compensation::claim(&env, &owner, token_id)
    }

    pub fn get_lost_rewards(env: Env, owner: Address, token_id: u64) -> Option<LostRewardEntry> {
        compensation::get(&env, &owner, token_id)
    }

    pub fn outstanding_lost_rewards(env: Env) -> i128 {
        compensation::outstanding(&env)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_positions;




#[cfg(test)]
mod test_compensation;

#[cfg(test)]
mod test_upgrade;
