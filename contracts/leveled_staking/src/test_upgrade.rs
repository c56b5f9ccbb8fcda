extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::{
    test::Harness, BoostInit, CompensationInit, ContractError, MigrationInit, Role, VersionInit,
};

#[test]
fn test_version_steps_by_exactly_one() {
    let h = Harness::at_version(1);
    for expected in 2..=crate::gate::LATEST_VERSION {
        assert_eq!(h.upgrade_next(), expected);
        assert_eq!(h.client.version(), expected);
    }
}

#[test]
fn test_init_must_match_next_version() {
    let h = Harness::at_version(1);
    let skip = VersionInit::Compensation(CompensationInit {
        seeder: h.seeder.clone(),
    });

    match h.client.try_upgrade(&h.admin, &None, &skip) {
        Err(Ok(e)) => assert_eq!(e, ContractError::VersionMismatch),
        _ => unreachable!("Expected VersionMismatch error"),
    }
    assert_eq!(h.client.version(), 1);
    assert!(!h.client.has_role(&Role::RewardSeeder, &h.seeder));
}

#[test]
fn test_no_upgrade_past_latest_version() {
    let h = Harness::latest();
    let again = VersionInit::Compensation(CompensationInit {
        seeder: h.seeder.clone(),
    });

    match h.client.try_upgrade(&h.admin, &None, &again) {
        Err(Ok(e)) => assert_eq!(e, ContractError::VersionMismatch),
        _ => unreachable!("Expected VersionMismatch error"),
    }
    assert_eq!(h.client.version(), crate::gate::LATEST_VERSION);
}

#[test]
fn test_upgrade_requires_upgrader_role() {
    let h = Harness::at_version(1);
    let stranger = Address::generate(&h.env);
    let init = h.next_init();

    match h.client.try_upgrade(&stranger, &None, &init) {
        Err(Ok(e)) => assert_eq!(e, ContractError::MissingRole),
        _ => unreachable!("Expected MissingRole error"),
    }

    h.client.grant_role(&h.admin, &Role::Upgrader, &stranger);
    assert_eq!(h.client.upgrade(&stranger, &None, &init), 2);
}

#[test]
fn test_failed_initializer_rolls_back() {
    let h = Harness::at_version(2);
    let bad = VersionInit::Migration(MigrationInit {
        legacy_registry: h.registry.clone(),
        stake_token: h.reward_token.clone(),
        stake_vault: h.vault.clone(),
    });

    match h.client.try_upgrade(&h.admin, &None, &bad) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(h.client.version(), 2);
    match h.client.try_migrate(&1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::FeatureNotEnabled),
        _ => unreachable!("Expected FeatureNotEnabled error"),
    }

    assert_eq!(h.upgrade_next(), 3);
}

#[test]
fn test_boost_init_rejects_contract_as_reward_token() {
    let h = Harness::at_version(1);
    let bad = VersionInit::Boost(BoostInit {
        reward_token: h.contract.clone(),
        orchestrator: h.orchestrator.clone(),
    });

    match h.client.try_upgrade(&h.admin, &None, &bad) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(h.client.version(), 1);
}

#[test]
fn test_upgrades_preserve_existing_state() {
    let h = Harness::at_version(1);
    h.set_block(5);
    let level = h.add_standard_level(5);
    let owner = Address::generate(&h.env);
    let manager = Address::generate(&h.env);
    let id = h.mint_to(level, &owner);
    h.client.add_manager(&owner, &manager, &id);
    let before = h.client.get_position(&id);

    while h.client.version() < crate::gate::LATEST_VERSION {
        h.upgrade_next();
    }

    assert_eq!(h.client.get_position(&id), before);
    assert_eq!(h.client.get_manager(&id), manager);
    assert_eq!(h.client.get_supply(&level).circulating, 1);
    assert_eq!(h.client.get_level(&level).stake_required, 1_000);
    assert_eq!(h.client.next_token_id(), id + 1);
    for role in Role::ALL {
        assert!(h.client.has_role(&role, &h.admin));
    }

    // Positions minted before the boost version can be boosted once it lands.
    assert!(h.client.is_under_maturity(&id));
    assert_eq!(h.client.boost(&owner, &id), 0);
}

#[test]
fn test_compensation_init_grants_seeder_role() {
    let h = Harness::at_version(4);
    assert!(!h.client.has_role(&Role::RewardSeeder, &h.seeder));

    h.upgrade_next();
    assert!(h.client.has_role(&Role::RewardSeeder, &h.seeder));
}
