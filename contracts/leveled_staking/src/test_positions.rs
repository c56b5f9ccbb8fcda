extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::{
    test::{Harness, LEGACY_BOUNDARY},
    ContractError,
};

// ── Mint ──────────────────────────────────────────────────────────────────────

#[test]
fn test_mint_records_position() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(5);
    let owner = Address::generate(&h.env);

    h.set_block(42);
    let id = h.mint_to(level, &owner);
    assert_eq!(id, LEGACY_BOUNDARY + 1);

    let position = h.client.get_position(&id);
    assert_eq!(position.owner, owner);
    assert_eq!(position.level_id, level);
    assert_eq!(position.minted_at, 42);
    assert_eq!(position.stake_amount, 1_000);
    assert_eq!(position.maturity_end, 142);

    assert_eq!(h.client.next_token_id(), LEGACY_BOUNDARY + 2);
    assert_eq!(h.client.tokens_of(&owner).len(), 1);
    assert_eq!(h.client.balance_of(&owner), 1);
    assert_eq!(h.client.get_supply(&level).circulating, 1);
}

#[test]
fn test_mint_stops_at_cap() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(2);
    let owner = Address::generate(&h.env);
    h.mint_to(level, &owner);
    h.mint_to(level, &owner);

    let result = h.client.try_mint(&h.admin, &level, &owner);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::LevelCapReached),
        _ => unreachable!("Expected LevelCapReached error"),
    }
    // The failed mint must not consume an id.
    assert_eq!(h.client.next_token_id(), LEGACY_BOUNDARY + 3);
}

#[test]
fn test_mint_rejects_special_and_unknown_levels() {
    let h = Harness::at_version(1);
    let special = h.add_special_level(10);
    let owner = Address::generate(&h.env);

    match h.client.try_mint(&h.admin, &special, &owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::CannotMintXToken),
        _ => unreachable!("Expected CannotMintXToken error"),
    }
    match h.client.try_mint(&h.admin, &99, &owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::LevelNotFound),
        _ => unreachable!("Expected LevelNotFound error"),
    }
}

#[test]
fn test_mint_requires_minter_role() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(2);
    let stranger = Address::generate(&h.env);

    match h.client.try_mint(&stranger, &level, &stranger) {
        Err(Ok(e)) => assert_eq!(e, ContractError::MissingRole),
        _ => unreachable!("Expected MissingRole error"),
    }
}

// ── Burn ──────────────────────────────────────────────────────────────────────

#[test]
fn test_burn_removes_position_and_management() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(2);
    let owner = Address::generate(&h.env);
    let manager = Address::generate(&h.env);
    let id = h.mint_to(level, &owner);
    h.client.add_manager(&owner, &manager, &id);

    let released = h.client.burn(&h.admin, &id);
    assert_eq!(released, 1_000);
    assert_eq!(h.client.get_supply(&level).circulating, 0);
    assert_eq!(h.client.balance_of(&owner), 0);

    match h.client.try_get_position(&id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotFound),
        _ => unreachable!("Expected TokenNotFound error"),
    }
    match h.client.try_get_manager(&id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotFound),
        _ => unreachable!("Expected TokenNotFound error"),
    }
    match h.client.try_is_token_manager(&id, &manager) {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotFound),
        _ => unreachable!("Expected TokenNotFound error"),
    }
    match h.client.try_burn(&h.admin, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotFound),
        _ => unreachable!("Expected TokenNotFound error"),
    }
}

#[test]
fn test_burned_ids_are_not_reused() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(1);
    let owner = Address::generate(&h.env);

    let first = h.mint_to(level, &owner);
    h.client.burn(&h.admin, &first);
    let second = h.mint_to(level, &owner);
    assert_eq!(second, first + 1);
}

// ── Transfer ──────────────────────────────────────────────────────────────────

#[test]
fn test_transfer_moves_index_and_revokes_manager() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(5);
    let alice = Address::generate(&h.env);
    let bob = Address::generate(&h.env);
    let manager = Address::generate(&h.env);
    let id = h.mint_to(level, &alice);
    h.client.add_manager(&alice, &manager, &id);
    assert!(h.client.is_token_manager(&id, &manager));

    h.client.transfer(&alice, &bob, &id);

    assert_eq!(h.client.owner_of(&id), bob);
    assert_eq!(h.client.get_manager(&id), bob);
    assert!(!h.client.is_token_manager(&id, &manager));
    assert!(h.client.is_token_manager(&id, &bob));
    assert_eq!(h.client.balance_of(&alice), 0);
    assert_eq!(h.client.tokens_of(&bob).get(0), Some(id));
}

#[test]
fn test_transfer_by_non_owner_fails() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(5);
    let alice = Address::generate(&h.env);
    let mallory = Address::generate(&h.env);
    let id = h.mint_to(level, &alice);

    match h.client.try_transfer(&mallory, &mallory, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        _ => unreachable!("Expected NotOwner error"),
    }
    assert_eq!(h.client.owner_of(&id), alice);
}

// ── Managers ──────────────────────────────────────────────────────────────────

#[test]
fn test_manager_defaults_to_owner() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(5);
    let owner = Address::generate(&h.env);
    let id = h.mint_to(level, &owner);

    assert_eq!(h.client.get_manager(&id), owner);
    assert!(h.client.is_token_manager(&id, &owner));
}

#[test]
fn test_add_manager_rules() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(5);
    let owner = Address::generate(&h.env);
    let first = Address::generate(&h.env);
    let second = Address::generate(&h.env);
    let id = h.mint_to(level, &owner);

    match h.client.try_add_manager(&first, &second, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotOwner),
        _ => unreachable!("Expected NotOwner error"),
    }
    match h.client.try_add_manager(&owner, &owner, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::SelfManager),
        _ => unreachable!("Expected SelfManager error"),
    }

    h.client.add_manager(&owner, &first, &id);
    h.client.add_manager(&owner, &second, &id);
    assert_eq!(h.client.get_manager(&id), second);
    assert!(!h.client.is_token_manager(&id, &owner));
}

#[test]
fn test_remove_manager_rules() {
    let h = Harness::at_version(1);
    let level = h.add_standard_level(5);
    let owner = Address::generate(&h.env);
    let manager = Address::generate(&h.env);
    let stranger = Address::generate(&h.env);
    let id = h.mint_to(level, &owner);

    match h.client.try_remove_manager(&owner, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoTokenManager),
        _ => unreachable!("Expected NoTokenManager error"),
    }

    h.client.add_manager(&owner, &manager, &id);
    match h.client.try_remove_manager(&stranger, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotTokenManagerOrOwner),
        _ => unreachable!("Expected NotTokenManagerOrOwner error"),
    }

    // A manager may step down on its own.
    h.client.remove_manager(&manager, &id);
    assert_eq!(h.client.get_manager(&id), owner);
}
