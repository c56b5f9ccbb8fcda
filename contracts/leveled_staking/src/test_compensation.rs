extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Vec};

use crate::{test::Harness, ContractError, Role};

#[test]
fn test_seed_and_claim_sum_to_seeded_total() {
    let h = Harness::latest();
    h.fund_reward(&h.contract, 1_000);
    let a = Address::generate(&h.env);
    let b = Address::generate(&h.env);
    let c = Address::generate(&h.env);

    let outcome = h.client.seed_lost_rewards(
        &h.seeder,
        &vec![&h.env, a.clone(), b.clone(), c.clone()],
        &vec![&h.env, 1u64, 2u64, 3u64],
        &vec![&h.env, 10i128, 20i128, 30i128],
    );
    assert_eq!(outcome.applied, 3);
    assert!(outcome.rejected.is_empty());
    assert_eq!(h.client.outstanding_lost_rewards(), 60);

    let paid = h.client.claim_lost_rewards(&a, &1)
        + h.client.claim_lost_rewards(&b, &2)
        + h.client.claim_lost_rewards(&c, &3);
    assert_eq!(paid, 60);
    assert_eq!(h.reward_balance(&a), 10);
    assert_eq!(h.reward_balance(&b), 20);
    assert_eq!(h.reward_balance(&c), 30);
    assert_eq!(h.reward_balance(&h.contract), 940);
    assert_eq!(h.client.outstanding_lost_rewards(), 0);
}

#[test]
fn test_second_claim_returns_zero() {
    let h = Harness::latest();
    h.fund_reward(&h.contract, 100);
    let owner = Address::generate(&h.env);
    h.client.seed_lost_rewards(
        &h.seeder,
        &vec![&h.env, owner.clone()],
        &vec![&h.env, 5u64],
        &vec![&h.env, 25i128],
    );

    assert_eq!(h.client.claim_lost_rewards(&owner, &5), 25);
    assert_eq!(h.client.claim_lost_rewards(&owner, &5), 0);
    assert_eq!(h.reward_balance(&owner), 25);

    let entry = h.client.get_lost_rewards(&owner, &5).unwrap();
    assert!(entry.claimed);
    assert_eq!(entry.amount, 25);
}

#[test]
fn test_claim_with_nothing_seeded_is_a_no_op() {
    let h = Harness::latest();
    let owner = Address::generate(&h.env);

    assert_eq!(h.client.claim_lost_rewards(&owner, &1), 0);
    assert_eq!(h.client.get_lost_rewards(&owner, &1), None);
}

#[test]
fn test_seed_reports_invalid_items() {
    let h = Harness::latest();
    let owner = Address::generate(&h.env);
    h.client.seed_lost_rewards(
        &h.seeder,
        &vec![&h.env, owner.clone()],
        &vec![&h.env, 1u64],
        &vec![&h.env, 10i128],
    );

    let outcome = h.client.seed_lost_rewards(
        &h.seeder,
        &vec![&h.env, owner.clone(), owner.clone(), owner.clone(), owner.clone()],
        &vec![&h.env, 1u64, 2u64, 0u64, 3u64],
        &vec![&h.env, 99i128, 0i128, 5i128, 7i128],
    );
    assert_eq!(outcome.applied, 1);
    let codes: std::vec::Vec<(u32, u32)> = outcome
        .rejected
        .iter()
        .map(|r| (r.index, r.error))
        .collect();
    assert_eq!(
        codes,
        std::vec![
            (0, ContractError::AlreadySeeded as u32),
            (1, ContractError::ValueCannotBeZero as u32),
            (2, ContractError::ValueCannotBeZero as u32),
        ]
    );
    // The earlier amount is untouched.
    assert_eq!(h.client.get_lost_rewards(&owner, &1).unwrap().amount, 10);
    assert_eq!(h.client.outstanding_lost_rewards(), 17);
}

#[test]
fn test_claimed_entry_is_never_reseeded() {
    let h = Harness::latest();
    h.fund_reward(&h.contract, 100);
    let owner = Address::generate(&h.env);
    let seed = |amount: i128| {
        h.client.seed_lost_rewards(
            &h.seeder,
            &vec![&h.env, owner.clone()],
            &vec![&h.env, 4u64],
            &vec![&h.env, amount],
        )
    };

    seed(10);
    h.client.claim_lost_rewards(&owner, &4);
    let outcome = seed(50);

    assert_eq!(outcome.applied, 0);
    assert_eq!(
        outcome.rejected.get(0).unwrap().error,
        ContractError::AlreadySeeded as u32
    );
    assert_eq!(h.client.claim_lost_rewards(&owner, &4), 0);
}

#[test]
fn test_seed_rejects_malformed_batches() {
    let h = Harness::latest();
    let owner = Address::generate(&h.env);

    let result = h.client.try_seed_lost_rewards(
        &h.seeder,
        &vec![&h.env, owner.clone()],
        &vec![&h.env, 1u64, 2u64],
        &vec![&h.env, 10i128],
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::BatchLengthMismatch),
        _ => unreachable!("Expected BatchLengthMismatch error"),
    }

    let owners: Vec<Address> = Vec::new(&h.env);
    let ids: Vec<u64> = Vec::new(&h.env);
    let amounts: Vec<i128> = Vec::new(&h.env);
    match h.client.try_seed_lost_rewards(&h.seeder, &owners, &ids, &amounts) {
        Err(Ok(e)) => assert_eq!(e, ContractError::EmptyBatch),
        _ => unreachable!("Expected EmptyBatch error"),
    }
}

#[test]
fn test_seeding_requires_reward_seeder_role() {
    let h = Harness::latest();
    let stranger = Address::generate(&h.env);
    assert!(h.client.has_role(&Role::RewardSeeder, &h.seeder));

    let result = h.client.try_seed_lost_rewards(
        &stranger,
        &vec![&h.env, stranger.clone()],
        &vec![&h.env, 1u64],
        &vec![&h.env, 10i128],
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::MissingRole),
        _ => unreachable!("Expected MissingRole error"),
    }
}

#[test]
fn test_claim_requires_reserve() {
    let h = Harness::latest();
    let owner = Address::generate(&h.env);
    h.client.seed_lost_rewards(
        &h.seeder,
        &vec![&h.env, owner.clone()],
        &vec![&h.env, 1u64],
        &vec![&h.env, 10i128],
    );

    match h.client.try_claim_lost_rewards(&owner, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientBalance),
        _ => unreachable!("Expected InsufficientBalance error"),
    }
    assert!(!h.client.get_lost_rewards(&owner, &1).unwrap().claimed);
}
