//! Shared access-control and storage utilities for the leveled staking
//! contracts.
//!
//! This crate provides:
//! - [`roles`]: the closed [`Role`] capability table checked by every
//!   privileged entry point.
//! - [`ttl`]: persistent and instance storage TTL bumping.

#![no_std]

pub mod roles;
pub mod ttl;

pub use roles::Role;
