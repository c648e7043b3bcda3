//! Shared types for the staking contract suite.
//!
//! This crate provides:
//! - [`Role`] — the two privileged roles recognised across the platform.
//! - [`Tier`] — the staking duration tiers and their lock periods.
//! - Generated clients for every cross-contract seam, so each contract holds
//!   only the `Address` of its collaborators and any of them can be swapped
//!   out in tests or by an Admin rewiring call.

#![no_std]

pub mod interfaces;
pub mod roles;
pub mod tier;

pub use interfaces::*;
pub use roles::*;
pub use tier::*;
