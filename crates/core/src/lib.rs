//! Core business logic for Splitledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Groups, members and expenses come in as plain values; pairwise balances,
//! simplified transfers and per-person totals come out.
//!
//! # Modules
//!
//! - `ledger` - Group data model, balance calculation and debt simplification
//! - `currency` - Exchange rate port and the conversion fallback policy

pub mod currency;
pub mod ledger;
