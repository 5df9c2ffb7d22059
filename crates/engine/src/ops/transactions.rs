//! Ledger transaction operations.
//!
//! Creation and reversal share one pipeline: check the asset, guard the
//! balance, persist the record, append the movement entries, all inside a
//! single database transaction.

mod common;
mod create;
mod delete;
mod list;
mod transfer;

pub use list::TransactionListFilter;
