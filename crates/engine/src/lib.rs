//! # Quartermaster Engine
//!
//! The ledger core of the quartermaster service: assets held at bases, the
//! transactions that move them, and the append-only movement ledger that keeps
//! every balance auditable.
//!
//! The [`Engine`] owns a database connection and exposes one method per
//! operation. Every write runs inside a single database transaction: balance
//! mutation, transaction record and movement append commit together or not at
//! all. Deleting a transaction record reverses its balance effect and appends
//! compensating movements; ledger rows themselves are never edited.
//!
//! Callers authenticate at the boundary and pass an [`Actor`] into the
//! operations that record identity or depend on the caller's role.

mod error;
mod ops;
mod util;

pub mod assets;
pub mod bases;
pub mod commands;
pub mod movements;
pub mod transactions;
pub mod users;

pub use assets::{Asset, AssetKind};
pub use bases::{Base, DEFAULT_BASE_NAME};
pub use commands::{
    AssetNewCmd, AssetPatch, AssignmentCmd, ExpenditureCmd, PurchaseCmd, TransferCmd, UserNewCmd,
};
pub use error::EngineError;
pub use movements::{Movement, MovementKind, replay_balance};
pub use ops::{Engine, EngineBuilder, TransactionListFilter};
pub use transactions::{Transaction, TransactionKind, TransactionSite};
pub use users::{Actor, Role, User};

/// Result type of the engine
pub type ResultEngine<T> = Result<T, EngineError>;
