//! Command structs for engine operations.
//!
//! These types group parameters for write operations (register/purchase/
//! transfer/assign/expend), keeping call sites readable and avoiding long
//! argument lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::assets::AssetKind;
use crate::users::Role;

/// Register a new asset at a base.
#[derive(Clone, Debug)]
pub struct AssetNewCmd {
    pub name: String,
    pub kind: AssetKind,
    pub base_id: Uuid,
    pub opening_balance: i64,
}

impl AssetNewCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AssetKind, base_id: Uuid, opening_balance: i64) -> Self {
        Self {
            name: name.into(),
            kind,
            base_id,
            opening_balance,
        }
    }
}

/// Partial update for an asset. Balances are absent: they only move through
/// ledger operations.
#[derive(Clone, Debug, Default)]
pub struct AssetPatch {
    pub name: Option<String>,
    pub kind: Option<AssetKind>,
    pub base_id: Option<Uuid>,
}

impl AssetPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: AssetKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn base_id(mut self, base_id: Uuid) -> Self {
        self.base_id = Some(base_id);
        self
    }
}

/// Record a purchase of stock at a base.
#[derive(Clone, Debug)]
pub struct PurchaseCmd {
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

impl PurchaseCmd {
    #[must_use]
    pub fn new(asset_id: Uuid, base_id: Uuid, quantity: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            asset_id,
            base_id,
            quantity,
            occurred_at,
        }
    }
}

/// Move stock from one base to another.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub asset_id: Uuid,
    /// Source base. When absent the caller's home base is used.
    pub from_base_id: Option<Uuid>,
    pub to_base_id: Uuid,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

impl TransferCmd {
    #[must_use]
    pub fn new(asset_id: Uuid, to_base_id: Uuid, quantity: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            asset_id,
            from_base_id: None,
            to_base_id,
            quantity,
            occurred_at,
        }
    }

    #[must_use]
    pub fn from_base_id(mut self, from_base_id: Uuid) -> Self {
        self.from_base_id = Some(from_base_id);
        self
    }
}

/// Assign stock to personnel.
#[derive(Clone, Debug)]
pub struct AssignmentCmd {
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

impl AssignmentCmd {
    #[must_use]
    pub fn new(asset_id: Uuid, base_id: Uuid, quantity: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            asset_id,
            base_id,
            quantity,
            occurred_at,
        }
    }
}

/// Expend stock.
#[derive(Clone, Debug)]
pub struct ExpenditureCmd {
    pub asset_id: Uuid,
    pub base_id: Uuid,
    pub quantity: i64,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ExpenditureCmd {
    #[must_use]
    pub fn new(asset_id: Uuid, base_id: Uuid, quantity: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            asset_id,
            base_id,
            quantity,
            reason: None,
            occurred_at,
        }
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Create a user account.
#[derive(Clone, Debug)]
pub struct UserNewCmd {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Home base. Only kept when the role is base commander.
    pub base_id: Option<Uuid>,
}

impl UserNewCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
            base_id: None,
        }
    }

    #[must_use]
    pub fn base_id(mut self, base_id: Uuid) -> Self {
        self.base_id = Some(base_id);
        self
    }
}
