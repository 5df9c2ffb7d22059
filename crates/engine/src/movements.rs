//! Asset movements.
//!
//! A [`Movement`] is a single append-only ledger entry recording one balance
//! change on an asset: the operation kind that caused it, the quantity moved
//! and a snapshot of the closing balance right after the change.
//!
//! Every kind carries a direction: purchases and incoming transfers add stock,
//! outgoing transfers, assignments and expenditures remove it. The effective
//! balance change of an entry is `direction * quantity`. Folding the effective
//! changes of an asset's movements in creation order from zero reproduces its
//! closing balance; the registration entry ("Initial stock") carries the
//! opening balance. Reversals append negated-quantity entries, existing rows
//! are never updated or deleted on their own.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// Kind of ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Purchase,
    TransferIn,
    TransferOut,
    Assignment,
    Expenditure,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::TransferIn => "transfer_in",
            Self::TransferOut => "transfer_out",
            Self::Assignment => "assignment",
            Self::Expenditure => "expenditure",
        }
    }

    /// Sign this kind applies to a quantity: +1 for inflows, -1 for outflows.
    pub fn direction(self) -> i64 {
        match self {
            Self::Purchase | Self::TransferIn => 1,
            Self::TransferOut | Self::Assignment | Self::Expenditure => -1,
        }
    }
}

impl TryFrom<&str> for MovementKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "purchase" => Ok(Self::Purchase),
            "transfer_in" => Ok(Self::TransferIn),
            "transfer_out" => Ok(Self::TransferOut),
            "assignment" => Ok(Self::Assignment),
            "expenditure" => Ok(Self::Expenditure),
            other => Err(EngineError::Validation(format!(
                "invalid movement kind: {other}"
            ))),
        }
    }
}

/// One ledger entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Movement {
    pub id: Uuid,
    pub asset_id: Uuid,
    /// Base the change was recorded at. Kept as history even after the base
    /// itself is deleted.
    pub base_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i64,
    pub balance_after: i64,
    pub created_by: Uuid,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Movement {
    pub fn new(
        asset_id: Uuid,
        base_id: Uuid,
        kind: MovementKind,
        quantity: i64,
        balance_after: i64,
        created_by: Uuid,
        remarks: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id,
            base_id,
            kind,
            quantity,
            balance_after,
            created_by,
            remarks,
            created_at: Utc::now(),
        }
    }

    /// Effective signed balance change this entry applied.
    pub fn effective_delta(&self) -> i64 {
        self.kind.direction() * self.quantity
    }
}

/// Fold movements in order and return the balance they replay to from zero.
pub fn replay_balance<'a, I>(movements: I) -> i64
where
    I: IntoIterator<Item = &'a Movement>,
{
    movements.into_iter().map(Movement::effective_delta).sum()
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "asset_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub asset_id: String,
    pub base_id: String,
    pub kind: String,
    pub quantity: i64,
    pub balance_after: i64,
    pub created_by: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assets::Entity",
        from = "Column::AssetId",
        to = "super::assets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Assets,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Movement> for ActiveModel {
    fn from(value: &Movement) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            asset_id: ActiveValue::Set(value.asset_id.to_string()),
            base_id: ActiveValue::Set(value.base_id.to_string()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            quantity: ActiveValue::Set(value.quantity),
            balance_after: ActiveValue::Set(value.balance_after),
            created_by: ActiveValue::Set(value.created_by.to_string()),
            remarks: ActiveValue::Set(value.remarks.clone()),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Movement {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "movement")?,
            asset_id: parse_uuid(&model.asset_id, "asset")?,
            base_id: parse_uuid(&model.base_id, "base")?,
            kind: MovementKind::try_from(model.kind.as_str())?,
            quantity: model.quantity,
            balance_after: model.balance_after,
            created_by: parse_uuid(&model.created_by, "user")?,
            remarks: model.remarks,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: MovementKind, quantity: i64, balance_after: i64) -> Movement {
        Movement::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            kind,
            quantity,
            balance_after,
            Uuid::new_v4(),
            None,
        )
    }

    #[test]
    fn inflow_kinds_add_outflow_kinds_remove() {
        assert_eq!(MovementKind::Purchase.direction(), 1);
        assert_eq!(MovementKind::TransferIn.direction(), 1);
        assert_eq!(MovementKind::TransferOut.direction(), -1);
        assert_eq!(MovementKind::Assignment.direction(), -1);
        assert_eq!(MovementKind::Expenditure.direction(), -1);
    }

    #[test]
    fn reversal_entries_negate_the_forward_delta() {
        let forward = entry(MovementKind::Expenditure, 6, 4);
        let reversal = entry(MovementKind::Expenditure, -6, 10);

        assert_eq!(forward.effective_delta(), -6);
        assert_eq!(reversal.effective_delta(), 6);
        assert_eq!(forward.effective_delta() + reversal.effective_delta(), 0);
    }

    #[test]
    fn replay_reproduces_the_balance_after_chain() {
        // Registration with 10 units, purchase of 5, transfer of 4 away,
        // expenditure of 6.
        let ledger = vec![
            entry(MovementKind::Purchase, 10, 10),
            entry(MovementKind::Purchase, 5, 15),
            entry(MovementKind::TransferOut, 4, 11),
            entry(MovementKind::Expenditure, 6, 5),
        ];

        assert_eq!(replay_balance(&ledger), 5);
        assert_eq!(
            replay_balance(&ledger),
            ledger.last().map(|m| m.balance_after).unwrap_or_default()
        );
    }

    #[test]
    fn kind_round_trips_through_storage_string() {
        for kind in [
            MovementKind::Purchase,
            MovementKind::TransferIn,
            MovementKind::TransferOut,
            MovementKind::Assignment,
            MovementKind::Expenditure,
        ] {
            assert_eq!(MovementKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    #[should_panic(expected = "invalid movement kind: disposal")]
    fn unknown_kind_is_rejected() {
        MovementKind::try_from("disposal").unwrap();
    }
}
