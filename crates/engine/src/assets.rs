//! The module contains the `Asset` struct and its implementation.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// Kind of stock an asset represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Vehicle,
    Weapon,
    Ammunition,
    Equipment,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vehicle => "Vehicle",
            Self::Weapon => "Weapon",
            Self::Ammunition => "Ammunition",
            Self::Equipment => "Equipment",
        }
    }
}

impl TryFrom<&str> for AssetKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Vehicle" => Ok(Self::Vehicle),
            "Weapon" => Ok(Self::Weapon),
            "Ammunition" => Ok(Self::Ammunition),
            "Equipment" => Ok(Self::Equipment),
            other => Err(EngineError::Validation(format!(
                "invalid asset kind: {other}"
            ))),
        }
    }
}

/// An asset.
///
/// An asset tracks how much of one kind of stock a base holds. The opening
/// balance is the baseline recorded at registration and never changes; the
/// closing balance is the current on-hand quantity and moves with every ledger
/// operation. Destination assets created by a transfer start with both
/// balances at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    /// Stable identifier for this asset.
    ///
    /// This is a UUID generated once and persisted in the database, so the
    /// asset can be renamed or moved without breaking references.
    pub id: Uuid,
    pub name: String,
    pub kind: AssetKind,
    pub base_id: Uuid,
    pub opening_balance: i64,
    pub closing_balance: i64,
}

impl Asset {
    pub fn new(name: String, kind: AssetKind, base_id: Uuid, opening_balance: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            base_id,
            opening_balance,
            closing_balance: opening_balance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub kind: String,
    pub base_id: String,
    pub opening_balance: i64,
    pub closing_balance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bases::Entity",
        from = "Column::BaseId",
        to = "super::bases::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Bases,
    #[sea_orm(has_many = "super::movements::Entity")]
    Movements,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::bases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bases.def()
    }
}

impl Related<super::movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Asset> for ActiveModel {
    fn from(value: &Asset) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            base_id: ActiveValue::Set(value.base_id.to_string()),
            opening_balance: ActiveValue::Set(value.opening_balance),
            closing_balance: ActiveValue::Set(value.closing_balance),
        }
    }
}

impl TryFrom<Model> for Asset {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "asset")?,
            name: model.name,
            kind: AssetKind::try_from(model.kind.as_str())?,
            base_id: parse_uuid(&model.base_id, "base")?,
            opening_balance: model.opening_balance,
            closing_balance: model.closing_balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_asset_starts_at_opening_balance() {
        let asset = Asset::new("M4".to_string(), AssetKind::Weapon, Uuid::new_v4(), 40);

        assert_eq!(asset.opening_balance, 40);
        assert_eq!(asset.closing_balance, 40);
    }

    #[test]
    fn kind_round_trips_through_storage_string() {
        for kind in [
            AssetKind::Vehicle,
            AssetKind::Weapon,
            AssetKind::Ammunition,
            AssetKind::Equipment,
        ] {
            assert_eq!(AssetKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    #[should_panic(expected = "invalid asset kind: Drone")]
    fn unknown_kind_is_rejected() {
        AssetKind::try_from("Drone").unwrap();
    }
}
