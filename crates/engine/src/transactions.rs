//! Ledger transactions.
//!
//! A [`Transaction`] is the persisted record of one ledger operation on an
//! asset. All four kinds share one table, tagged by [`TransactionKind`], so
//! validation, balance mutation and movement logging run through a single
//! pipeline instead of four parallel ones.
//!
//! Single-base kinds (purchase, assignment, expenditure) record the base they
//! happened at; transfers record the source/destination pair. The two shapes
//! are modeled by [`TransactionSite`] and stored in nullable base columns.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Purchase,
    Transfer,
    Assignment,
    Expenditure,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Transfer => "transfer",
            Self::Assignment => "assignment",
            Self::Expenditure => "expenditure",
        }
    }

    /// Capitalized noun for user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Transfer => "Transfer",
            Self::Assignment => "Assignment",
            Self::Expenditure => "Expenditure",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "purchase" => Ok(Self::Purchase),
            "transfer" => Ok(Self::Transfer),
            "assignment" => Ok(Self::Assignment),
            "expenditure" => Ok(Self::Expenditure),
            other => Err(EngineError::Validation(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// Where a transaction happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "site", rename_all = "snake_case")]
pub enum TransactionSite {
    Base {
        base_id: Uuid,
    },
    Route {
        from_base_id: Uuid,
        to_base_id: Uuid,
    },
}

/// A persisted ledger operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    /// For transfers this is the source asset; the destination asset is
    /// resolved by name at the destination base.
    pub asset_id: Uuid,
    pub site: TransactionSite,
    pub quantity: i64,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        asset_id: Uuid,
        site: TransactionSite,
        quantity: i64,
        reason: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if quantity <= 0 {
            return Err(EngineError::Validation(
                "Quantity must be positive".to_string(),
            ));
        }
        match (kind, site) {
            (TransactionKind::Transfer, TransactionSite::Base { .. }) => {
                return Err(EngineError::Validation(
                    "transfer requires a source and destination base".to_string(),
                ));
            }
            (
                TransactionKind::Purchase
                | TransactionKind::Assignment
                | TransactionKind::Expenditure,
                TransactionSite::Route { .. },
            ) => {
                return Err(EngineError::Validation(format!(
                    "{} happens at a single base",
                    kind.as_str()
                )));
            }
            _ => {}
        }
        if let TransactionSite::Route {
            from_base_id,
            to_base_id,
        } = site
            && from_base_id == to_base_id
        {
            return Err(EngineError::Validation(
                "From and to base must differ".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            asset_id,
            site,
            quantity,
            reason,
            occurred_at,
        })
    }

    fn base_column(&self) -> Option<String> {
        match self.site {
            TransactionSite::Base { base_id } => Some(base_id.to_string()),
            TransactionSite::Route { .. } => None,
        }
    }

    fn from_base_column(&self) -> Option<String> {
        match self.site {
            TransactionSite::Base { .. } => None,
            TransactionSite::Route { from_base_id, .. } => Some(from_base_id.to_string()),
        }
    }

    fn to_base_column(&self) -> Option<String> {
        match self.site {
            TransactionSite::Base { .. } => None,
            TransactionSite::Route { to_base_id, .. } => Some(to_base_id.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub asset_id: String,
    pub base_id: Option<String>,
    pub from_base_id: Option<String>,
    pub to_base_id: Option<String>,
    pub quantity: i64,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
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

impl From<&Transaction> for ActiveModel {
    fn from(value: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            asset_id: ActiveValue::Set(value.asset_id.to_string()),
            base_id: ActiveValue::Set(value.base_column()),
            from_base_id: ActiveValue::Set(value.from_base_column()),
            to_base_id: ActiveValue::Set(value.to_base_column()),
            quantity: ActiveValue::Set(value.quantity),
            reason: ActiveValue::Set(value.reason.clone()),
            occurred_at: ActiveValue::Set(value.occurred_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = TransactionKind::try_from(model.kind.as_str())?;
        let site = match kind {
            TransactionKind::Transfer => {
                let (Some(from), Some(to)) = (&model.from_base_id, &model.to_base_id) else {
                    return Err(EngineError::Validation(
                        "transfer row is missing its route".to_string(),
                    ));
                };
                TransactionSite::Route {
                    from_base_id: parse_uuid(from, "base")?,
                    to_base_id: parse_uuid(to, "base")?,
                }
            }
            _ => {
                let Some(base) = &model.base_id else {
                    return Err(EngineError::Validation(
                        "transaction row is missing its base".to_string(),
                    ));
                };
                TransactionSite::Base {
                    base_id: parse_uuid(base, "base")?,
                }
            }
        };

        Ok(Self {
            id: parse_uuid(&model.id, "transaction")?,
            kind,
            asset_id: parse_uuid(&model.asset_id, "asset")?,
            site,
            quantity: model.quantity,
            reason: model.reason,
            occurred_at: model.occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_string() {
        for kind in [
            TransactionKind::Purchase,
            TransactionKind::Transfer,
            TransactionKind::Assignment,
            TransactionKind::Expenditure,
        ] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    #[should_panic(expected = "Quantity must be positive")]
    fn zero_quantity_is_rejected() {
        Transaction::new(
            TransactionKind::Purchase,
            Uuid::new_v4(),
            TransactionSite::Base {
                base_id: Uuid::new_v4(),
            },
            0,
            None,
            Utc::now(),
        )
        .unwrap();
    }

    #[test]
    #[should_panic(expected = "From and to base must differ")]
    fn transfer_to_the_same_base_is_rejected() {
        let base_id = Uuid::new_v4();
        Transaction::new(
            TransactionKind::Transfer,
            Uuid::new_v4(),
            TransactionSite::Route {
                from_base_id: base_id,
                to_base_id: base_id,
            },
            1,
            None,
            Utc::now(),
        )
        .unwrap();
    }

    #[test]
    #[should_panic(expected = "happens at a single base")]
    fn single_base_kind_cannot_carry_a_route() {
        Transaction::new(
            TransactionKind::Expenditure,
            Uuid::new_v4(),
            TransactionSite::Route {
                from_base_id: Uuid::new_v4(),
                to_base_id: Uuid::new_v4(),
            },
            1,
            None,
            Utc::now(),
        )
        .unwrap();
    }

    #[test]
    fn transfer_row_round_trips_its_route() {
        let tx = Transaction::new(
            TransactionKind::Transfer,
            Uuid::new_v4(),
            TransactionSite::Route {
                from_base_id: Uuid::new_v4(),
                to_base_id: Uuid::new_v4(),
            },
            4,
            None,
            Utc::now(),
        )
        .unwrap();

        let model = Model {
            id: tx.id.to_string(),
            kind: tx.kind.as_str().to_string(),
            asset_id: tx.asset_id.to_string(),
            base_id: None,
            from_base_id: tx.from_base_column(),
            to_base_id: tx.to_base_column(),
            quantity: tx.quantity,
            reason: None,
            occurred_at: tx.occurred_at,
        };

        assert_eq!(Transaction::try_from(model).unwrap(), tx);
    }

    #[test]
    #[should_panic(expected = "transfer row is missing its route")]
    fn transfer_row_without_route_is_rejected() {
        let model = Model {
            id: Uuid::new_v4().to_string(),
            kind: "transfer".to_string(),
            asset_id: Uuid::new_v4().to_string(),
            base_id: Some(Uuid::new_v4().to_string()),
            from_base_id: None,
            to_base_id: None,
            quantity: 4,
            reason: None,
            occurred_at: Utc::now(),
        };

        Transaction::try_from(model).unwrap();
    }
}
