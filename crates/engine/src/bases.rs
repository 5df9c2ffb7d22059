//! The module contains the `Base` struct and its implementation.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// Name of the sentinel base.
///
/// Deleting a base reassigns its dependents to the base with this name instead
/// of cascading deletes, so the sentinel must exist before any base deletion.
pub const DEFAULT_BASE_NAME: &str = "Default Base";

/// A military base.
///
/// A base holds assets and is referenced by every ledger operation. Apart from
/// a rename, a base never changes once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Base {
    /// Stable identifier for this base.
    ///
    /// This is a UUID generated once and persisted in the database, so the
    /// base can be renamed without breaking references.
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

impl Base {
    pub fn new(name: String, location: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            location,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub location: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assets::Entity")]
    Assets,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Base> for ActiveModel {
    fn from(value: &Base) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            location: ActiveValue::Set(value.location.clone()),
        }
    }
}

impl TryFrom<Model> for Base {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "base")?,
            name: model.name,
            location: model.location,
        })
    }
}
