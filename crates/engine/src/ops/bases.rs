//! Base lifecycle operations.
//!
//! Bases are close to immutable: rename is the only supported change. Deleting
//! a base never cascades into the records that reference it; dependents are
//! reassigned to the sentinel base ([`DEFAULT_BASE_NAME`]) so no dangling
//! references survive while history stays intact. Movements are the exception:
//! they keep the base they were recorded at.

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use crate::{Base, DEFAULT_BASE_NAME, EngineError, ResultEngine, assets, bases, transactions};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Create a new base with a unique name.
    pub async fn create_base(&self, name: &str, location: &str) -> ResultEngine<Base> {
        let name = normalize_required_name(name, "base name")?;
        let location = normalize_required_name(location, "location")?;

        with_tx!(self, |db_tx| {
            let existing = bases::Entity::find()
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::AlreadyExists("Base".to_string()));
            }

            let base = Base::new(name, location);
            bases::ActiveModel::from(&base).insert(&db_tx).await?;

            Ok(base)
        })
    }

    /// List every base, ordered by name.
    pub async fn list_bases(&self) -> ResultEngine<Vec<Base>> {
        let models = bases::Entity::find()
            .order_by_asc(bases::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Base::try_from).collect()
    }

    /// Rename a base. The only mutation a base supports.
    pub async fn rename_base(&self, base_id: Uuid, new_name: &str) -> ResultEngine<()> {
        let new_name = normalize_required_name(new_name, "base name")?;

        with_tx!(self, |db_tx| {
            let base = self.require_base(&db_tx, base_id).await?;
            let taken = bases::Entity::find()
                .filter(Expr::cust("LOWER(name)").eq(new_name.to_lowercase()))
                .filter(bases::Column::Id.ne(base.id.clone()))
                .one(&db_tx)
                .await?;
            if taken.is_some() {
                return Err(EngineError::AlreadyExists("Base".to_string()));
            }

            bases::ActiveModel {
                id: ActiveValue::Set(base.id),
                name: ActiveValue::Set(new_name),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            Ok(())
        })
    }

    /// Delete a base, reassigning every dependent record to the sentinel base.
    ///
    /// Assets move to the sentinel, transactions are repointed on whichever of
    /// their base columns referenced the deleted base. The sentinel must exist
    /// first and cannot itself be deleted.
    pub async fn delete_base(&self, base_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let base = self.require_base(&db_tx, base_id).await?;
            if base.name.eq_ignore_ascii_case(DEFAULT_BASE_NAME) {
                return Err(EngineError::Precondition(
                    "The Default Base cannot be deleted".to_string(),
                ));
            }

            let sentinel = bases::Entity::find()
                .filter(Expr::cust("LOWER(name)").eq(DEFAULT_BASE_NAME.to_lowercase()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::Precondition(
                        "Default Base not found. Please create it first.".to_string(),
                    )
                })?;

            // Reassignment must not break per-base asset name uniqueness.
            let sentinel_names: HashSet<String> = assets::Entity::find()
                .filter(assets::Column::BaseId.eq(sentinel.id.clone()))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|asset| asset.name.to_lowercase())
                .collect();
            let moved = assets::Entity::find()
                .filter(assets::Column::BaseId.eq(base.id.clone()))
                .all(&db_tx)
                .await?;
            if let Some(clash) = moved
                .iter()
                .find(|asset| sentinel_names.contains(&asset.name.to_lowercase()))
            {
                return Err(EngineError::Precondition(format!(
                    "Asset \"{}\" already exists at {}",
                    clash.name, DEFAULT_BASE_NAME
                )));
            }

            assets::Entity::update_many()
                .col_expr(assets::Column::BaseId, Expr::value(sentinel.id.clone()))
                .filter(assets::Column::BaseId.eq(base.id.clone()))
                .exec(&db_tx)
                .await?;
            transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::BaseId,
                    Expr::value(sentinel.id.clone()),
                )
                .filter(transactions::Column::BaseId.eq(base.id.clone()))
                .exec(&db_tx)
                .await?;
            transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::FromBaseId,
                    Expr::value(sentinel.id.clone()),
                )
                .filter(transactions::Column::FromBaseId.eq(base.id.clone()))
                .exec(&db_tx)
                .await?;
            transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::ToBaseId,
                    Expr::value(sentinel.id.clone()),
                )
                .filter(transactions::Column::ToBaseId.eq(base.id.clone()))
                .exec(&db_tx)
                .await?;

            bases::Entity::delete_by_id(base.id).exec(&db_tx).await?;

            Ok(())
        })
    }
}
