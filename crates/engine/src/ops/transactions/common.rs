//! Shared pieces of the ledger write pipeline.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    EngineError, Movement, MovementKind, ResultEngine, assets, movements, users::Actor,
};

use super::super::Engine;

impl Engine {
    /// Apply a balance change to an asset row with an optimistic guard.
    ///
    /// The change is rejected before any write when it would take the closing
    /// balance below zero. The UPDATE itself only matches the balance this
    /// pipeline read, so a concurrent writer that committed first turns the
    /// stale write into a conflict instead of a lost update.
    pub(super) async fn apply_balance_change(
        &self,
        db_tx: &impl ConnectionTrait,
        asset: &assets::Model,
        delta: i64,
        action: &str,
    ) -> ResultEngine<i64> {
        let new_balance = asset.closing_balance + delta;
        if new_balance < 0 {
            return Err(EngineError::InsufficientBalance(action.to_string()));
        }

        let updated = assets::Entity::update_many()
            .col_expr(assets::Column::ClosingBalance, Expr::value(new_balance))
            .filter(assets::Column::Id.eq(asset.id.clone()))
            .filter(assets::Column::ClosingBalance.eq(asset.closing_balance))
            .exec(db_tx)
            .await?;
        if updated.rows_affected != 1 {
            return Err(EngineError::Conflict(format!("asset \"{}\"", asset.name)));
        }

        Ok(new_balance)
    }

    /// Append one ledger entry.
    pub(super) async fn append_movement(
        &self,
        db_tx: &impl ConnectionTrait,
        asset_id: Uuid,
        base_id: Uuid,
        kind: MovementKind,
        quantity: i64,
        balance_after: i64,
        actor: &Actor,
        remarks: Option<String>,
    ) -> ResultEngine<()> {
        let movement = Movement::new(
            asset_id,
            base_id,
            kind,
            quantity,
            balance_after,
            actor.user_id,
            remarks,
        );
        movements::ActiveModel::from(&movement).insert(db_tx).await?;
        Ok(())
    }

    /// Fetch the asset a stored transaction refers to.
    pub(super) async fn require_related_asset(
        &self,
        db_tx: &impl ConnectionTrait,
        asset_id: Uuid,
    ) -> ResultEngine<assets::Model> {
        assets::Entity::find_by_id(asset_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound("Related asset not found".to_string()))
    }
}
