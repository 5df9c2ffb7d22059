//! Asset registry operations.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    Asset, AssetNewCmd, AssetPatch, Base, EngineError, Movement, MovementKind, ResultEngine,
    assets, bases, movements, transactions, users::Actor, util::parse_uuid,
};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Register a new asset at a base.
    ///
    /// The closing balance starts at the opening balance and one registration
    /// movement ("Initial stock") is appended, even for a zero opening
    /// balance, so the ledger replays to the right value from day one.
    pub async fn register_asset(&self, cmd: AssetNewCmd, actor: &Actor) -> ResultEngine<Asset> {
        let name = normalize_required_name(&cmd.name, "asset name")?;
        if cmd.opening_balance < 0 {
            return Err(EngineError::Validation(
                "Opening balance must not be negative".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            self.require_base(&db_tx, cmd.base_id).await?;
            if self
                .find_asset_at_base(&db_tx, cmd.base_id, &name)
                .await?
                .is_some()
            {
                return Err(EngineError::AlreadyExists("Asset".to_string()));
            }

            let asset = Asset::new(name, cmd.kind, cmd.base_id, cmd.opening_balance);
            assets::ActiveModel::from(&asset).insert(&db_tx).await?;

            let opening = Movement::new(
                asset.id,
                asset.base_id,
                MovementKind::Purchase,
                asset.opening_balance,
                asset.opening_balance,
                actor.user_id,
                Some("Initial stock".to_string()),
            );
            movements::ActiveModel::from(&opening).insert(&db_tx).await?;

            Ok(asset)
        })
    }

    /// Fetch a single asset.
    pub async fn asset(&self, asset_id: Uuid) -> ResultEngine<Asset> {
        let model = self.require_asset(&self.database, asset_id).await?;
        Asset::try_from(model)
    }

    /// List every asset together with its base, ordered by asset name.
    pub async fn list_assets(&self) -> ResultEngine<Vec<(Asset, Base)>> {
        let rows = assets::Entity::find()
            .find_also_related(bases::Entity)
            .order_by_asc(assets::Column::Name)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(asset, base)| {
                let base =
                    base.ok_or_else(|| EngineError::NotFound("Base not found".to_string()))?;
                Ok((Asset::try_from(asset)?, Base::try_from(base)?))
            })
            .collect()
    }

    /// Apply a partial update to an asset.
    ///
    /// Only name, kind and base are reachable here; balances move exclusively
    /// through ledger operations.
    pub async fn update_asset(&self, asset_id: Uuid, patch: AssetPatch) -> ResultEngine<Asset> {
        let new_name = patch
            .name
            .as_deref()
            .map(|name| normalize_required_name(name, "asset name"))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let current = self.require_asset(&db_tx, asset_id).await?;

            let target_base = match patch.base_id {
                Some(base_id) => {
                    self.require_base(&db_tx, base_id).await?;
                    base_id
                }
                None => parse_uuid(&current.base_id, "base")?,
            };
            let target_name = new_name.clone().unwrap_or_else(|| current.name.clone());

            let renamed = !target_name.eq_ignore_ascii_case(&current.name);
            let moved = target_base.to_string() != current.base_id;
            if (renamed || moved)
                && let Some(existing) = self
                    .find_asset_at_base(&db_tx, target_base, &target_name)
                    .await?
                && existing.id != current.id
            {
                return Err(EngineError::AlreadyExists("Asset".to_string()));
            }

            let mut update = assets::ActiveModel {
                id: ActiveValue::Set(current.id.clone()),
                ..Default::default()
            };
            if let Some(name) = new_name {
                update.name = ActiveValue::Set(name);
            }
            if let Some(kind) = patch.kind {
                update.kind = ActiveValue::Set(kind.as_str().to_string());
            }
            if let Some(base_id) = patch.base_id {
                update.base_id = ActiveValue::Set(base_id.to_string());
            }
            let updated = update.update(&db_tx).await?;

            Ok(Asset::try_from(updated)?)
        })
    }

    /// Delete an asset and everything that references it.
    ///
    /// Movements and transaction records cascade with the asset; there is no
    /// balance rollback, the stock simply stops existing.
    pub async fn delete_asset(&self, asset_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let asset = self.require_asset(&db_tx, asset_id).await?;

            movements::Entity::delete_many()
                .filter(movements::Column::AssetId.eq(asset.id.clone()))
                .exec(&db_tx)
                .await?;
            transactions::Entity::delete_many()
                .filter(transactions::Column::AssetId.eq(asset.id.clone()))
                .exec(&db_tx)
                .await?;
            assets::Entity::delete_by_id(asset.id).exec(&db_tx).await?;

            Ok(())
        })
    }
}
