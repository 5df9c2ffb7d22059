//! Reading the movement ledger, and repairing balances from it.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{Asset, EngineError, Movement, MovementKind, ResultEngine, assets, movements};

use super::{Engine, with_tx};

impl Engine {
    /// Movement history of one asset, oldest first.
    pub async fn movements_for_asset(&self, asset_id: Uuid) -> ResultEngine<Vec<Movement>> {
        self.require_asset(&self.database, asset_id).await?;

        movements::Entity::find()
            .filter(movements::Column::AssetId.eq(asset_id.to_string()))
            .order_by_asc(movements::Column::CreatedAt)
            .order_by_asc(movements::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Movement::try_from)
            .collect()
    }

    /// Movement history recorded at one base, oldest first.
    ///
    /// Movements keep the base they were posted at, so this includes entries
    /// for assets that have since been moved elsewhere.
    pub async fn movements_for_base(&self, base_id: Uuid) -> ResultEngine<Vec<Movement>> {
        self.require_base(&self.database, base_id).await?;

        movements::Entity::find()
            .filter(movements::Column::BaseId.eq(base_id.to_string()))
            .order_by_asc(movements::Column::CreatedAt)
            .order_by_asc(movements::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Movement::try_from)
            .collect()
    }

    /// Every asset of a base together with its movement history.
    pub async fn base_overview(
        &self,
        base_id: Uuid,
    ) -> ResultEngine<Vec<(Asset, Vec<Movement>)>> {
        self.require_base(&self.database, base_id).await?;

        let rows = assets::Entity::find()
            .filter(assets::Column::BaseId.eq(base_id.to_string()))
            .find_with_related(movements::Entity)
            .order_by_asc(assets::Column::Name)
            .order_by_asc(movements::Column::CreatedAt)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(asset, movements)| {
                let asset = Asset::try_from(asset)?;
                let movements = movements
                    .into_iter()
                    .map(Movement::try_from)
                    .collect::<ResultEngine<Vec<_>>>()?;
                Ok((asset, movements))
            })
            .collect()
    }

    /// Replay the whole ledger and rewrite any closing balance that drifted
    /// from it. Returns how many assets were repaired.
    pub async fn recompute_balances(&self) -> ResultEngine<usize> {
        with_tx!(self, |db_tx| {
            let assets = assets::Entity::find().all(&db_tx).await?;
            let movements = movements::Entity::find()
                .order_by_asc(movements::Column::CreatedAt)
                .order_by_asc(movements::Column::Id)
                .all(&db_tx)
                .await?;

            let mut balances: HashMap<String, i64> =
                assets.iter().map(|asset| (asset.id.clone(), 0)).collect();
            for movement in &movements {
                let kind = MovementKind::try_from(movement.kind.as_str())?;
                let balance = balances
                    .get_mut(&movement.asset_id)
                    .ok_or_else(|| EngineError::NotFound("Related asset not found".to_string()))?;
                *balance += kind.direction() * movement.quantity;
            }

            let mut repaired = 0;
            for asset in assets {
                let replayed = balances.get(&asset.id).copied().unwrap_or_default();
                if replayed == asset.closing_balance {
                    continue;
                }
                assets::ActiveModel {
                    id: Set(asset.id.clone()),
                    closing_balance: Set(replayed),
                    ..Default::default()
                }
                .update(&db_tx)
                .await?;
                repaired += 1;
            }

            Ok(repaired)
        })
    }
}
