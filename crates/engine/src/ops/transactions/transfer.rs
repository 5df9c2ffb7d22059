//! Transfers between bases.
//!
//! A transfer debits the asset at the source base and credits the asset of
//! the same name at the destination, creating that asset with an empty
//! balance when it does not exist yet. One transaction row records the
//! route; each side gets its own movement.

use sea_orm::{ActiveModelTrait, ConnectionTrait, TransactionTrait};
use uuid::Uuid;

use crate::{
    Asset, AssetKind, EngineError, MovementKind, ResultEngine, Transaction, TransactionKind,
    TransactionSite, TransferCmd, assets, transactions, users::Actor, util::parse_uuid,
};

use super::super::{Engine, with_tx};

impl Engine {
    /// Move stock of one asset from a source base to a destination base.
    ///
    /// When the command names no source base the actor's home base is used;
    /// actors without one cannot transfer.
    pub async fn transfer(&self, cmd: TransferCmd, actor: &Actor) -> ResultEngine<Uuid> {
        let from_base_id = match cmd.from_base_id {
            Some(base_id) => base_id,
            None => actor
                .home_base
                .ok_or_else(|| EngineError::Validation("User has no base assigned".to_string()))?,
        };

        let tx = Transaction::new(
            TransactionKind::Transfer,
            cmd.asset_id,
            TransactionSite::Route {
                from_base_id,
                to_base_id: cmd.to_base_id,
            },
            cmd.quantity,
            None,
            cmd.occurred_at,
        )?;

        with_tx!(self, |db_tx| {
            self.require_base(&db_tx, cmd.to_base_id).await?;
            let source = self
                .require_asset_at(&db_tx, cmd.asset_id, from_base_id, "Asset not found in fromBase")
                .await?;
            let source_after = self
                .apply_balance_change(&db_tx, &source, -tx.quantity, "transfer")
                .await?;

            let destination = self
                .find_or_create_destination(&db_tx, &source, cmd.to_base_id)
                .await?;
            let destination_id = parse_uuid(&destination.id, "asset")?;
            let destination_after = self
                .apply_balance_change(&db_tx, &destination, tx.quantity, "transfer")
                .await?;

            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            self.append_movement(
                &db_tx,
                tx.asset_id,
                from_base_id,
                MovementKind::TransferOut,
                tx.quantity,
                source_after,
                actor,
                None,
            )
            .await?;
            self.append_movement(
                &db_tx,
                destination_id,
                cmd.to_base_id,
                MovementKind::TransferIn,
                tx.quantity,
                destination_after,
                actor,
                None,
            )
            .await?;

            Ok(tx.id)
        })
    }

    async fn find_or_create_destination(
        &self,
        db_tx: &impl ConnectionTrait,
        source: &assets::Model,
        to_base_id: Uuid,
    ) -> ResultEngine<assets::Model> {
        if let Some(existing) = self
            .find_asset_at_base(db_tx, to_base_id, &source.name)
            .await?
        {
            return Ok(existing);
        }

        let kind = AssetKind::try_from(source.kind.as_str())?;
        let fresh = Asset::new(source.name.clone(), kind, to_base_id, 0);
        match assets::ActiveModel::from(&fresh).insert(db_tx).await {
            Ok(created) => Ok(created),
            // The unique (base, name) pair may have been taken meanwhile.
            Err(err) => match self
                .find_asset_at_base(db_tx, to_base_id, &source.name)
                .await?
            {
                Some(existing) => Ok(existing),
                None => Err(err.into()),
            },
        }
    }
}
