//! Deletion of ledger transactions.
//!
//! Deleting never rewrites history. Each delete posts the opposite balance
//! change, appends reversal movements marked `deleted/reversed`, and only
//! then drops the transaction row. A reversal that would push a balance
//! below zero is refused.

use sea_orm::{EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::{
    EngineError, MovementKind, ResultEngine, Transaction, TransactionKind, TransactionSite,
    transactions, users::Actor, util::parse_uuid,
};

use super::super::{Engine, with_tx};

macro_rules! impl_delete_tx {
    ($(#[$meta:meta])* $fn_name:ident, $kind:expr) => {
        $(#[$meta])*
        pub async fn $fn_name(&self, transaction_id: Uuid, actor: &Actor) -> ResultEngine<()> {
            self.delete_transaction(transaction_id, $kind, actor).await
        }
    };
}

impl Engine {
    impl_delete_tx!(
        /// Reverse a purchase and delete its record.
        delete_purchase,
        TransactionKind::Purchase
    );

    impl_delete_tx!(
        /// Reverse a transfer on both of its bases and delete its record.
        delete_transfer,
        TransactionKind::Transfer
    );

    impl_delete_tx!(
        /// Reverse an assignment and delete its record.
        delete_assignment,
        TransactionKind::Assignment
    );

    impl_delete_tx!(
        /// Reverse an expenditure and delete its record.
        delete_expenditure,
        TransactionKind::Expenditure
    );

    async fn delete_transaction(
        &self,
        transaction_id: Uuid,
        kind: TransactionKind,
        actor: &Actor,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let row = self
                .require_transaction_of_kind(&db_tx, transaction_id, kind)
                .await?;
            let tx = Transaction::try_from(row)?;

            match tx.site {
                TransactionSite::Base { base_id } => {
                    let (movement_kind, action, remarks) = match tx.kind {
                        TransactionKind::Purchase => (
                            MovementKind::Purchase,
                            "reverse purchase",
                            "Purchase deleted/reversed",
                        ),
                        TransactionKind::Assignment => (
                            MovementKind::Assignment,
                            "reverse assignment",
                            "Assignment deleted/reversed",
                        ),
                        TransactionKind::Expenditure => (
                            MovementKind::Expenditure,
                            "reverse expenditure",
                            "Expenditure deleted/reversed",
                        ),
                        // A transfer row always carries a route site.
                        TransactionKind::Transfer => {
                            return Err(EngineError::Validation(
                                "transfer row is missing its route".to_string(),
                            ));
                        }
                    };

                    let asset = self.require_related_asset(&db_tx, tx.asset_id).await?;
                    let delta = -(movement_kind.direction() * tx.quantity);
                    let balance_after = self
                        .apply_balance_change(&db_tx, &asset, delta, action)
                        .await?;
                    self.append_movement(
                        &db_tx,
                        tx.asset_id,
                        base_id,
                        movement_kind,
                        -tx.quantity,
                        balance_after,
                        actor,
                        Some(remarks.to_string()),
                    )
                    .await?;
                }
                TransactionSite::Route {
                    from_base_id,
                    to_base_id,
                } => {
                    let source = self.require_related_asset(&db_tx, tx.asset_id).await?;
                    let destination = self
                        .find_asset_at_base(&db_tx, to_base_id, &source.name)
                        .await?
                        .ok_or_else(|| {
                            EngineError::NotFound("Related asset not found".to_string())
                        })?;
                    let destination_id = parse_uuid(&destination.id, "asset")?;

                    let source_after = self
                        .apply_balance_change(&db_tx, &source, tx.quantity, "reverse transfer")
                        .await?;
                    let destination_after = self
                        .apply_balance_change(
                            &db_tx,
                            &destination,
                            -tx.quantity,
                            "reverse transfer",
                        )
                        .await?;

                    self.append_movement(
                        &db_tx,
                        tx.asset_id,
                        from_base_id,
                        MovementKind::TransferIn,
                        tx.quantity,
                        source_after,
                        actor,
                        Some("Transfer deleted/reversed".to_string()),
                    )
                    .await?;
                    self.append_movement(
                        &db_tx,
                        destination_id,
                        to_base_id,
                        MovementKind::TransferOut,
                        tx.quantity,
                        destination_after,
                        actor,
                        Some("Transfer deleted/reversed".to_string()),
                    )
                    .await?;
                }
            }

            transactions::Entity::delete_by_id(tx.id.to_string())
                .exec(&db_tx)
                .await?;

            Ok(())
        })
    }
}
