//! Creation of single-base ledger transactions.
//!
//! Purchases add stock; assignments and expenditures remove it. All three run
//! the same pipeline and differ only in movement kind, remarks and the verb
//! used when the balance falls short.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, TransactionTrait};
use uuid::Uuid;

use crate::{
    AssignmentCmd, ExpenditureCmd, MovementKind, PurchaseCmd, ResultEngine, Transaction,
    TransactionKind, TransactionSite, transactions, users::Actor,
};

use super::super::{Engine, normalize_optional_text, with_tx};

struct SiteTx {
    kind: TransactionKind,
    movement_kind: MovementKind,
    asset_id: Uuid,
    base_id: Uuid,
    quantity: i64,
    reason: Option<String>,
    remarks: Option<String>,
    occurred_at: DateTime<Utc>,
    action: &'static str,
}

impl Engine {
    /// Record a purchase: stock arrives at an asset's base.
    pub async fn purchase(&self, cmd: PurchaseCmd, actor: &Actor) -> ResultEngine<Uuid> {
        self.create_site_transaction(
            SiteTx {
                kind: TransactionKind::Purchase,
                movement_kind: MovementKind::Purchase,
                asset_id: cmd.asset_id,
                base_id: cmd.base_id,
                quantity: cmd.quantity,
                reason: None,
                remarks: Some("Purchase added".to_string()),
                occurred_at: cmd.occurred_at,
                action: "purchase",
            },
            actor,
        )
        .await
    }

    /// Record an assignment: stock is handed to personnel and leaves the
    /// base's balance.
    pub async fn assign(&self, cmd: AssignmentCmd, actor: &Actor) -> ResultEngine<Uuid> {
        self.create_site_transaction(
            SiteTx {
                kind: TransactionKind::Assignment,
                movement_kind: MovementKind::Assignment,
                asset_id: cmd.asset_id,
                base_id: cmd.base_id,
                quantity: cmd.quantity,
                reason: None,
                remarks: None,
                occurred_at: cmd.occurred_at,
                action: "assign",
            },
            actor,
        )
        .await
    }

    /// Record an expenditure: stock is consumed.
    ///
    /// The reason, when given, doubles as the movement remark.
    pub async fn expend(&self, cmd: ExpenditureCmd, actor: &Actor) -> ResultEngine<Uuid> {
        let reason = normalize_optional_text(cmd.reason.as_deref());
        let remarks = reason.clone().unwrap_or_else(|| "Expenditure".to_string());

        self.create_site_transaction(
            SiteTx {
                kind: TransactionKind::Expenditure,
                movement_kind: MovementKind::Expenditure,
                asset_id: cmd.asset_id,
                base_id: cmd.base_id,
                quantity: cmd.quantity,
                reason,
                remarks: Some(remarks),
                occurred_at: cmd.occurred_at,
                action: "expend",
            },
            actor,
        )
        .await
    }

    async fn create_site_transaction(&self, plan: SiteTx, actor: &Actor) -> ResultEngine<Uuid> {
        let tx = Transaction::new(
            plan.kind,
            plan.asset_id,
            TransactionSite::Base {
                base_id: plan.base_id,
            },
            plan.quantity,
            plan.reason,
            plan.occurred_at,
        )?;

        with_tx!(self, |db_tx| {
            let asset = self
                .require_asset_at(&db_tx, plan.asset_id, plan.base_id, "Asset not found")
                .await?;
            let delta = plan.movement_kind.direction() * tx.quantity;
            let balance_after = self
                .apply_balance_change(&db_tx, &asset, delta, plan.action)
                .await?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            self.append_movement(
                &db_tx,
                tx.asset_id,
                plan.base_id,
                plan.movement_kind,
                tx.quantity,
                balance_after,
                actor,
                plan.remarks,
            )
            .await?;

            Ok(tx.id)
        })
    }
}
