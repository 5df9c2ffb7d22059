//! History queries over transaction records.

use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{ResultEngine, Transaction, TransactionKind, transactions};

use super::super::Engine;

/// Narrowing options for [`Engine::list_transactions`].
#[derive(Debug, Clone, Default)]
pub struct TransactionListFilter {
    kind: Option<TransactionKind>,
    asset_id: Option<Uuid>,
    base_id: Option<Uuid>,
    limit: Option<u64>,
}

impl TransactionListFilter {
    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn asset_id(mut self, asset_id: Uuid) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    /// Keep transactions touching this base, transfers from either end.
    #[must_use]
    pub fn base_id(mut self, base_id: Uuid) -> Self {
        self.base_id = Some(base_id);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Engine {
    /// List transactions, newest first.
    pub async fn list_transactions(
        &self,
        filter: TransactionListFilter,
    ) -> ResultEngine<Vec<Transaction>> {
        let mut query =
            transactions::Entity::find().order_by_desc(transactions::Column::OccurredAt);

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(asset_id) = filter.asset_id {
            query = query.filter(transactions::Column::AssetId.eq(asset_id.to_string()));
        }
        if let Some(base_id) = filter.base_id {
            let base_id = base_id.to_string();
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::BaseId.eq(base_id.clone()))
                    .add(transactions::Column::FromBaseId.eq(base_id.clone()))
                    .add(transactions::Column::ToBaseId.eq(base_id)),
            );
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        query
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
