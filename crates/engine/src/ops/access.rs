//! Internal row lookups shared by the engine operations.
//!
//! Every lookup fails with the user-facing message the HTTP layer forwards
//! verbatim, so wording lives in exactly one place.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, sea_query::Expr};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, TransactionKind, assets, bases, transactions, users};

use super::Engine;

/// Generate a row lookup that fails with the given message when absent.
macro_rules! impl_require_row {
    ($(#[$meta:meta])* $fn_name:ident, $entity:ty, $model:ty, $err_msg:expr) => {
        $(#[$meta])*
        pub(super) async fn $fn_name(
            &self,
            db_tx: &impl ConnectionTrait,
            id: Uuid,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id.to_string())
                .one(db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_require_row!(
        /// Fetch an asset row by id.
        require_asset,
        assets::Entity,
        assets::Model,
        "Asset not found"
    );

    impl_require_row!(
        /// Fetch a base row by id.
        require_base,
        bases::Entity,
        bases::Model,
        "Base not found"
    );

    impl_require_row!(
        /// Fetch a user row by id.
        require_user,
        users::Entity,
        users::Model,
        "User not found"
    );

    /// Fetch an asset row by id, requiring it to live at the given base.
    pub(super) async fn require_asset_at(
        &self,
        db_tx: &impl ConnectionTrait,
        asset_id: Uuid,
        base_id: Uuid,
        err_msg: &str,
    ) -> ResultEngine<assets::Model> {
        assets::Entity::find_by_id(asset_id.to_string())
            .filter(assets::Column::BaseId.eq(base_id.to_string()))
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound(err_msg.to_string()))
    }

    /// Case-insensitive asset lookup by name at a base.
    pub(super) async fn find_asset_at_base(
        &self,
        db_tx: &impl ConnectionTrait,
        base_id: Uuid,
        name: &str,
    ) -> ResultEngine<Option<assets::Model>> {
        Ok(assets::Entity::find()
            .filter(assets::Column::BaseId.eq(base_id.to_string()))
            .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
            .one(db_tx)
            .await?)
    }

    /// Fetch a transaction row of the expected kind.
    ///
    /// A row of another kind is reported as absent: deleting transfer X
    /// through the purchase reversal must not find it.
    pub(super) async fn require_transaction_of_kind(
        &self,
        db_tx: &impl ConnectionTrait,
        id: Uuid,
        kind: TransactionKind,
    ) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(id.to_string())
            .filter(transactions::Column::Kind.eq(kind.as_str()))
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("{} not found", kind.label())))
    }
}
