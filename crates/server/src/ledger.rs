//! Ledger endpoints: purchases, transfers, assignments, expenditures.
//!
//! Creation and deletion go through the engine's transactional pipeline; the
//! list endpoints are thin filters over the shared transaction history.

use api_types::Ack;
use api_types::ledger::{
    ExpenditureNew, HistoryQuery, SiteTransactionNew, TransactionCreated, TransactionsResponse,
    TransferNew,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use engine::{
    Actor, AssignmentCmd, ExpenditureCmd, PurchaseCmd, Role, TransactionKind,
    TransactionListFilter, TransferCmd, User,
};
use uuid::Uuid;

use crate::{ServerError, convert, server::ServerState};

fn history_filter(kind: TransactionKind, query: &HistoryQuery) -> TransactionListFilter {
    let mut filter = TransactionListFilter::default().kind(kind);
    if let Some(asset_id) = query.asset_id {
        filter = filter.asset_id(asset_id);
    }
    if let Some(base_id) = query.base_id {
        filter = filter.base_id(base_id);
    }
    if let Some(limit) = query.limit {
        filter = filter.limit(limit);
    }
    filter
}

async fn list_history(
    state: &ServerState,
    kind: TransactionKind,
    query: &HistoryQuery,
) -> Result<Json<TransactionsResponse>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(history_filter(kind, query))
        .await?
        .into_iter()
        .map(convert::transaction_view)
        .collect();

    Ok(Json(TransactionsResponse {
        success: true,
        transactions,
    }))
}

// ─── Purchases ───────────────────────────────────────────────────────────────

/// Non-admins with a home base only ever see that base's purchases.
pub async fn purchases(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    let mut query = query;
    if user.role != Role::Admin
        && let Some(home_base) = user.base_id
    {
        query.base_id = Some(home_base);
    }

    list_history(&state, TransactionKind::Purchase, &query).await
}

pub async fn purchase_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<SiteTransactionNew>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let cmd = PurchaseCmd::new(
        payload.asset_id,
        payload.base_id,
        payload.quantity,
        payload.occurred_at.unwrap_or_else(Utc::now),
    );
    let id = state.engine.purchase(cmd, &Actor::from(&user)).await?;

    Ok(Json(TransactionCreated { success: true, id }))
}

pub async fn purchase_delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state
        .engine
        .delete_purchase(transaction_id, &Actor::from(&user))
        .await?;

    Ok(Json(Ack { success: true }))
}

// ─── Transfers ───────────────────────────────────────────────────────────────

pub async fn transfers(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    list_history(&state, TransactionKind::Transfer, &query).await
}

/// Transfers recorded at either endpoint of one base.
pub async fn base_transfers(
    State(state): State<ServerState>,
    Path(base_id): Path<Uuid>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    let query = HistoryQuery {
        base_id: Some(base_id),
        ..HistoryQuery::default()
    };

    list_history(&state, TransactionKind::Transfer, &query).await
}

pub async fn transfer_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransferNew>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let mut cmd = TransferCmd::new(
        payload.asset_id,
        payload.to_base_id,
        payload.quantity,
        payload.occurred_at.unwrap_or_else(Utc::now),
    );
    if let Some(from_base_id) = payload.from_base_id {
        cmd = cmd.from_base_id(from_base_id);
    }

    let id = state.engine.transfer(cmd, &Actor::from(&user)).await?;

    Ok(Json(TransactionCreated { success: true, id }))
}

pub async fn transfer_delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state
        .engine
        .delete_transfer(transaction_id, &Actor::from(&user))
        .await?;

    Ok(Json(Ack { success: true }))
}

// ─── Assignments ─────────────────────────────────────────────────────────────

pub async fn assignments(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    list_history(&state, TransactionKind::Assignment, &query).await
}

pub async fn assignment_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<SiteTransactionNew>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let cmd = AssignmentCmd::new(
        payload.asset_id,
        payload.base_id,
        payload.quantity,
        payload.occurred_at.unwrap_or_else(Utc::now),
    );
    let id = state.engine.assign(cmd, &Actor::from(&user)).await?;

    Ok(Json(TransactionCreated { success: true, id }))
}

pub async fn assignment_delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state
        .engine
        .delete_assignment(transaction_id, &Actor::from(&user))
        .await?;

    Ok(Json(Ack { success: true }))
}

// ─── Expenditures ────────────────────────────────────────────────────────────

pub async fn expenditures(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    list_history(&state, TransactionKind::Expenditure, &query).await
}

pub async fn expenditure_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenditureNew>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let mut cmd = ExpenditureCmd::new(
        payload.asset_id,
        payload.base_id,
        payload.quantity,
        payload.occurred_at.unwrap_or_else(Utc::now),
    );
    if let Some(reason) = payload.reason {
        cmd = cmd.reason(reason);
    }

    let id = state.engine.expend(cmd, &Actor::from(&user)).await?;

    Ok(Json(TransactionCreated { success: true, id }))
}

pub async fn expenditure_delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state
        .engine
        .delete_expenditure(transaction_id, &Actor::from(&user))
        .await?;

    Ok(Json(Ack { success: true }))
}
