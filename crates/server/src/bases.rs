//! Base management endpoints.

use api_types::Ack;
use api_types::base::{BaseNew, BaseResponse, BaseUpdate, BasesResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::User;
use uuid::Uuid;

use crate::{ServerError, convert, require_admin, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<BasesResponse>, ServerError> {
    let bases = state
        .engine
        .list_bases()
        .await?
        .into_iter()
        .map(convert::base_view)
        .collect();

    Ok(Json(BasesResponse {
        success: true,
        bases,
    }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<BaseNew>,
) -> Result<Json<BaseResponse>, ServerError> {
    require_admin(&user)?;

    let base = state
        .engine
        .create_base(&payload.name, &payload.location)
        .await?;

    Ok(Json(BaseResponse {
        success: true,
        base: convert::base_view(base),
    }))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(base_id): Path<Uuid>,
    Json(payload): Json<BaseUpdate>,
) -> Result<Json<Ack>, ServerError> {
    require_admin(&user)?;

    state.engine.rename_base(base_id, &payload.name).await?;

    Ok(Json(Ack { success: true }))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(base_id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    require_admin(&user)?;

    state.engine.delete_base(base_id).await?;

    Ok(Json(Ack { success: true }))
}
