//! Asset management endpoints.

use api_types::Ack;
use api_types::asset::{AssetListItem, AssetNew, AssetResponse, AssetUpdate, AssetsResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{Actor, AssetNewCmd, AssetPatch, User};
use uuid::Uuid;

use crate::{ServerError, convert, require_admin, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<AssetsResponse>, ServerError> {
    let assets = state
        .engine
        .list_assets()
        .await?
        .into_iter()
        .map(|(asset, base)| AssetListItem {
            id: asset.id,
            name: asset.name,
            kind: convert::asset_kind_to_api(asset.kind),
            base_id: base.id,
            base_name: base.name,
            opening_balance: asset.opening_balance,
            closing_balance: asset.closing_balance,
        })
        .collect();

    Ok(Json(AssetsResponse {
        success: true,
        assets,
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetResponse>, ServerError> {
    let asset = state.engine.asset(asset_id).await?;

    Ok(Json(AssetResponse {
        success: true,
        asset: convert::asset_view(asset),
    }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<AssetNew>,
) -> Result<Json<AssetResponse>, ServerError> {
    require_admin(&user)?;

    let cmd = AssetNewCmd::new(
        payload.name,
        convert::asset_kind_from_api(payload.kind),
        payload.base_id,
        payload.opening_balance,
    );
    let asset = state.engine.register_asset(cmd, &Actor::from(&user)).await?;

    Ok(Json(AssetResponse {
        success: true,
        asset: convert::asset_view(asset),
    }))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(asset_id): Path<Uuid>,
    Json(payload): Json<AssetUpdate>,
) -> Result<Json<AssetResponse>, ServerError> {
    require_admin(&user)?;

    let mut patch = AssetPatch::default();
    if let Some(name) = payload.name {
        patch = patch.name(name);
    }
    if let Some(kind) = payload.kind {
        patch = patch.kind(convert::asset_kind_from_api(kind));
    }
    if let Some(base_id) = payload.base_id {
        patch = patch.base_id(base_id);
    }

    let asset = state.engine.update_asset(asset_id, patch).await?;

    Ok(Json(AssetResponse {
        success: true,
        asset: convert::asset_view(asset),
    }))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    require_admin(&user)?;

    state.engine.delete_asset(asset_id).await?;

    Ok(Json(Ack { success: true }))
}
