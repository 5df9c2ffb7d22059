//! Movement history and dashboard endpoints.

use api_types::dashboard::{AssetActivity, DashboardResponse};
use api_types::movement::MovementsResponse;
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{ServerError, convert, server::ServerState};

pub async fn for_asset(
    State(state): State<ServerState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<MovementsResponse>, ServerError> {
    let movements = state
        .engine
        .movements_for_asset(asset_id)
        .await?
        .into_iter()
        .map(convert::movement_view)
        .collect();

    Ok(Json(MovementsResponse {
        success: true,
        movements,
    }))
}

pub async fn for_base(
    State(state): State<ServerState>,
    Path(base_id): Path<Uuid>,
) -> Result<Json<MovementsResponse>, ServerError> {
    let movements = state
        .engine
        .movements_for_base(base_id)
        .await?
        .into_iter()
        .map(convert::movement_view)
        .collect();

    Ok(Json(MovementsResponse {
        success: true,
        movements,
    }))
}

/// Every asset at a base with its chronological movement history.
pub async fn dashboard(
    State(state): State<ServerState>,
    Path(base_id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, ServerError> {
    let assets = state
        .engine
        .base_overview(base_id)
        .await?
        .into_iter()
        .map(|(asset, movements)| AssetActivity {
            asset: convert::asset_view(asset),
            movements: movements.into_iter().map(convert::movement_view).collect(),
        })
        .collect();

    Ok(Json(DashboardResponse {
        success: true,
        assets,
    }))
}
