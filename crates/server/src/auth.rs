//! Registration and login endpoints. These are the only open routes.

use api_types::user::{Login, UserNew, UserResponse};
use axum::{Json, extract::State};
use engine::UserNewCmd;

use crate::{ServerError, convert, server::ServerState};

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<Json<UserResponse>, ServerError> {
    let mut cmd = UserNewCmd::new(
        payload.name,
        payload.email,
        payload.password,
        convert::role_from_api(payload.role),
    );
    if let Some(base_id) = payload.base_id {
        cmd = cmd.base_id(base_id);
    }

    let user = state.engine.create_user(cmd).await?;

    Ok(Json(UserResponse {
        success: true,
        user: convert::user_view(user),
    }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<UserResponse>, ServerError> {
    let user = state
        .engine
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(UserResponse {
        success: true,
        user: convert::user_view(user),
    }))
}
