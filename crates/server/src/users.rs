//! User management endpoints, admin only.

use api_types::Ack;
use api_types::user::{RoleUpdate, UserNew, UserResponse, UsersResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{User, UserNewCmd};
use uuid::Uuid;

use crate::{ServerError, convert, require_admin, server::ServerState};

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<UsersResponse>, ServerError> {
    require_admin(&user)?;

    let users = state
        .engine
        .list_users()
        .await?
        .into_iter()
        .map(convert::user_view)
        .collect();

    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<Json<UserResponse>, ServerError> {
    require_admin(&user)?;

    let mut cmd = UserNewCmd::new(
        payload.name,
        payload.email,
        payload.password,
        convert::role_from_api(payload.role),
    );
    if let Some(base_id) = payload.base_id {
        cmd = cmd.base_id(base_id);
    }

    let created = state.engine.create_user(cmd).await?;

    Ok(Json(UserResponse {
        success: true,
        user: convert::user_view(created),
    }))
}

pub async fn update_role(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<RoleUpdate>,
) -> Result<Json<UserResponse>, ServerError> {
    require_admin(&user)?;

    let updated = state
        .engine
        .update_user_role(user_id, convert::role_from_api(payload.role), payload.base_id)
        .await?;

    Ok(Json(UserResponse {
        success: true,
        user: convert::user_view(updated),
    }))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    require_admin(&user)?;

    state.engine.delete_user(user_id).await?;

    Ok(Json(Ack { success: true }))
}
