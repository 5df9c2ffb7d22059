use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{EngineError, Role, User};

pub use server::{router, run, run_with_listener, spawn_with_listener};

mod assets;
mod auth;
mod bases;
mod convert;
mod ledger;
mod movements;
mod server;
mod users;

pub mod types {
    pub mod asset {
        pub use api_types::asset::{
            AssetKind, AssetListItem, AssetNew, AssetResponse, AssetUpdate, AssetView,
            AssetsResponse,
        };
    }

    pub mod base {
        pub use api_types::base::{BaseNew, BaseResponse, BaseUpdate, BaseView, BasesResponse};
    }

    pub mod ledger {
        pub use api_types::ledger::{
            ExpenditureNew, HistoryQuery, SiteTransactionNew, TransactionCreated, TransactionKind,
            TransactionView, TransactionsResponse, TransferNew,
        };
    }

    pub mod movement {
        pub use api_types::dashboard::{AssetActivity, DashboardResponse};
        pub use api_types::movement::{MovementKind, MovementView, MovementsResponse};
    }

    pub mod user {
        pub use api_types::user::{
            Login, Role, RoleUpdate, UserNew, UserResponse, UserView, UsersResponse,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::AlreadyExists(_) | EngineError::Conflict(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Validation(_)
        | EngineError::InsufficientBalance(_)
        | EngineError::Precondition(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Asset, base and user management is reserved for admins.
pub(crate) fn require_admin(user: &User) -> Result<(), ServerError> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(EngineError::Forbidden("Admin access required".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_unauthorized_maps_to_401() {
        let res =
            ServerError::from(EngineError::Unauthorized("Invalid credentials".to_string()))
                .into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_already_exists_maps_to_409() {
        let res = ServerError::from(EngineError::AlreadyExists("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::Conflict("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_insufficient_balance_maps_to_400() {
        let res = ServerError::from(EngineError::InsufficientBalance("expend".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_are_masked() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("secret detail".to_string()));
        assert_eq!(message_for_engine_error(err), "internal server error");
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
