//! Wire types shared by the HTTP server and its clients.
//!
//! Every response body carries `success`; failures use [`ErrorBody`] with a
//! human-readable message. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bare acknowledgement, used by delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// Failure envelope returned with any 4xx/5xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

pub mod user {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Role {
        Admin,
        BaseCommander,
        LogisticsOfficer,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub role: Role,
        pub base_id: Option<Uuid>,
    }

    /// Request body for `POST /auth/register` and `POST /users`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
        pub role: Role,
        pub base_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    /// Request body for `PUT /users/{id}/role`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RoleUpdate {
        pub role: Role,
        pub base_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserResponse {
        pub success: bool,
        pub user: UserView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UsersResponse {
        pub success: bool,
        pub users: Vec<UserView>,
    }
}

pub mod base {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BaseNew {
        pub name: String,
        pub location: String,
    }

    /// Request body for `PUT /bases/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BaseUpdate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BaseView {
        pub id: Uuid,
        pub name: String,
        pub location: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BaseResponse {
        pub success: bool,
        pub base: BaseView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BasesResponse {
        pub success: bool,
        pub bases: Vec<BaseView>,
    }
}

pub mod asset {
    use super::*;

    /// Asset category. Serialized capitalized, e.g. `"Vehicle"`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum AssetKind {
        Vehicle,
        Weapon,
        Ammunition,
        Equipment,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AssetNew {
        pub name: String,
        pub kind: AssetKind,
        pub base_id: Uuid,
        pub opening_balance: i64,
    }

    /// Partial update; absent fields are left unchanged.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AssetUpdate {
        pub name: Option<String>,
        pub kind: Option<AssetKind>,
        pub base_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AssetView {
        pub id: Uuid,
        pub name: String,
        pub kind: AssetKind,
        pub base_id: Uuid,
        pub opening_balance: i64,
        pub closing_balance: i64,
    }

    /// A listed asset together with the name of its base.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AssetListItem {
        pub id: Uuid,
        pub name: String,
        pub kind: AssetKind,
        pub base_id: Uuid,
        pub base_name: String,
        pub opening_balance: i64,
        pub closing_balance: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetResponse {
        pub success: bool,
        pub asset: AssetView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetsResponse {
        pub success: bool,
        pub assets: Vec<AssetListItem>,
    }
}

pub mod movement {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MovementKind {
        Purchase,
        TransferIn,
        TransferOut,
        Assignment,
        Expenditure,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MovementView {
        pub id: Uuid,
        pub asset_id: Uuid,
        pub base_id: Uuid,
        pub kind: MovementKind,
        /// Magnitude of the change; reversals of single-base records are
        /// negative.
        pub quantity: i64,
        pub balance_after: i64,
        pub created_by: Uuid,
        pub remarks: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementsResponse {
        pub success: bool,
        pub movements: Vec<MovementView>,
    }
}

pub mod ledger {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Purchase,
        Transfer,
        Assignment,
        Expenditure,
    }

    /// Request body for `POST /purchases` and `POST /assignments`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SiteTransactionNew {
        pub asset_id: Uuid,
        pub base_id: Uuid,
        pub quantity: i64,
        /// RFC3339; the server uses now() when absent.
        pub occurred_at: Option<DateTime<Utc>>,
    }

    /// Request body for `POST /transfers`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferNew {
        pub asset_id: Uuid,
        /// Defaults to the caller's home base when absent.
        pub from_base_id: Option<Uuid>,
        pub to_base_id: Uuid,
        pub quantity: i64,
        pub occurred_at: Option<DateTime<Utc>>,
    }

    /// Request body for `POST /expenditures`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenditureNew {
        pub asset_id: Uuid,
        pub base_id: Uuid,
        pub quantity: i64,
        pub reason: Option<String>,
        pub occurred_at: Option<DateTime<Utc>>,
    }

    /// Query string for the history endpoints.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HistoryQuery {
        pub asset_id: Option<Uuid>,
        pub base_id: Option<Uuid>,
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub asset_id: Uuid,
        pub base_id: Option<Uuid>,
        pub from_base_id: Option<Uuid>,
        pub to_base_id: Option<Uuid>,
        pub quantity: i64,
        pub reason: Option<String>,
        pub occurred_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub success: bool,
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionsResponse {
        pub success: bool,
        pub transactions: Vec<TransactionView>,
    }
}

pub mod dashboard {
    use super::*;

    /// One asset of a base with its full movement history.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetActivity {
        pub asset: asset::AssetView,
        pub movements: Vec<movement::MovementView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub success: bool,
        pub assets: Vec<AssetActivity>,
    }
}
