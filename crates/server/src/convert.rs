//! Mappings between engine types and wire types.

use api_types::{asset, base, ledger, movement, user};
use engine::{
    Asset, AssetKind, Base, Movement, MovementKind, Role, Transaction, TransactionKind,
    TransactionSite, User,
};

pub(crate) fn role_to_api(role: Role) -> user::Role {
    match role {
        Role::Admin => user::Role::Admin,
        Role::BaseCommander => user::Role::BaseCommander,
        Role::LogisticsOfficer => user::Role::LogisticsOfficer,
    }
}

pub(crate) fn role_from_api(role: user::Role) -> Role {
    match role {
        user::Role::Admin => Role::Admin,
        user::Role::BaseCommander => Role::BaseCommander,
        user::Role::LogisticsOfficer => Role::LogisticsOfficer,
    }
}

pub(crate) fn asset_kind_to_api(kind: AssetKind) -> asset::AssetKind {
    match kind {
        AssetKind::Vehicle => asset::AssetKind::Vehicle,
        AssetKind::Weapon => asset::AssetKind::Weapon,
        AssetKind::Ammunition => asset::AssetKind::Ammunition,
        AssetKind::Equipment => asset::AssetKind::Equipment,
    }
}

pub(crate) fn asset_kind_from_api(kind: asset::AssetKind) -> AssetKind {
    match kind {
        asset::AssetKind::Vehicle => AssetKind::Vehicle,
        asset::AssetKind::Weapon => AssetKind::Weapon,
        asset::AssetKind::Ammunition => AssetKind::Ammunition,
        asset::AssetKind::Equipment => AssetKind::Equipment,
    }
}

pub(crate) fn movement_kind_to_api(kind: MovementKind) -> movement::MovementKind {
    match kind {
        MovementKind::Purchase => movement::MovementKind::Purchase,
        MovementKind::TransferIn => movement::MovementKind::TransferIn,
        MovementKind::TransferOut => movement::MovementKind::TransferOut,
        MovementKind::Assignment => movement::MovementKind::Assignment,
        MovementKind::Expenditure => movement::MovementKind::Expenditure,
    }
}

pub(crate) fn transaction_kind_to_api(kind: TransactionKind) -> ledger::TransactionKind {
    match kind {
        TransactionKind::Purchase => ledger::TransactionKind::Purchase,
        TransactionKind::Transfer => ledger::TransactionKind::Transfer,
        TransactionKind::Assignment => ledger::TransactionKind::Assignment,
        TransactionKind::Expenditure => ledger::TransactionKind::Expenditure,
    }
}

pub(crate) fn user_view(user: User) -> user::UserView {
    user::UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        role: role_to_api(user.role),
        base_id: user.base_id,
    }
}

pub(crate) fn base_view(base: Base) -> base::BaseView {
    base::BaseView {
        id: base.id,
        name: base.name,
        location: base.location,
    }
}

pub(crate) fn asset_view(asset: Asset) -> asset::AssetView {
    asset::AssetView {
        id: asset.id,
        name: asset.name,
        kind: asset_kind_to_api(asset.kind),
        base_id: asset.base_id,
        opening_balance: asset.opening_balance,
        closing_balance: asset.closing_balance,
    }
}

pub(crate) fn movement_view(movement: Movement) -> movement::MovementView {
    movement::MovementView {
        id: movement.id,
        asset_id: movement.asset_id,
        base_id: movement.base_id,
        kind: movement_kind_to_api(movement.kind),
        quantity: movement.quantity,
        balance_after: movement.balance_after,
        created_by: movement.created_by,
        remarks: movement.remarks,
        created_at: movement.created_at,
    }
}

pub(crate) fn transaction_view(tx: Transaction) -> ledger::TransactionView {
    let (base_id, from_base_id, to_base_id) = match tx.site {
        TransactionSite::Base { base_id } => (Some(base_id), None, None),
        TransactionSite::Route {
            from_base_id,
            to_base_id,
        } => (None, Some(from_base_id), Some(to_base_id)),
    };

    ledger::TransactionView {
        id: tx.id,
        kind: transaction_kind_to_api(tx.kind),
        asset_id: tx.asset_id,
        base_id,
        from_base_id,
        to_base_id,
        quantity: tx.quantity,
        reason: tx.reason,
        occurred_at: tx.occurred_at,
    }
}
