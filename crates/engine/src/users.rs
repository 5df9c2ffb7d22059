//! Users and the caller context.
//!
//! The engine owns the users table so credentials can be checked close to the
//! data, but ledger operations never look the caller up themselves: the
//! boundary resolves credentials once and passes an [`Actor`] into every call
//! that records identity or depends on the caller's role.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use sea_orm::{DbErr, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    BaseCommander,
    LogisticsOfficer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::BaseCommander => "base_commander",
            Self::LogisticsOfficer => "logistics_officer",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "base_commander" => Ok(Self::BaseCommander),
            "logistics_officer" => Ok(Self::LogisticsOfficer),
            other => Err(EngineError::Validation(format!("invalid role: {other}"))),
        }
    }
}

/// A user profile, without the password hash.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Home base. Only kept for base commanders.
    pub base_id: Option<Uuid>,
}

/// Authenticated caller context.
///
/// Recorded as `created_by` on every movement a call appends; the role and
/// home base drive the transfer source default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
    pub home_base: Option<Uuid>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub base_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "user")?,
            name: model.name,
            email: model.email,
            role: Role::try_from(model.role.as_str())?,
            base_id: model
                .base_id
                .as_deref()
                .map(|id| parse_uuid(id, "base"))
                .transpose()?,
        })
    }
}

impl TryFrom<&Model> for Actor {
    type Error = EngineError;

    fn try_from(model: &Model) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_uuid(&model.id, "user")?,
            role: Role::try_from(model.role.as_str())?,
            home_base: model
                .base_id
                .as_deref()
                .map(|id| parse_uuid(id, "base"))
                .transpose()?,
        })
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            home_base: user.base_id,
        }
    }
}

/// Hash a password for storage, with a fresh random salt.
pub fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| DbErr::Custom(format!("password hash error: {err}")))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash. A mismatch is `Ok(false)`, only a
/// malformed hash is an error.
pub fn verify_password(password: &str, stored: &str) -> ResultEngine<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|err| DbErr::Custom(format!("password hash error: {err}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(DbErr::Custom(format!("password hash error: {err}")).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_storage_string() {
        for role in [Role::Admin, Role::BaseCommander, Role::LogisticsOfficer] {
            assert_eq!(Role::try_from(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    #[should_panic(expected = "invalid role: general")]
    fn unknown_role_is_rejected() {
        Role::try_from("general").unwrap();
    }

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn actor_carries_the_commander_home_base() {
        let base_id = Uuid::new_v4();
        let model = Model {
            id: Uuid::new_v4().to_string(),
            name: "Cmdr. Shepherd".to_string(),
            email: "shepherd@army.mil".to_string(),
            password_hash: "x".to_string(),
            role: "base_commander".to_string(),
            base_id: Some(base_id.to_string()),
        };

        let actor = Actor::try_from(&model).unwrap();

        assert_eq!(actor.role, Role::BaseCommander);
        assert_eq!(actor.home_base, Some(base_id));
    }
}
