//! User account management and credential checks.

use sea_orm::{
    ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, Role, User, UserNewCmd, users};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Create a user account.
    ///
    /// The email is stored lowercased and must be unique. A home base is
    /// kept only for base commanders and must exist.
    pub async fn create_user(&self, cmd: UserNewCmd) -> ResultEngine<User> {
        let name = normalize_required_name(&cmd.name, "user name")?;
        let email = normalize_required_name(&cmd.email, "email")?.to_lowercase();
        if cmd.password.len() < 6 {
            return Err(EngineError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        let base_id = match cmd.role {
            Role::BaseCommander => cmd.base_id,
            Role::Admin | Role::LogisticsOfficer => None,
        };
        let password_hash = users::hash_password(&cmd.password)?;

        with_tx!(self, |db_tx| {
            if let Some(base_id) = base_id {
                self.require_base(&db_tx, base_id).await?;
            }
            let clash = users::Entity::find()
                .filter(Expr::cust("LOWER(email)").eq(email.clone()))
                .one(&db_tx)
                .await?;
            if clash.is_some() {
                return Err(EngineError::AlreadyExists("Email".to_string()));
            }

            let row = users::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                name: Set(name.clone()),
                email: Set(email.clone()),
                password_hash: Set(password_hash.clone()),
                role: Set(cmd.role.as_str().to_string()),
                base_id: Set(base_id.map(|id| id.to_string())),
            }
            .insert(&db_tx)
            .await?;

            User::try_from(row)
        })
    }

    /// Check credentials and return the matching profile.
    ///
    /// Unknown email and wrong password answer identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        let row = users::Entity::find()
            .filter(Expr::cust("LOWER(email)").eq(email))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::Unauthorized("Invalid credentials".to_string()))?;

        if !users::verify_password(password, &row.password_hash)? {
            return Err(EngineError::Unauthorized("Invalid credentials".to_string()));
        }

        User::try_from(row)
    }

    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        User::try_from(self.require_user(&self.database, user_id).await?)
    }

    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        users::Entity::find()
            .order_by_asc(users::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    /// Change a user's role, and with it their home base. Roles other than
    /// base commander never keep one.
    pub async fn update_user_role(
        &self,
        user_id: Uuid,
        role: Role,
        base_id: Option<Uuid>,
    ) -> ResultEngine<User> {
        let base_id = match role {
            Role::BaseCommander => base_id,
            Role::Admin | Role::LogisticsOfficer => None,
        };

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            if let Some(base_id) = base_id {
                self.require_base(&db_tx, base_id).await?;
            }

            let updated = users::ActiveModel {
                id: Set(user_id.to_string()),
                role: Set(role.as_str().to_string()),
                base_id: Set(base_id.map(|id| id.to_string())),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            User::try_from(updated)
        })
    }

    pub async fn delete_user(&self, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            users::Entity::delete_by_id(user_id.to_string())
                .exec(&db_tx)
                .await?;

            Ok(())
        })
    }
}
