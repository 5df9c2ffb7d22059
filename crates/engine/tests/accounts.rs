//! User account tests against a fresh in-memory database.

use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use engine::{Engine, EngineError, Role, UserNewCmd};
use migration::{Migrator, MigratorTrait};

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db)
}

#[tokio::test]
async fn create_and_authenticate() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_user(UserNewCmd::new(
            "Quartermaster",
            "  Admin@HQ.example ",
            "stockroom",
            Role::Admin,
        ))
        .await
        .unwrap();
    assert_eq!(created.email, "admin@hq.example");
    assert_eq!(created.role, Role::Admin);
    assert_eq!(created.base_id, None);

    // Email matching ignores case and surrounding whitespace.
    let user = engine.authenticate("ADMIN@hq.example", "stockroom").await.unwrap();
    assert_eq!(user.id, created.id);

    let err = engine
        .authenticate("admin@hq.example", "wrong password")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Unauthorized("Invalid credentials".to_string()));

    let err = engine.authenticate("nobody@hq.example", "stockroom").await.unwrap_err();
    assert_eq!(err, EngineError::Unauthorized("Invalid credentials".to_string()));
}

#[tokio::test]
async fn duplicate_emails_are_rejected() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_user(UserNewCmd::new("A", "clerk@hq.example", "stockroom", Role::Admin))
        .await
        .unwrap();
    let err = engine
        .create_user(UserNewCmd::new("B", "CLERK@hq.example", "stockroom", Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::AlreadyExists("Email".to_string()));
    assert_eq!(err.to_string(), "Email already exists");
}

#[tokio::test]
async fn weak_credentials_are_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_user(UserNewCmd::new("A", "clerk@hq.example", "12345", Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("Password must be at least 6 characters".to_string())
    );

    let err = engine
        .create_user(UserNewCmd::new("  ", "clerk@hq.example", "stockroom", Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Validation("user name must not be empty".to_string()));
}

#[tokio::test]
async fn home_base_only_sticks_to_commanders() {
    let (engine, _db) = engine_with_db().await;
    let base_id = engine.create_base("Fort Alpha", "Sector 4").await.unwrap().id;

    let officer = engine
        .create_user(
            UserNewCmd::new("Officer", "officer@hq.example", "stockroom", Role::LogisticsOfficer)
                .base_id(base_id),
        )
        .await
        .unwrap();
    assert_eq!(officer.base_id, None);

    let commander = engine
        .create_user(
            UserNewCmd::new("Cmdr", "cmdr@hq.example", "stockroom", Role::BaseCommander)
                .base_id(base_id),
        )
        .await
        .unwrap();
    assert_eq!(commander.base_id, Some(base_id));

    let err = engine
        .create_user(
            UserNewCmd::new("Lost", "lost@hq.example", "stockroom", Role::BaseCommander)
                .base_id(Uuid::new_v4()),
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("Base not found".to_string()));
}

#[tokio::test]
async fn role_updates_reassign_the_home_base() {
    let (engine, _db) = engine_with_db().await;
    let base_id = engine.create_base("Fort Alpha", "Sector 4").await.unwrap().id;

    let user = engine
        .create_user(
            UserNewCmd::new("Cmdr", "cmdr@hq.example", "stockroom", Role::BaseCommander)
                .base_id(base_id),
        )
        .await
        .unwrap();

    // Promotion away from base commander drops the home base.
    let promoted = engine.update_user_role(user.id, Role::Admin, None).await.unwrap();
    assert_eq!(promoted.role, Role::Admin);
    assert_eq!(promoted.base_id, None);

    let demoted = engine
        .update_user_role(user.id, Role::BaseCommander, Some(base_id))
        .await
        .unwrap();
    assert_eq!(demoted.role, Role::BaseCommander);
    assert_eq!(demoted.base_id, Some(base_id));

    let err = engine
        .update_user_role(Uuid::new_v4(), Role::Admin, None)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("User not found".to_string()));
}

#[tokio::test]
async fn listing_and_deleting_users() {
    let (engine, _db) = engine_with_db().await;

    let bob = engine
        .create_user(UserNewCmd::new("Bob", "bob@hq.example", "stockroom", Role::Admin))
        .await
        .unwrap();
    engine
        .create_user(UserNewCmd::new("Alice", "alice@hq.example", "stockroom", Role::Admin))
        .await
        .unwrap();

    let names: Vec<String> = engine
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|user| user.name)
        .collect();
    assert_eq!(names, vec!["Alice".to_string(), "Bob".to_string()]);

    engine.delete_user(bob.id).await.unwrap();
    let err = engine.user(bob.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("User not found".to_string()));
}
