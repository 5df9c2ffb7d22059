//! HTTP tests driving the full router against an in-memory database.
//!
//! Every scenario goes through the public surface only: accounts come from
//! `/auth/register`, balances are read back through `GET /assets`.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::{Migrator, MigratorTrait};

const PASSWORD: &str = "stockroom";

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let engine = Engine::builder().database(db).build().await.unwrap();
    server::router(engine)
}

fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn put(uri: &str, auth: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, auth)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

async fn register(router: &Router, name: &str, email: &str, role: &str, base_id: Option<&str>) -> String {
    let (status, body) = send(
        router,
        post(
            "/auth/register",
            None,
            &json!({
                "name": name,
                "email": email,
                "password": PASSWORD,
                "role": role,
                "baseId": base_id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    basic(email, PASSWORD)
}

async fn register_admin(router: &Router) -> String {
    register(router, "Quartermaster", "admin@hq.example", "admin", None).await
}

async fn create_base(router: &Router, auth: &str, name: &str) -> String {
    let (status, body) = send(
        router,
        post("/bases", Some(auth), &json!({"name": name, "location": "Sector 4"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["base"]["id"].as_str().unwrap().to_string()
}

async fn create_asset(router: &Router, auth: &str, base_id: &str, name: &str, opening: i64) -> String {
    let (status, body) = send(
        router,
        post(
            "/assets",
            Some(auth),
            &json!({"name": name, "kind": "Weapon", "baseId": base_id, "openingBalance": opening}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["asset"]["id"].as_str().unwrap().to_string()
}

async fn closing_balance(router: &Router, auth: &str, asset_id: &str) -> i64 {
    let (status, body) = send(router, get(&format!("/assets/{asset_id}"), auth)).await;
    assert_eq!(status, StatusCode::OK);
    body["asset"]["closingBalance"].as_i64().unwrap()
}

#[tokio::test]
async fn missing_credentials_are_rejected() {
    let router = test_router().await;

    let request = Request::builder().uri("/assets").body(Body::empty()).unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "message": "Invalid credentials"}));

    register_admin(&router).await;
    let (status, body) = send(&router, get("/assets", &basic("admin@hq.example", "wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid credentials"));
}

#[tokio::test]
async fn register_then_login() {
    let router = test_router().await;

    let (status, registered) = send(
        &router,
        post(
            "/auth/register",
            None,
            &json!({
                "name": "Quartermaster",
                "email": "admin@hq.example",
                "password": PASSWORD,
                "role": "admin",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registered["success"], json!(true));
    assert_eq!(registered["user"]["email"], json!("admin@hq.example"));
    assert_eq!(registered["user"]["role"], json!("admin"));
    assert_eq!(registered["user"]["baseId"], Value::Null);

    let (status, logged_in) = send(
        &router,
        post(
            "/auth/login",
            None,
            &json!({"email": "admin@hq.example", "password": PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["user"]["id"], registered["user"]["id"]);

    let (status, body) = send(
        &router,
        post(
            "/auth/login",
            None,
            &json!({"email": "admin@hq.example", "password": "wrong"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "message": "Invalid credentials"}));
}

#[tokio::test]
async fn management_routes_require_admin() {
    let router = test_router().await;
    let admin = register_admin(&router).await;
    let officer = register(&router, "Officer", "officer@hq.example", "logistics_officer", None).await;

    let (status, body) = send(
        &router,
        post("/bases", Some(&officer), &json!({"name": "Fort Alpha", "location": "Sector 4"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"success": false, "message": "Admin access required"}));

    let (status, _) = send(&router, delete("/users/00000000-0000-0000-0000-000000000000", &officer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Reading is open to any authenticated user.
    let base_id = create_base(&router, &admin, "Fort Alpha").await;
    let (status, body) = send(&router, get("/bases", &officer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bases"][0]["id"], json!(base_id));
}

#[tokio::test]
async fn stock_flows_between_bases() {
    let router = test_router().await;
    let admin = register_admin(&router).await;
    let alpha = create_base(&router, &admin, "Fort Alpha").await;
    let bravo = create_base(&router, &admin, "Fort Bravo").await;
    let rifle = create_asset(&router, &admin, &alpha, "Rifle", 10).await;

    let (status, body) = send(
        &router,
        post(
            "/purchases",
            Some(&admin),
            &json!({"assetId": rifle, "baseId": alpha, "quantity": 5}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let purchase_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(closing_balance(&router, &admin, &rifle).await, 15);

    let (status, _) = send(
        &router,
        post(
            "/transfers",
            Some(&admin),
            &json!({"assetId": rifle, "fromBaseId": alpha, "toBaseId": bravo, "quantity": 4}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closing_balance(&router, &admin, &rifle).await, 11);

    // The destination copy shows up in the asset list under Fort Bravo.
    let (status, body) = send(&router, get("/assets", &admin)).await;
    assert_eq!(status, StatusCode::OK);
    let assets = body["assets"].as_array().unwrap();
    assert_eq!(assets.len(), 2);
    let arrived = assets
        .iter()
        .find(|asset| asset["baseId"] == json!(bravo))
        .unwrap();
    assert_eq!(arrived["name"], json!("Rifle"));
    assert_eq!(arrived["baseName"], json!("Fort Bravo"));
    assert_eq!(arrived["closingBalance"], json!(4));

    let (status, body) = send(&router, get(&format!("/assets/{rifle}/movements"), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = body["movements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|movement| movement["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["purchase", "purchase", "transfer_out"]);
    assert_eq!(body["movements"][2]["balanceAfter"], json!(11));

    let (status, body) = send(&router, get(&format!("/purchases?baseId={alpha}"), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);

    let (status, body) = send(&router, delete(&format!("/purchases/{purchase_id}"), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    assert_eq!(closing_balance(&router, &admin, &rifle).await, 6);

    let (status, body) = send(&router, get("/purchases", &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["transactions"].as_array().unwrap().is_empty());

    let (status, body) = send(&router, get(&format!("/bases/{bravo}/transfers"), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);

    let (status, body) = send(&router, get(&format!("/bases/{bravo}/dashboard"), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    let activity = body["assets"].as_array().unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0]["asset"]["closingBalance"], json!(4));
    assert_eq!(activity[0]["movements"][0]["kind"], json!("transfer_in"));
}

#[tokio::test]
async fn commander_purchase_history_is_scoped_to_their_base() {
    let router = test_router().await;
    let admin = register_admin(&router).await;
    let alpha = create_base(&router, &admin, "Fort Alpha").await;
    let bravo = create_base(&router, &admin, "Fort Bravo").await;
    let rifle = create_asset(&router, &admin, &alpha, "Rifle", 10).await;
    let radio = create_asset(&router, &admin, &bravo, "Radio", 10).await;

    for (asset, base) in [(&rifle, &alpha), (&radio, &bravo)] {
        let (status, _) = send(
            &router,
            post(
                "/purchases",
                Some(&admin),
                &json!({"assetId": asset, "baseId": base, "quantity": 1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&router, get("/purchases", &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 2);

    let commander = register(
        &router,
        "Cmdr",
        "cmdr@hq.example",
        "base_commander",
        Some(alpha.as_str()),
    )
    .await;

    // Commanders only see their own base, even when they ask for another.
    for uri in ["/purchases", &format!("/purchases?baseId={bravo}")] {
        let (status, body) = send(&router, get(uri, &commander)).await;
        assert_eq!(status, StatusCode::OK);
        let transactions = body["transactions"].as_array().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0]["baseId"], json!(alpha));
    }
}

#[tokio::test]
async fn engine_failures_map_to_http_statuses() {
    let router = test_router().await;
    let admin = register_admin(&router).await;
    let alpha = create_base(&router, &admin, "Fort Alpha").await;
    let shells = create_asset(&router, &admin, &alpha, "Shells", 3).await;

    let (status, body) = send(
        &router,
        post(
            "/purchases",
            Some(&admin),
            &json!({"assetId": "11111111-2222-3333-4444-555555555555", "baseId": alpha, "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Asset not found"}));

    let (status, body) = send(
        &router,
        post("/bases", Some(&admin), &json!({"name": "fort alpha", "location": "elsewhere"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("Base already exists"));

    let (status, body) = send(
        &router,
        post(
            "/expenditures",
            Some(&admin),
            &json!({"assetId": shells, "baseId": alpha, "quantity": 5}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Not enough balance to expend"));

    let (status, body) = send(
        &router,
        post(
            "/purchases",
            Some(&admin),
            &json!({"assetId": shells, "baseId": alpha, "quantity": 0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Quantity must be positive"));

    let (status, body) = send(
        &router,
        post(
            "/assets",
            Some(&admin),
            &json!({"name": "Flares", "kind": "Equipment", "baseId": alpha, "openingBalance": -1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Opening balance must not be negative"));
}

#[tokio::test]
async fn admins_manage_bases_and_roles() {
    let router = test_router().await;
    let admin = register_admin(&router).await;
    let alpha = create_base(&router, &admin, "Fort Alpha").await;

    let (status, body) = send(
        &router,
        put(&format!("/bases/{alpha}"), &admin, &json!({"name": "Fort Echo"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    let (_, body) = send(&router, get("/bases", &admin)).await;
    assert_eq!(body["bases"][0]["name"], json!("Fort Echo"));

    register(&router, "Officer", "officer@hq.example", "logistics_officer", None).await;
    let (_, body) = send(&router, get("/users", &admin)).await;
    let officer_id = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|user| user["email"] == json!("officer@hq.example"))
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = send(
        &router,
        put(
            &format!("/users/{officer_id}/role"),
            &admin,
            &json!({"role": "base_commander", "baseId": alpha}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], json!("base_commander"));
    assert_eq!(body["user"]["baseId"], json!(alpha));

    let (status, body) = send(&router, delete(&format!("/users/{officer_id}"), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}
