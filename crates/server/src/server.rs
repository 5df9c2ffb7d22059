use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{ServerError, assets, auth as auth_routes, bases, ledger, movements, users};
use engine::{Engine, EngineError};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolve HTTP Basic credentials to a user and stash the profile in the
/// request extensions.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(credentials)) = auth_header else {
        return Err(EngineError::Unauthorized("Invalid credentials".to_string()).into());
    };

    let user = state
        .engine
        .authenticate(credentials.username(), credentials.password())
        .await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Build the full application router around an engine.
///
/// Public so integration tests can drive it through `tower::ServiceExt`
/// without binding a socket.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    let protected = Router::new()
        .route("/assets", get(assets::list).post(assets::create))
        .route(
            "/assets/{id}",
            get(assets::get).put(assets::update).delete(assets::remove),
        )
        .route("/assets/{id}/movements", get(movements::for_asset))
        .route("/bases", get(bases::list).post(bases::create))
        .route("/bases/{id}", put(bases::update).delete(bases::remove))
        .route("/bases/{id}/movements", get(movements::for_base))
        .route("/bases/{id}/transfers", get(ledger::base_transfers))
        .route("/bases/{id}/dashboard", get(movements::dashboard))
        .route("/purchases", get(ledger::purchases).post(ledger::purchase_new))
        .route("/purchases/{id}", delete(ledger::purchase_delete))
        .route("/transfers", get(ledger::transfers).post(ledger::transfer_new))
        .route("/transfers/{id}", delete(ledger::transfer_delete))
        .route(
            "/assignments",
            get(ledger::assignments).post(ledger::assignment_new),
        )
        .route("/assignments/{id}", delete(ledger::assignment_delete))
        .route(
            "/expenditures",
            get(ledger::expenditures).post(ledger::expenditure_new),
        )
        .route("/expenditures/{id}", delete(ledger::expenditure_delete))
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", delete(users::remove))
        .route("/users/{id}/role", put(users::update_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/auth/register", post(auth_routes::register))
        .route("/auth/login", post(auth_routes::login))
        .merge(protected)
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
