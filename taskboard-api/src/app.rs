/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_api::{app::{build_router, AppState}, config::Config};
/// use taskboard_shared::store::memory::InMemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(InMemoryStore::new()), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::auth::require_identity, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use taskboard_shared::{
    auth::password::HashCost,
    services::{AccountService, TaskService},
    store::Store,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; every field
/// is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,

    pub tasks: TaskService,

    /// Backend handle for health checks
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state with both services sharing one store
    pub fn new<S: Store + 'static>(store: Arc<S>, config: Config) -> Self {
        Self {
            accounts: AccountService::new(store.clone(), store.clone()),
            tasks: TaskService::new(store.clone(), store.clone()),
            store,
            config: Arc::new(config),
        }
    }

    /// Overrides the password hashing cost (tests use a cheap one)
    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.accounts = self.accounts.with_hash_cost(cost);
        self
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET    /health
/// ├── POST   /registrar
/// ├── POST   /login
/// ├── GET    /usuarios
/// ├── GET    /usuarios/:id
/// ├── DELETE /usuarios/:id            (auth)
/// ├── GET    /usuarios/:id/tarefas
/// ├── GET    /tarefas
/// ├── POST   /tarefas                 (auth)
/// ├── GET    /tarefas/:id
/// ├── PUT    /tarefas/:id             (auth)
/// ├── DELETE /tarefas/:id             (auth)
/// └── GET    /tarefas/status/:status
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. CORS (tower-http CorsLayer)
/// 2. Logging (tower-http TraceLayer)
/// 3. Bearer authentication and account lookup (mutating routes only)
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/registrar", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/usuarios", get(routes::accounts::list_accounts))
        .route("/usuarios/:id", get(routes::accounts::get_account))
        .route("/usuarios/:id/tarefas", get(routes::accounts::list_account_tasks))
        .route("/tarefas", get(routes::tasks::list_tasks))
        .route("/tarefas/:id", get(routes::tasks::get_task))
        .route("/tarefas/status/:status", get(routes::tasks::list_tasks_by_status));

    let protected_routes = Router::new()
        .route("/usuarios/:id", delete(routes::accounts::delete_account))
        .route("/tarefas", post(routes::tasks::create_task))
        .route(
            "/tarefas/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        ));

    let cors = cors_layer(&state.config);

    // Same-path method routers merge, so GET and PUT on /tarefas/:id coexist
    protected_routes
        .merge(public_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
