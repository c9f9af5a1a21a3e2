use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gangway_api::config::ServerConfig;
use gangway_api::router::build_app_router;
use gangway_api::state::AppState;
use gangway_core::catalog::FormCatalog;
use gangway_core::identity::RandomEmployeeIdGenerator;
use gangway_db::identity::PgIdentityProvider;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gangway_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = gangway_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    gangway_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    gangway_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- App state ---
    let catalog = FormCatalog::standard();
    tracing::info!(form_types = catalog.required_count(), "Form catalog loaded");

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        catalog,
        identity: Arc::new(PgIdentityProvider::new(pool)),
        employee_ids: Arc::new(RandomEmployeeIdGenerator),
    };

    bootstrap_admin(&state).await;

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}

/// Provision the initial admin account from `BOOTSTRAP_ADMIN_EMAIL` /
/// `BOOTSTRAP_ADMIN_PASSWORD` when both are set and the account does not
/// exist yet. Without this there is no way to reach the privileged signup
/// surface on a fresh install.
async fn bootstrap_admin(state: &AppState) {
    let (email, password) = match (
        std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
        std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email, password),
        _ => return,
    };

    let existing = gangway_db::repositories::AccountRepo::find_by_email(&state.pool, &email)
        .await
        .expect("Bootstrap admin lookup failed");
    if existing.is_some() {
        return;
    }

    let request = gangway_api::engine::provisioner::ProvisionRequest {
        email: email.clone(),
        password,
        role: gangway_core::roles::ROLE_ADMIN.to_string(),
        full_name: "Administrator".to_string(),
        department: None,
        position: None,
        start_date: None,
    };
    match gangway_api::engine::provisioner::provision(state, request).await {
        Ok(account) => {
            tracing::info!(account_id = account.id, %email, "Bootstrap admin provisioned")
        }
        Err(e) => tracing::error!(error = %e, "Bootstrap admin provisioning failed"),
    }
}
