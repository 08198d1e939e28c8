use axum_helpers::JwtAuth;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{PostgresUserRepository, UserService};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<Migrator>(&db, "identity-api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let jwt_auth = JwtAuth::new(&config.jwt);

    let repository = PostgresUserRepository::new(db);
    let service = UserService::new(repository, jwt_auth.clone());

    let api_routes = api::routes(service, jwt_auth);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    info!("Starting identity API");

    axum_helpers::create_app(router, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Identity API shutdown complete");
    Ok(())
}
