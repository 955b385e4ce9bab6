use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod email;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use email::Mailer;
use middleware::auth::AdminSessions;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::health::health,
        features::clubs::handlers::list_clubs,
        features::clubs::handlers::create_club,
        features::registrations::handlers::submit_registration,
        features::registrations::handlers::check_email,
        features::registrations::handlers::check_phone,
        features::admin::handlers::login,
        features::admin::handlers::logout,
        features::admin::handlers::list_registrations,
        features::admin::handlers::recalculate_missing,
        features::admin::handlers::recalculate_all,
    ),
    components(
        schemas(
            storage::dto::club::CreateClubRequest,
            storage::dto::club::ClubResponse,
            storage::dto::registration::AthleteInput,
            storage::dto::registration::ClubRef,
            storage::dto::registration::CreateRegistrationRequest,
            storage::dto::registration::RegistrationCreatedResponse,
            storage::dto::registration::ExistsResponse,
            storage::dto::registration::RecalculationResponse,
            storage::dto::registration::AdminRegistrationResponse,
            features::admin::handlers::LoginRequest,
            features::admin::handlers::LoginResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoint"),
        (name = "clubs", description = "Public club reference table"),
        (name = "registrations", description = "Athlete and pair sign-ups"),
        (name = "admin", description = "Token-gated administration endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Opaque admin token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting CPSS registration API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let mailer = Mailer::new(config.resend_api_key.clone(), config.email_from.clone())
        .context("Failed to create email client")?;

    let sessions = AdminSessions::new();
    let state = AppState {
        db,
        sessions: sessions.clone(),
        mailer,
        admin_password: config.admin_password.clone(),
    };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", features::routes(sessions))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
