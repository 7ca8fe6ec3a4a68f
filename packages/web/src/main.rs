use anyhow::Context as _;
use feedback_api::db::{self, PgStore};
use feedback_web::settings::Settings;
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("failed to load settings")?;

    let pool = db::connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to connect to database")?;

    db::MIGRATOR
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("failed to migrate session store")?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(
            settings.session.expiry_days,
        )));

    let app = feedback_web::router(PgStore::new(pool))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
