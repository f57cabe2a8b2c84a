use argon2::Params;
use sea_orm::Database;
use tracing::info;

use vitrine_auth::config::AuthConfig;
use vitrine_auth::crypto::SecretHasher;
use vitrine_auth::infra::mail::MailNotifier;
use vitrine_auth::router::build_router;
use vitrine_auth::state::AppState;
use vitrine_core::config::Config as _;
use vitrine_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url).await?;

    let redis = deadpool_redis::Config::from_url(&config.redis_url)
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))?;

    let hasher = SecretHasher::with_cost(
        config.argon2_m_cost.max(Params::MIN_M_COST),
        config.argon2_t_cost,
    )?;

    let notifier = match &config.smtp_host {
        Some(host) => MailNotifier::smtp(
            host,
            config.smtp_port,
            config.smtp_credentials(),
            &config.mail_from,
        )?,
        None => {
            tracing::warn!("SMTP_HOST unset, login codes will not be mailed");
            MailNotifier::Log
        }
    };

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret.clone(),
        jwt_ttl_secs: config.jwt_ttl_secs(),
        expose_login_code: !config.is_production(),
        hasher,
        notifier,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, app_env = %config.app_env, "auth service listening");
    axum::serve(listener, router).await?;
    Ok(())
}
