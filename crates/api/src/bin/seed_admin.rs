//! Create the first admin account.
//!
//! Reads `DATABASE_URL`, `ADMIN_EMAIL` and `ADMIN_PASSWORD`. Running it again
//! for an existing email only logs a warning.

use anyhow::{bail, Context};
use folio_api::auth::password::{hash_password, validate_password_strength};
use folio_db::models::admin_user::CreateAdminUser;
use folio_db::repositories::AdminUserRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?;
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;

    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        bail!("ADMIN_EMAIL '{email}' is not an email address");
    }
    if let Err(msg) = validate_password_strength(&password) {
        bail!(msg);
    }

    let pool = folio_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    folio_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
    let input = CreateAdminUser {
        email: email.clone(),
        password_hash,
    };

    match AdminUserRepo::create(&pool, &input).await {
        Ok(admin) => {
            tracing::info!(admin_id = %admin.id, %email, "Admin account created");
            Ok(())
        }
        Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505") => {
            tracing::warn!(%email, "Admin account already registered; nothing to do");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to create admin account"),
    }
}
