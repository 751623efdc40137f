//! Applies pending schema migrations and checks pool connectivity.
//!
//! Reads `USER_ITEMS_*` settings, migrates the database, then opens the
//! connection pool, checks out one connection, and closes the pool again.

use color_eyre::eyre::{Context, Report, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use user_items::config::StoreSettings;
use user_items::outbound::persistence::{DbPool, run_migrations};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StoreSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load store settings: {err}"))?;
    let pool_config = settings.pool_config()?;

    // The migration connection drives its own runtime, so it runs before ours.
    let applied =
        run_migrations(pool_config.database_url()).wrap_err("failed to apply migrations")?;
    info!(applied, "migrations complete");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build runtime")?;
    runtime.block_on(async move {
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to open connection pool")?;
        let checked = pool.get().await.map(drop);
        pool.close();
        checked.wrap_err("failed to check out a connection")?;
        info!("database connectivity verified");
        Ok::<(), Report>(())
    })
}
