//! # Database Configuration and Pool Factory
//!
//! Reads `DATABASE_URL` / `DATABASE_MAX_CONN` and builds the MySQL pool used
//! by [`MySqlAccountStore`](crate::account::mysql_store::MySqlAccountStore).
//!
//! ```rust,no_run
//! use varsityhub_api::config::db::{create_pool, DbConfig};
//!
//! let cfg = DbConfig::from_env();
//! if cfg.is_valid() {
//!     let pool = create_pool(&cfg).expect("failed to create pool");
//! }
//! ```

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use mysql::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts};

/// Database connection configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

impl DbConfig {
    pub fn from_env() -> Self {
        Self::from_provider(|k| std::env::var(k).ok())
    }

    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = provider("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let max_connections = provider("DATABASE_MAX_CONN").and_then(|s| s.trim().parse::<u32>().ok());

        Self {
            url,
            max_connections,
        }
    }

    /// Returns `true` if `DATABASE_URL` is present.
    pub fn is_valid(&self) -> bool {
        self.url.is_some()
    }
}

/// Shared pool handle.
pub type DbPool = Arc<Pool>;

/// Creates a MySQL pool from `cfg`.
///
/// # Errors
/// - `DATABASE_URL` is missing or malformed
/// - `DATABASE_MAX_CONN` is zero
/// - the pool cannot be created
pub fn create_pool(cfg: &DbConfig) -> anyhow::Result<DbPool> {
    let url = cfg
        .url
        .as_ref()
        .ok_or_else(|| anyhow!("DATABASE_URL is not set"))?;
    let opts = Opts::from_url(url).context("invalid DATABASE_URL")?;

    let mut builder = OptsBuilder::from_opts(opts);
    if let Some(max) = cfg.max_connections {
        if max == 0 {
            bail!("DATABASE_MAX_CONN must be at least 1");
        }
        let constraints = PoolConstraints::new(1, max as usize)
            .ok_or_else(|| anyhow!("invalid pool constraints (max={max})"))?;
        builder = builder.pool_opts(PoolOpts::default().with_constraints(constraints));
    }

    let pool = Pool::new(builder).context("failed to create MySQL pool")?;
    Ok(Arc::new(pool))
}
