//! # MySQL account store
//!
//! Reads the `users` table:
//!
//! ```sql
//! CREATE TABLE users (
//!   id             VARCHAR(64) PRIMARY KEY,
//!   email          VARCHAR(255) NULL,
//!   email_verified TINYINT(1) NULL,
//!   role           VARCHAR(64) NULL,
//!   plan           VARCHAR(32) NULL
//! );
//! ```
//!
//! The `mysql` driver is synchronous, so each lookup runs on the blocking
//! thread pool. A `NULL` verification flag reads as unverified.
//!
//! ## Testing Policy
//! Unit tests cover row mapping only. Query execution needs a live server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use mysql::prelude::Queryable;

use super::{Account, AccountStore};
use crate::config::db::DbPool;

pub const FIND_VERIFICATION_SQL: &str = "SELECT email_verified FROM users WHERE id = ?";

pub const FIND_ACCOUNT_SQL: &str =
    "SELECT id, email, email_verified, role, plan FROM users WHERE id = ?";

type AccountRow = (
    String,
    Option<String>,
    Option<bool>,
    Option<String>,
    Option<String>,
);

/// [`AccountStore`] over a shared MySQL pool.
#[derive(Clone)]
pub struct MySqlAccountStore {
    pool: DbPool,
}

impl MySqlAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<T, F>(&self, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut mysql::PooledConn) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_conn().context("get_conn failed")?;
            query(&mut conn)
        })
        .await
        .context("account lookup task failed")?
    }
}

fn account_from_row(row: AccountRow) -> Account {
    let (id, email, email_verified, role, plan) = row;
    Account {
        id,
        email,
        email_verified: email_verified.unwrap_or(false),
        role,
        plan,
    }
}

#[async_trait]
impl AccountStore for MySqlAccountStore {
    async fn find_account(&self, id: &str) -> Result<Option<Account>> {
        let id = id.to_owned();
        let row = self
            .run_blocking(move |conn| {
                conn.exec_first::<AccountRow, _, _>(FIND_ACCOUNT_SQL, (id,))
                    .context("account query failed")
            })
            .await?;

        Ok(row.map(account_from_row))
    }

    async fn find_verification(&self, id: &str) -> Result<Option<bool>> {
        let id = id.to_owned();
        let flag = self
            .run_blocking(move |conn| {
                conn.exec_first::<Option<bool>, _, _>(FIND_VERIFICATION_SQL, (id,))
                    .context("verification query failed")
            })
            .await?;

        Ok(flag.map(|v| v.unwrap_or(false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_full_row() {
        let a = account_from_row((
            "u1".into(),
            Some("c@varsity.io".into()),
            Some(true),
            Some("coach".into()),
            Some("legend".into()),
        ));

        assert_eq!(
            a,
            Account::new("u1")
                .with_email("c@varsity.io")
                .verified(true)
                .with_role("coach")
                .with_plan("legend")
        );
    }

    #[test]
    fn null_flag_is_unverified() {
        let a = account_from_row(("u2".into(), None, None, None, None));
        assert!(!a.email_verified);
        assert_eq!(a, Account::new("u2"));
    }

    #[test]
    fn verification_query_selects_only_the_flag() {
        assert!(FIND_VERIFICATION_SQL.starts_with("SELECT email_verified FROM"));
        assert!(FIND_ACCOUNT_SQL.contains("WHERE id = ?"));
    }
}
