use std::{collections::HashMap, sync::RwLock};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{Account, AccountStore};

/// [`AccountStore`] backed by a map. Used in tests and when the server runs
/// without `DATABASE_URL`.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let map = accounts.into_iter().map(|a| (a.id.clone(), a)).collect();
        Self {
            accounts: RwLock::new(map),
        }
    }

    /// Inserts or replaces an account.
    pub fn insert(&self, account: Account) -> Result<()> {
        self.accounts
            .write()
            .map_err(|_| anyhow!("account store lock poisoned"))?
            .insert(account.id.clone(), account);
        Ok(())
    }

    /// Returns `false` if no account has this id.
    pub fn set_verified(&self, id: &str, verified: bool) -> Result<bool> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| anyhow!("account store lock poisoned"))?;

        Ok(match accounts.get_mut(id) {
            Some(a) => {
                a.email_verified = verified;
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_account(&self, id: &str) -> Result<Option<Account>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| anyhow!("account store lock poisoned"))?;
        Ok(accounts.get(id).cloned())
    }
}
