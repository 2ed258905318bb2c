//! # Account store port
//!
//! The auth chain only ever *reads* accounts: the verification flag for
//! `require_verified`, and the e-mail for `require_admin`. Persistence is
//! owned elsewhere; this module defines the read contract and two adapters.
//!
//! - [`memory::InMemoryAccountStore`] for tests and local runs
//! - [`mysql_store::MySqlAccountStore`] over the `users` table

pub mod memory;
pub mod mysql_store;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::auth::role::{resolve_role, CapabilityClass};

/// The fields of a user record the API cares about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub role: Option<String>,
    pub plan: Option<String>,
}

impl Account {
    /// Unverified account with no e-mail, role, or plan.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            email_verified: false,
            role: None,
            plan: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.email_verified = verified;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// Coach or fan, recomputed from the current role and plan.
    pub fn capability(&self) -> CapabilityClass {
        resolve_role(self.role.as_deref(), self.plan.as_deref())
    }
}

/// Read-only access to user accounts, keyed by subject identifier.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every request through an `Arc`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Full account record, `None` when no account has this id.
    async fn find_account(&self, id: &str) -> Result<Option<Account>>;

    /// Only the verification flag, `None` when no account has this id.
    ///
    /// Adapters that can fetch the single column cheaply should override
    /// this.
    async fn find_verification(&self, id: &str) -> Result<Option<bool>> {
        Ok(self.find_account(id).await?.map(|a| a.email_verified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneAccount(Account);

    #[async_trait]
    impl AccountStore for OneAccount {
        async fn find_account(&self, id: &str) -> Result<Option<Account>> {
            Ok((self.0.id == id).then(|| self.0.clone()))
        }
    }

    #[test]
    fn builder_sets_fields() {
        let a = Account::new("u1")
            .with_email("c@varsity.io")
            .verified(true)
            .with_role("Head Coach")
            .with_plan("rookie");

        assert_eq!(a.id, "u1");
        assert_eq!(a.email.as_deref(), Some("c@varsity.io"));
        assert!(a.email_verified);
        assert_eq!(a.capability(), CapabilityClass::Coach);
    }

    #[test]
    fn capability_follows_role_and_plan() {
        assert_eq!(Account::new("a").capability(), CapabilityClass::Fan);
        assert_eq!(
            Account::new("a").with_plan("legend").capability(),
            CapabilityClass::Coach
        );
        assert_eq!(
            Account::new("a").with_role("fan").with_plan("legend").capability(),
            CapabilityClass::Fan
        );
    }

    #[tokio::test]
    async fn default_find_verification_uses_find_account() {
        let store = OneAccount(Account::new("u1").verified(true));

        assert_eq!(store.find_verification("u1").await.unwrap(), Some(true));
        assert_eq!(store.find_verification("nobody").await.unwrap(), None);
    }
}
