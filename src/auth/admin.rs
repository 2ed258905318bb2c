use std::collections::HashSet;

/// Case-insensitive allow-list of admin e-mail addresses.
///
/// ```
/// use varsityhub_api::auth::admin::AdminEmails;
///
/// let admins = AdminEmails::new(["Ops@Varsity.io"]);
/// assert!(admins.contains("ops@varsity.io"));
/// assert!(!admins.contains(""));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminEmails(HashSet<String>);

impl AdminEmails {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, email: &str) -> bool {
        let email = email.trim();
        !email.is_empty() && self.0.contains(&email.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
