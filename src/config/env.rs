//! # Environment Variable Utilities
//!
//! Helpers for reading environment variables with common conversions:
//! unsigned integers, trimmed strings, and comma-separated lists.
//!
//! Every reader has a `*_from` twin that takes a provider closure, so
//! configuration parsing can be tested without touching the process
//! environment.
//!
//! # Examples
//! ```rust,no_run
//! use varsityhub_api::config::env::{read_list, read_u32};
//!
//! let port = read_u32("PORT", 4000);
//! let admins = read_list("ADMIN_EMAILS");
//! ```

/// Reads a `u32`, returning `default` when missing or unparsable.
pub fn read_u32(name: &str, default: u32) -> u32 {
    read_u32_from(|k| std::env::var(k).ok(), name, default)
}

/// Provider-based variant of [`read_u32`].
pub fn read_u32_from<F>(provider: F, name: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .and_then(|s| unquote(&s).parse::<u32>().ok())
        .unwrap_or(default)
}

/// Reads a trimmed, non-empty string, falling back to `default`.
///
/// A variable that is set but blank counts as unset.
pub fn read_string_or(name: &str, default: &str) -> String {
    read_string_or_from(|k| std::env::var(k).ok(), name, default)
}

/// Provider-based variant of [`read_string_or`].
pub fn read_string_or_from<F>(provider: F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .map(|v| unquote(&v).to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Reads a comma-separated list. Entries are trimmed and blanks dropped.
pub fn read_list(name: &str) -> Vec<String> {
    read_list_from(|k| std::env::var(k).ok(), name)
}

/// Provider-based variant of [`read_list`].
///
/// ```rust
/// use varsityhub_api::config::env::read_list_from;
///
/// let v = read_list_from(|_| Some(" a@x.io, ,b@x.io ".into()), "ADMIN_EMAILS");
/// assert_eq!(v, vec!["a@x.io", "b@x.io"]);
/// ```
pub fn read_list_from<F>(provider: F, name: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .map(|raw| {
            unquote(&raw)
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn unquote(v: &str) -> &str {
    v.trim().trim_matches(|c| c == '"' || c == '\'')
}
