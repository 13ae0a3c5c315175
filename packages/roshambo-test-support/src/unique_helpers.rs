//! Test helpers for generating unique test data
//!
//! ULID suffixes keep logins distinct across tests that share a store.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`
///
/// # Examples
/// ```
/// use roshambo_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique login with the given prefix, lowercase so that login
/// ordering in paging tests follows the prefix.
///
/// # Examples
/// ```
/// use roshambo_test_support::unique_helpers::unique_login;
///
/// let login = unique_login("alice");
/// assert!(login.starts_with("alice-"));
/// assert_eq!(login, login.to_lowercase());
/// ```
pub fn unique_login(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}
