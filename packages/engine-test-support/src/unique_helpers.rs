//! Unique names for test identities, so tests sharing a rating store never
//! touch each other's records.

use uuid::Uuid;

/// `{prefix}-{uuid}`
///
/// ```
/// use engine_test_support::unique_str;
///
/// let a = unique_str("model");
/// let b = unique_str("model");
/// assert_ne!(a, b);
/// assert!(a.starts_with("model-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
