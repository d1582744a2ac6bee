use crate::shortcode::ShortCode;

/// The caller-facing surface of a URL shortener.
///
/// Collaborators such as the HTTP gateway depend on this trait rather than
/// on a concrete registry, so persistence stays out of their reach.
pub trait Shortener: Send + Sync + 'static {
    /// Stores `target` under a freshly generated short code and returns the code.
    fn shorten(&self, target: &str) -> ShortCode;

    /// Resolves a short code to its target, counting the access.
    /// Returns `None` if the code does not exist or has expired.
    fn resolve(&self, code: &ShortCode) -> Option<String>;

    /// Returns how many times the code has been resolved, without counting
    /// this call. Returns `None` if the code does not exist or has expired.
    fn stats(&self, code: &ShortCode) -> Option<u64>;
}
