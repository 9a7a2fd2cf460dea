//! Trait for browser navigation.

/// Moves the browser to another location.
pub trait Navigator: Send + Sync {
    /// Replace the current location with `url`.
    fn navigate(&self, url: &str);
}
