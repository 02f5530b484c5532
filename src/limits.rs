//! Configurable bounds for archive traversal.

/// Bounds applied while navigating an archive.
///
/// # Example
///
/// ```
/// use tarnav::Limits;
///
/// let limits = Limits::default();
/// assert_eq!(limits.max_chain_len, 16);
///
/// let shallow = Limits {
///     max_chain_len: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of entries looked up while resolving a path, counting the symlinks
    /// followed and the final target.
    ///
    /// A chain longer than this resolves as not found.  Cycles resolve as not found no matter
    /// how large this is.  With the
    /// default, fifteen symlinks pointing at one another and then at a file still resolve.
    ///
    /// Default: 16.
    pub max_chain_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_chain_len: 16,
        }
    }
}

impl Limits {
    /// Create a new `Limits` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits that never give up on a long symlink chain.
    ///
    /// Cycles are still detected, since resolution stops as soon as a path repeats.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            max_chain_len: usize::MAX,
        }
    }

    /// Conservative limits for untrusted archives.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_chain_len: 4,
        }
    }
}
