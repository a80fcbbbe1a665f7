//! Per-call cache policy.

use std::time::Duration;

/// How a single remote call interacts with the response cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Always hit the remote API; never read or write the cache.
    /// Used for cart operations and paginated variant fetches.
    NoStore,
    /// Serve a cached response younger than `ttl`; store fresh successful
    /// responses under `tags` for targeted invalidation.
    Cached { ttl: Duration, tags: Vec<String> },
}

impl FetchPolicy {
    /// Always-fresh policy.
    pub fn no_store() -> Self {
        Self::NoStore
    }

    /// Cacheable policy with no tags.
    pub fn cached(ttl: Duration) -> Self {
        Self::Cached {
            ttl,
            tags: Vec::new(),
        }
    }

    /// Attach an invalidation tag (ignored for `NoStore`).
    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        match self {
            Self::Cached { ttl, mut tags } => {
                tags.push(tag.into());
                Self::Cached { ttl, tags }
            }
            Self::NoStore => Self::NoStore,
        }
    }

    /// Whether this policy reads/writes the cache.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Cached { .. })
    }
}
