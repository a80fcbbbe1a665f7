//! Resilient data access for the commerce GraphQL API.
//!
//! Everything the storefront reads or writes remotely funnels through
//! [`StorefrontClient::execute`]: one GraphQL operation in, either a decoded
//! payload or a categorized failure out. The client owns the transport
//! discipline so callers never have to:
//!
//! - per-attempt timeout, treated as a retryable transient failure
//! - retry with exponential backoff on rate limits, 5xx, and network faults,
//!   honoring an explicit `Retry-After` when the server supplies one
//! - per-call cache policy: always-fresh, or cached under a TTL with tags
//!   for targeted invalidation
//! - GraphQL-level errors surfaced next to partial data, never thrown

mod cache;
mod client;
mod error;
mod policy;
mod response;
mod retry;

pub use cache::ResponseCache;
pub use client::{ClientSettings, StorefrontClient};
pub use error::{DataError, GraphqlError, GraphqlErrorLocation};
pub use policy::FetchPolicy;
pub use response::GraphqlPayload;
pub use retry::RetryPolicy;
