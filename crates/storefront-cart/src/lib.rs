//! Cart state for the headless storefront.
//!
//! Two layers live here:
//!
//! - [`CartApi`] / [`RemoteCartApi`] - the cart-changing GraphQL operations
//!   (create, read, add, remove, update), all sharing one cart fragment so
//!   every call returns a complete, consistent snapshot, always fresh.
//! - [`CartSession`] - the only stateful component in the storefront core:
//!   a single-writer state machine owning the current cart snapshot and the
//!   durable cart id, coordinating restore, optimistic removal, rollback,
//!   and persistence across reloads.
//!
//! The durable footprint is exactly one field: the cart id, behind the
//! [`CartIdStore`] boundary. Cart contents are re-derived from the remote
//! platform at every session start, never trusted from local storage.

mod api;
mod persist;
mod session;
mod types;

pub use api::{CartApi, CartLineInput, CartLineUpdate, RemoteCartApi};
pub use persist::{CartIdStore, JsonFileCartIdStore, MemoryCartIdStore, PersistError};
pub use session::{CartError, CartSession, SessionState};
pub use types::{Cart, CartCost, CartLine, Merchandise, MerchandiseProduct};
