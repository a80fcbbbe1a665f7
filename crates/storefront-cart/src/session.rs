//! The cart session state machine.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::api::{CartApi, CartLineInput, CartLineUpdate};
use crate::persist::CartIdStore;
use crate::types::Cart;

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No cart id held.
    Uninitialized,
    /// A persisted id is being re-validated against the remote platform.
    Restoring,
    /// The snapshot matches a live remote cart.
    Ready,
    /// A mutation is in flight; the snapshot may be an optimistic projection.
    Mutating,
}

/// Failure of a session-level cart operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A mutation arrived while another was still in flight. Not queued and
    /// not coalesced: the caller retries once the first settles.
    #[error("another cart mutation is already in flight")]
    MutationInFlight,

    /// The remote platform would not create a cart.
    #[error("could not create a cart")]
    CreateFailed,

    /// The remote platform rejected the mutation; the previous snapshot was
    /// restored.
    #[error("the cart mutation failed and the cart was restored")]
    MutationFailed,
}

struct Inner {
    state: SessionState,
    cart: Option<Cart>,
}

/// The single-writer owner of cart state.
///
/// Constructed explicitly and passed to whoever needs it; there is no
/// global instance. Any number of consumers may read the snapshot through
/// [`cart`](CartSession::cart); writes only happen through the session's own
/// methods. The internal lock is never held across an await, so readers
/// always observe a coherent snapshot, including the optimistic projection
/// published during a removal.
pub struct CartSession {
    api: Arc<dyn CartApi>,
    ids: Arc<dyn CartIdStore>,
    inner: Mutex<Inner>,
}

impl CartSession {
    /// Create a session over a cart API and an id store.
    pub fn new(api: Arc<dyn CartApi>, ids: Arc<dyn CartIdStore>) -> Self {
        Self {
            api,
            ids,
            inner: Mutex::new(Inner {
                state: SessionState::Uninitialized,
                cart: None,
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    /// A copy of the current cart snapshot.
    pub fn cart(&self) -> Option<Cart> {
        self.lock().cart.clone()
    }

    /// The checkout handoff URL from the current snapshot.
    pub fn checkout_url(&self) -> Option<String> {
        self.lock().cart.as_ref().map(|cart| cart.checkout_url.clone())
    }

    /// Restore the session from the persisted cart id, if one exists.
    ///
    /// An id the remote platform no longer recognizes is expected (expired
    /// carts): it is discarded and the session starts over, never surfaced
    /// as an error.
    pub async fn init(&self) {
        let Some(cart_id) = self.ids.load() else {
            self.publish(SessionState::Uninitialized, None);
            return;
        };

        {
            let mut inner = self.lock();
            if inner.state == SessionState::Mutating {
                tracing::warn!("init called while a mutation is in flight, skipping");
                return;
            }
            inner.state = SessionState::Restoring;
        }

        match self.api.read(&cart_id).await {
            Some(cart) => {
                tracing::debug!(cart_id = %cart.id, lines = cart.lines.len(), "cart restored");
                self.publish(SessionState::Ready, Some(cart));
            }
            None => {
                tracing::debug!(cart_id = %cart_id, "stored cart id no longer valid, discarding");
                if let Err(error) = self.ids.clear() {
                    tracing::warn!(%error, "failed to clear stale cart id");
                }
                self.publish(SessionState::Uninitialized, None);
            }
        }
    }

    /// Add a variant to the cart, creating the remote cart first if this
    /// session does not hold one yet.
    ///
    /// The returned snapshot is adopted verbatim: quantities are never
    /// recomputed locally for an add.
    pub async fn add_item(&self, variant_id: &str, quantity: u32) -> Result<(), CartError> {
        let (prior_state, prior_cart) = self.begin_mutation()?;
        let mut rollback_state = prior_state;
        let mut rollback_cart = prior_cart;

        let cart_id = match self.ids.load() {
            Some(id) => id,
            None => match self.api.create().await {
                Some(cart) => {
                    let id = cart.id.clone();
                    // Persist immediately: the id must survive even if the
                    // add below fails or the process dies.
                    if let Err(error) = self.ids.save(&id) {
                        tracing::warn!(%error, "failed to persist new cart id");
                    }
                    self.set_cart(Some(cart.clone()));
                    rollback_state = SessionState::Ready;
                    rollback_cart = Some(cart);
                    id
                }
                None => {
                    self.publish(prior_state, rollback_cart);
                    return Err(CartError::CreateFailed);
                }
            },
        };

        let lines = [CartLineInput {
            merchandise_id: variant_id.to_string(),
            quantity,
        }];
        match self.api.add_lines(&cart_id, &lines).await {
            Some(cart) => {
                self.publish(SessionState::Ready, Some(cart));
                Ok(())
            }
            None => {
                self.publish(rollback_state, rollback_cart);
                Err(CartError::MutationFailed)
            }
        }
    }

    /// Remove a line, reflecting the removal optimistically before the
    /// remote call resolves.
    ///
    /// On failure the captured snapshot is restored exactly as it was.
    pub async fn remove_item(&self, line_id: &str) -> Result<(), CartError> {
        let Some(cart_id) = self.ids.load() else {
            return Ok(());
        };

        let (prior_state, prior_cart) = self.begin_mutation()?;
        let Some(rollback) = prior_cart else {
            self.publish(prior_state, None);
            return Ok(());
        };

        // Published synchronously so the UI reflects the removal instantly;
        // totals stay stale until the authoritative response lands.
        self.set_cart(Some(rollback.without_line(line_id)));

        let line_ids = [line_id.to_string()];
        match self.api.remove_lines(&cart_id, &line_ids).await {
            Some(cart) => {
                self.publish(SessionState::Ready, Some(cart));
                Ok(())
            }
            None => {
                tracing::warn!(line_id, "line removal failed, restoring previous cart");
                self.publish(prior_state, Some(rollback));
                Err(CartError::MutationFailed)
            }
        }
    }

    /// Change a line's quantity.
    ///
    /// No optimistic projection here: a quantity change moves the totals,
    /// and totals are only ever authoritative. Adopt-or-restore, like add.
    pub async fn update_item(&self, line_id: &str, quantity: u32) -> Result<(), CartError> {
        let Some(cart_id) = self.ids.load() else {
            return Ok(());
        };

        let (prior_state, prior_cart) = self.begin_mutation()?;

        let updates = [CartLineUpdate {
            id: line_id.to_string(),
            quantity,
        }];
        match self.api.update_lines(&cart_id, &updates).await {
            Some(cart) => {
                self.publish(SessionState::Ready, Some(cart));
                Ok(())
            }
            None => {
                self.publish(prior_state, prior_cart);
                Err(CartError::MutationFailed)
            }
        }
    }

    fn begin_mutation(&self) -> Result<(SessionState, Option<Cart>), CartError> {
        let mut inner = self.lock();
        if inner.state == SessionState::Mutating {
            return Err(CartError::MutationInFlight);
        }
        let prior = (inner.state, inner.cart.clone());
        inner.state = SessionState::Mutating;
        Ok(prior)
    }

    fn publish(&self, state: SessionState, cart: Option<Cart>) {
        let mut inner = self.lock();
        inner.state = state;
        inner.cart = cart;
    }

    fn set_cart(&self, cart: Option<Cart>) {
        self.lock().cart = cart;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
