//! Optimistic mutation flows over the store.
//!
//! Each mutation applies its local effect first, then reconciles with the
//! server response or rolls the store back to its pre-mutation truth. No
//! failure path retries automatically; callers decide whether to retry.

use rentora_core::listing::{CreateListing, UpdateListing};
use rentora_core::types::DbId;

use crate::api::{ListQuery, ListingsApi};
use crate::error::ClientError;
use crate::model::Listing;
use crate::store::{Action, Store};

/// Listings state plus the API it reconciles against.
pub struct ListingsFacade<A: ListingsApi> {
    api: A,
    store: Store,
}

impl<A: ListingsApi> ListingsFacade<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: Store::new(),
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Replace the active filters used by [`ListingsFacade::load`].
    pub fn set_filters(&mut self, query: ListQuery) {
        self.store.dispatch(Action::SetFilters(query));
    }

    /// Drop all filters back to defaults.
    pub fn reset_filters(&mut self) {
        self.store.dispatch(Action::ResetFilters);
    }

    /// Fetch a page matching the active filters and replace the local list
    /// with it.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let query = self.store.filters().clone();
        self.store.dispatch(Action::LoadStarted);
        match self.api.list(&query).await {
            Ok(envelope) => {
                self.store.dispatch(Action::PageLoaded {
                    listings: envelope.data,
                    meta: envelope.meta,
                });
                Ok(())
            }
            Err(e) => {
                self.store.dispatch(Action::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Select a record from local state for the detail view.
    pub fn select(&mut self, id: DbId) -> Result<(), ClientError> {
        let listing = self
            .store
            .find(id)
            .cloned()
            .ok_or(ClientError::NotInStore(id))?;
        self.store.dispatch(Action::Select(Some(listing)));
        Ok(())
    }

    /// Optimistic create: a provisional record is prepended immediately,
    /// then replaced in-place by the server record, or removed entirely if
    /// the server rejects the create.
    pub async fn create(&mut self, payload: CreateListing) -> Result<DbId, ClientError> {
        let provisional = Listing::provisional(&payload);
        let provisional_id = provisional.id;
        self.store.dispatch(Action::PrependProvisional(provisional));

        match self.api.create(&payload).await {
            Ok(created) => {
                let id = created.id;
                self.store.dispatch(Action::Replace {
                    id: provisional_id,
                    with: created,
                });
                Ok(id)
            }
            Err(e) => {
                self.store.dispatch(Action::Remove(provisional_id));
                self.store.dispatch(Action::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Optimistic update: the patch is merged over the local record
    /// immediately; on failure the exact pre-mutation snapshot is restored
    /// to both the list and the selection.
    ///
    /// A record absent from local state aborts before any network call.
    pub async fn update(&mut self, id: DbId, patch: UpdateListing) -> Result<(), ClientError> {
        let snapshot = self
            .store
            .find(id)
            .cloned()
            .ok_or(ClientError::NotInStore(id))?;

        let optimistic = snapshot.merged(&patch);
        self.store.dispatch(Action::Replace {
            id,
            with: optimistic,
        });

        match self.api.update(id, &patch).await {
            Ok(authoritative) => {
                self.store.dispatch(Action::Replace {
                    id,
                    with: authoritative,
                });
                Ok(())
            }
            Err(e) => {
                self.store.dispatch(Action::Replace { id, with: snapshot });
                self.store.dispatch(Action::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Optimistic delete: the record disappears immediately; on failure it
    /// is appended back (original position is not restored).
    pub async fn delete(&mut self, id: DbId) -> Result<(), ClientError> {
        let snapshot = self
            .store
            .find(id)
            .cloned()
            .ok_or(ClientError::NotInStore(id))?;
        self.store.dispatch(Action::Remove(id));

        match self.api.delete(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.store.dispatch(Action::Append(snapshot));
                self.store.dispatch(Action::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Dismiss the recorded failure notification.
    pub fn clear_error(&mut self) {
        self.store.dispatch(Action::ClearError);
    }
}
