//! Single-writer state container for listings.
//!
//! All mutation goes through [`Store::dispatch`]; reads go through
//! selectors. There are no other entry points, so concurrent optimistic
//! mutations against different records cannot corrupt each other: every
//! write is one serialized action.

use rentora_core::page::PageMeta;
use rentora_core::types::DbId;

use crate::api::ListQuery;
use crate::model::Listing;

/// Every way the store can change.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the active filters used by subsequent loads.
    SetFilters(ListQuery),
    /// Drop all filters back to defaults.
    ResetFilters,
    /// A fetch started.
    LoadStarted,
    /// A page of listings arrived from the server.
    PageLoaded {
        listings: Vec<Listing>,
        meta: PageMeta,
    },
    /// Prepend a provisional record (optimistic create).
    PrependProvisional(Listing),
    /// Replace the record with `id` in-place, preserving list position.
    Replace { id: DbId, with: Listing },
    /// Remove the record with `id` from the list.
    Remove(DbId),
    /// Append a record at the end (delete rollback; position is not
    /// restored exactly).
    Append(Listing),
    /// Select a record for the detail view.
    Select(Option<Listing>),
    /// Record a terminal mutation failure.
    Failed(String),
    /// Clear the recorded failure.
    ClearError,
}

/// The shared listings state.
#[derive(Debug, Default)]
pub struct Store {
    listings: Vec<Listing>,
    selected: Option<Listing>,
    filters: ListQuery,
    meta: Option<PageMeta>,
    loading: bool,
    error: Option<String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single update entry point.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetFilters(filters) => {
                self.filters = filters;
            }
            Action::ResetFilters => {
                self.filters = ListQuery::default();
            }
            Action::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::PageLoaded { listings, meta } => {
                self.listings = listings;
                self.meta = Some(meta);
                self.loading = false;
            }
            Action::PrependProvisional(listing) => {
                self.listings.insert(0, listing);
                self.loading = true;
                self.error = None;
            }
            Action::Replace { id, with } => {
                if let Some(slot) = self.listings.iter_mut().find(|l| l.id == id) {
                    *slot = with.clone();
                }
                if self.selected.as_ref().is_some_and(|s| s.id == id) {
                    self.selected = Some(with);
                }
                self.loading = false;
            }
            Action::Remove(id) => {
                self.listings.retain(|l| l.id != id);
                if self.selected.as_ref().is_some_and(|s| s.id == id) {
                    self.selected = None;
                }
                self.loading = false;
            }
            Action::Append(listing) => {
                self.listings.push(listing);
                self.loading = false;
            }
            Action::Select(listing) => {
                self.selected = listing;
            }
            Action::Failed(message) => {
                tracing::warn!(%message, "Listing mutation failed");
                self.error = Some(message);
                self.loading = false;
            }
            Action::ClearError => {
                self.error = None;
            }
        }
    }

    // --- Selectors ---

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn find(&self, id: DbId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn selected(&self) -> Option<&Listing> {
        self.selected.as_ref()
    }

    pub fn filters(&self) -> &ListQuery {
        &self.filters
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
