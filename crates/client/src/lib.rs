//! Client-side library for the Rentora API.
//!
//! Three layers:
//!
//! - [`api`]: the HTTP surface as a trait, with a reqwest implementation.
//! - [`store`]: a single-writer state container updated only by dispatched
//!   actions, read through selectors.
//! - [`facade`]: optimistic mutation flows (apply locally, reconcile with
//!   the server response, roll back on failure).

pub mod api;
pub mod error;
pub mod facade;
pub mod model;
pub mod store;

pub use api::{HttpListingsApi, ListQuery, ListingsApi};
pub use error::ClientError;
pub use facade::ListingsFacade;
pub use model::Listing;
pub use store::{Action, Store};
