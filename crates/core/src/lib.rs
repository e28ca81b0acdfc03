//! Domain logic for the apartment listings platform.
//!
//! This crate has no I/O: it holds the shared types, payload validation,
//! the filter predicate builder, pagination math, and upload naming rules.
//! The `db` and `api` crates translate these into SQL and HTTP.

pub mod error;
pub mod filter;
pub mod listing;
pub mod page;
pub mod types;
pub mod upload;
