pub mod listing_repo;

pub use listing_repo::ListingRepo;
