pub mod filter;
pub mod store;

pub use filter::SearchState;
pub use store::ListingStore;
