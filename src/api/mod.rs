pub mod client;
pub mod traits;
pub mod types;

pub use client::HttpApiClient;
pub use traits::{AuthService, PropertyRepository};
pub use types::{
    ApiError, AuthError, AuthMode, Credentials, ListingDraft, ProfileUpdate,
};
