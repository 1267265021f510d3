use crate::api::types::{
    ApiError, AuthError, AuthMode, AuthSuccess, Credentials, ListingDraft, ProfileUpdate,
};
use crate::models::{Property, Role, User};
use async_trait::async_trait;

/// Listing endpoints of the marketplace API
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Every published listing
    async fn fetch_all(&self) -> Result<Vec<Property>, ApiError>;

    /// Listings owned by the bearer of `token`
    async fn my_listings(&self, token: &str) -> Result<Vec<Property>, ApiError>;

    async fn create(&self, token: &str, draft: &ListingDraft) -> Result<(), ApiError>;

    async fn update(&self, token: &str, id: &str, draft: &ListingDraft) -> Result<(), ApiError>;

    async fn delete(&self, token: &str, id: &str) -> Result<(), ApiError>;
}

/// Login, registration and profile endpoints
#[async_trait]
pub trait AuthService: Send + Sync {
    /// `role` is only used when registering
    async fn submit(
        &self,
        mode: AuthMode,
        role: Role,
        credentials: &Credentials,
    ) -> Result<AuthSuccess, AuthError>;

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError>;
}
