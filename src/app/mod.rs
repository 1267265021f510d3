pub mod command;
pub mod shell;

pub use command::Command;
pub use shell::Shell;

use crate::api::{
    ApiError, AuthError, AuthMode, AuthService, Credentials, ListingDraft, ProfileUpdate,
    PropertyRepository,
};
use crate::listing::{filter, ListingStore, SearchState};
use crate::models::{Category, Property, Role};
use crate::navigation::{NavEvent, Transition, ViewRouter, ViewState};
use crate::session::SessionStore;
use tracing::{info, warn};

/// Client state: router, search box, listing cache and session, wired to the API.
pub struct Marketplace<A> {
    api: A,
    router: ViewRouter,
    search: SearchState,
    store: ListingStore,
    session: SessionStore,
    last_auth_error: Option<String>,
}

impl<A> Marketplace<A>
where
    A: PropertyRepository + AuthService,
{
    pub fn new(api: A, session: SessionStore) -> Self {
        Self {
            api,
            router: ViewRouter::new(),
            search: SearchState::default(),
            store: ListingStore::new(),
            session,
            last_auth_error: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        self.router.current_view()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn last_auth_error(&self) -> Option<&str> {
        self.last_auth_error.as_deref()
    }

    /// Refetch the full collection. Returns false if a newer fetch won.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.store.begin_fetch();
        let result = self.api.fetch_all().await;
        self.store.complete(ticket, result)
    }

    pub fn visible_properties(&self) -> Vec<Property> {
        self.search.apply(self.store.properties())
    }

    /// Same-type listings for the property on display, if any
    pub fn similar_properties(&self) -> Vec<Property> {
        match self.router.selected_property() {
            Some(property) => filter::similar(self.store.properties(), property),
            None => Vec::new(),
        }
    }

    pub fn set_category(&mut self, category: Category) {
        self.search.category = category;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.query = query.into();
    }

    pub fn dispatch(&mut self, event: NavEvent) -> Transition {
        let transition = self.router.dispatch(event, self.session.current_user());
        if transition == Transition::SignedOut {
            info!("Signed out");
            self.session.logout();
        }
        transition
    }

    pub async fn authenticate(
        &mut self,
        mode: AuthMode,
        role: Role,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        match self.api.submit(mode, role, credentials).await {
            Ok(success) => {
                self.last_auth_error = None;
                self.session.login(success.user, success.token);
                self.dispatch(NavEvent::AuthSucceeded);
                Ok(())
            }
            Err(e) => {
                warn!("Authentication failed: {}", e);
                self.last_auth_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn my_listings(&self) -> Result<Vec<Property>, ApiError> {
        let token = self.require_token()?;
        self.api.my_listings(token).await
    }

    /// Create a listing, stamping the seller's name when the form left it blank.
    pub async fn publish_listing(&mut self, mut draft: ListingDraft) -> Result<(), ApiError> {
        let token = self.require_token()?;
        if draft.owner_name.is_none() {
            draft.owner_name = self.session.current_user().map(|u| u.name.clone());
        }
        self.api.create(token, &draft).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn update_listing(&mut self, id: &str, draft: ListingDraft) -> Result<(), ApiError> {
        let token = self.require_token()?;
        self.api.update(token, id, &draft).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn delete_listing(&mut self, id: &str) -> Result<(), ApiError> {
        let token = self.require_token()?;
        self.api.delete(token, id).await?;
        self.store.remove(id);
        Ok(())
    }

    pub async fn update_profile(&mut self, name: String, email: String) -> Result<(), ApiError> {
        let token = self.require_token()?;
        let update = ProfileUpdate {
            name,
            email,
            profile_pic: self
                .session
                .current_user()
                .and_then(|u| u.profile_pic.clone()),
        };
        let user = self.api.update_profile(token, &update).await?;
        self.session.replace_user(user);
        Ok(())
    }

    fn require_token(&self) -> Result<&str, ApiError> {
        self.session.token().ok_or(ApiError::Unauthenticated)
    }
}
