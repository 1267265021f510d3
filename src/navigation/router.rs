use crate::models::{Property, Role, User};
use crate::navigation::view::{NavEvent, ViewState};
use tracing::debug;

/// Outcome of a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Moved,
    /// Moved home; the caller must clear the session
    SignedOut,
}

/// Single-state view machine gated by the session role.
///
/// The session user is passed in on every dispatch, so dashboard routing is
/// always derived from the current role and never from the view itself.
#[derive(Debug, Default)]
pub struct ViewRouter {
    view: ViewState,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_view(&self) -> &ViewState {
        &self.view
    }

    pub fn selected_property(&self) -> Option<&Property> {
        match &self.view {
            ViewState::PropertyDetail(property) => Some(property),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, event: NavEvent, session_user: Option<&User>) -> Transition {
        let (next, transition) = match (&self.view, event) {
            (_, NavEvent::GetStarted) => (Self::entry_point(session_user), Transition::Moved),

            (ViewState::Auth, NavEvent::AuthSucceeded) => match session_user {
                Some(user) => (Self::dashboard_for(user.role), Transition::Moved),
                None => return Transition::Unchanged,
            },

            (
                ViewState::Home | ViewState::SellerDashboard | ViewState::PropertyDetail(_),
                NavEvent::SelectProperty(property),
            ) => (ViewState::PropertyDetail(property), Transition::Moved),

            (ViewState::PropertyDetail(_), NavEvent::Save) => match session_user {
                None => (ViewState::Auth, Transition::Moved),
                Some(user) if user.role == Role::Buyer => {
                    (ViewState::BuyerDashboard, Transition::Moved)
                }
                Some(_) => return Transition::Unchanged,
            },

            (ViewState::Home, NavEvent::OpenAbout) => (ViewState::About, Transition::Moved),
            (ViewState::Home, NavEvent::OpenContact) => (ViewState::Contact, Transition::Moved),

            (
                ViewState::Auth | ViewState::About | ViewState::Contact | ViewState::PropertyDetail(_),
                NavEvent::Back,
            ) => (ViewState::Home, Transition::Moved),

            (ViewState::Home, NavEvent::Home) => return Transition::Unchanged,
            (_, NavEvent::Home) => (ViewState::Home, Transition::Moved),

            (ViewState::SellerDashboard | ViewState::BuyerDashboard, NavEvent::Logout) => {
                (ViewState::Home, Transition::SignedOut)
            }

            (view, event) => {
                debug!("Ignoring {:?} while on {}", event, view.name());
                return Transition::Unchanged;
            }
        };

        debug!("View {} -> {}", self.view.name(), next.name());
        self.view = next;
        transition
    }

    fn entry_point(session_user: Option<&User>) -> ViewState {
        match session_user {
            Some(user) => Self::dashboard_for(user.role),
            None => ViewState::Auth,
        }
    }

    fn dashboard_for(role: Role) -> ViewState {
        match role {
            Role::Seller => ViewState::SellerDashboard,
            Role::Buyer => ViewState::BuyerDashboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "u-1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role,
            profile_pic: None,
        }
    }

    fn property(id: &str) -> Property {
        Property {
            id: id.to_string(),
            title: format!("Listing {}", id),
            property_type: "House".to_string(),
            ..Default::default()
        }
    }

    /// Drives a fresh router through `events` with no session.
    fn router_at(events: Vec<NavEvent>) -> ViewRouter {
        let mut router = ViewRouter::new();
        for event in events {
            router.dispatch(event, None);
        }
        router
    }

    #[test]
    fn test_starts_home() {
        assert_eq!(ViewRouter::new().current_view(), &ViewState::Home);
    }

    #[test]
    fn test_get_started_without_session_goes_to_auth() {
        let mut router = ViewRouter::new();
        assert_eq!(router.dispatch(NavEvent::GetStarted, None), Transition::Moved);
        assert_eq!(router.current_view(), &ViewState::Auth);
    }

    #[test]
    fn test_get_started_routes_by_role() {
        let mut router = ViewRouter::new();
        router.dispatch(NavEvent::GetStarted, Some(&user(Role::Buyer)));
        assert_eq!(router.current_view(), &ViewState::BuyerDashboard);

        let mut router = ViewRouter::new();
        router.dispatch(NavEvent::GetStarted, Some(&user(Role::Seller)));
        assert_eq!(router.current_view(), &ViewState::SellerDashboard);
    }

    #[test]
    fn test_seller_get_started_from_any_view() {
        let seller = user(Role::Seller);
        let starts = vec![
            vec![],
            vec![NavEvent::GetStarted],
            vec![NavEvent::OpenAbout],
            vec![NavEvent::OpenContact],
            vec![NavEvent::SelectProperty(property("p1"))],
        ];

        for events in starts {
            let mut router = router_at(events);
            router.dispatch(NavEvent::GetStarted, Some(&seller));
            assert_eq!(router.current_view(), &ViewState::SellerDashboard);
        }

        let mut router = ViewRouter::new();
        router.dispatch(NavEvent::GetStarted, Some(&user(Role::Buyer)));
        router.dispatch(NavEvent::GetStarted, Some(&seller));
        assert_eq!(router.current_view(), &ViewState::SellerDashboard);
    }

    #[test]
    fn test_auth_success_routes_by_session_role() {
        let mut router = router_at(vec![NavEvent::GetStarted]);
        router.dispatch(NavEvent::AuthSucceeded, Some(&user(Role::Seller)));
        assert_eq!(router.current_view(), &ViewState::SellerDashboard);

        let mut router = router_at(vec![NavEvent::GetStarted]);
        router.dispatch(NavEvent::AuthSucceeded, Some(&user(Role::Buyer)));
        assert_eq!(router.current_view(), &ViewState::BuyerDashboard);
    }

    #[test]
    fn test_auth_success_without_session_is_ignored() {
        let mut router = router_at(vec![NavEvent::GetStarted]);
        assert_eq!(router.dispatch(NavEvent::AuthSucceeded, None), Transition::Unchanged);
        assert_eq!(router.current_view(), &ViewState::Auth);
    }

    #[test]
    fn test_auth_back_returns_home() {
        let mut router = router_at(vec![NavEvent::GetStarted]);
        assert_eq!(router.current_view(), &ViewState::Auth);
        assert_eq!(router.dispatch(NavEvent::Back, None), Transition::Moved);
        assert_eq!(router.current_view(), &ViewState::Home);
    }

    #[test]
    fn test_home_link_works_from_every_view() {
        let buyer = user(Role::Buyer);
        let seller = user(Role::Seller);
        let setups: Vec<(Vec<NavEvent>, Option<&User>)> = vec![
            (vec![NavEvent::GetStarted], None),
            (vec![NavEvent::GetStarted], Some(&buyer)),
            (vec![NavEvent::GetStarted], Some(&seller)),
            (vec![NavEvent::OpenAbout], None),
            (vec![NavEvent::OpenContact], None),
            (vec![NavEvent::SelectProperty(property("p1"))], None),
        ];

        for (events, session) in setups {
            let mut router = ViewRouter::new();
            for event in events {
                router.dispatch(event, session);
            }
            assert_ne!(router.current_view(), &ViewState::Home);

            assert_eq!(router.dispatch(NavEvent::Home, session), Transition::Moved);
            assert_eq!(router.current_view(), &ViewState::Home);
            assert!(router.selected_property().is_none());
        }

        let mut router = ViewRouter::new();
        assert_eq!(router.dispatch(NavEvent::Home, None), Transition::Unchanged);
    }

    #[test]
    fn test_select_then_back_clears_selection() {
        let mut router = ViewRouter::new();
        router.dispatch(NavEvent::SelectProperty(property("p1")), None);
        assert_eq!(router.selected_property().map(|p| p.id.as_str()), Some("p1"));

        router.dispatch(NavEvent::Back, None);
        assert_eq!(router.current_view(), &ViewState::Home);
        assert!(router.selected_property().is_none());
    }

    #[test]
    fn test_similar_property_replaces_selection() {
        let mut router = router_at(vec![NavEvent::SelectProperty(property("p1"))]);
        router.dispatch(NavEvent::SelectProperty(property("p2")), None);
        assert_eq!(router.current_view(), &ViewState::PropertyDetail(property("p2")));
    }

    #[test]
    fn test_save_without_session_goes_to_auth() {
        let mut router = router_at(vec![NavEvent::SelectProperty(property("p1"))]);
        router.dispatch(NavEvent::Save, None);
        assert_eq!(router.current_view(), &ViewState::Auth);
    }

    #[test]
    fn test_save_as_buyer_goes_to_dashboard() {
        let mut router = router_at(vec![NavEvent::SelectProperty(property("p1"))]);
        router.dispatch(NavEvent::Save, Some(&user(Role::Buyer)));
        assert_eq!(router.current_view(), &ViewState::BuyerDashboard);
    }

    #[test]
    fn test_save_as_seller_is_noop() {
        let mut router = router_at(vec![NavEvent::SelectProperty(property("p1"))]);
        let outcome = router.dispatch(NavEvent::Save, Some(&user(Role::Seller)));
        assert_eq!(outcome, Transition::Unchanged);
        assert_eq!(router.current_view(), &ViewState::PropertyDetail(property("p1")));
    }

    #[test]
    fn test_about_and_contact_round_trip_home() {
        let mut router = router_at(vec![NavEvent::OpenAbout]);
        assert_eq!(router.current_view(), &ViewState::About);
        router.dispatch(NavEvent::Back, None);
        assert_eq!(router.current_view(), &ViewState::Home);

        router.dispatch(NavEvent::OpenContact, None);
        assert_eq!(router.current_view(), &ViewState::Contact);
        router.dispatch(NavEvent::Back, None);
        assert_eq!(router.current_view(), &ViewState::Home);
    }

    #[test]
    fn test_logout_from_dashboard_signs_out() {
        let seller = user(Role::Seller);
        let mut router = ViewRouter::new();
        router.dispatch(NavEvent::GetStarted, Some(&seller));
        assert_eq!(router.dispatch(NavEvent::Logout, Some(&seller)), Transition::SignedOut);
        assert_eq!(router.current_view(), &ViewState::Home);
    }

    #[test]
    fn test_seller_can_view_own_listing() {
        let seller = user(Role::Seller);
        let mut router = ViewRouter::new();
        router.dispatch(NavEvent::GetStarted, Some(&seller));
        router.dispatch(NavEvent::SelectProperty(property("mine")), Some(&seller));
        assert_eq!(router.selected_property().map(|p| p.id.as_str()), Some("mine"));
    }

    #[test]
    fn test_unmatched_events_leave_view_unchanged() {
        let cases = vec![
            (vec![], NavEvent::Back),
            (vec![], NavEvent::Logout),
            (vec![], NavEvent::Save),
            (vec![], NavEvent::AuthSucceeded),
            (vec![NavEvent::OpenAbout], NavEvent::OpenContact),
            (vec![NavEvent::OpenContact], NavEvent::SelectProperty(property("p1"))),
            (vec![NavEvent::GetStarted], NavEvent::Logout),
            (vec![NavEvent::SelectProperty(property("p1"))], NavEvent::OpenAbout),
        ];

        for (setup, event) in cases {
            let mut router = router_at(setup);
            let before = router.current_view().clone();
            assert_eq!(router.dispatch(event, None), Transition::Unchanged);
            assert_eq!(router.current_view(), &before);
        }

        // back is not a way out of either dashboard
        for role in [Role::Buyer, Role::Seller] {
            let account = user(role);
            let mut router = ViewRouter::new();
            router.dispatch(NavEvent::GetStarted, Some(&account));
            let before = router.current_view().clone();
            assert_eq!(router.dispatch(NavEvent::Back, Some(&account)), Transition::Unchanged);
            assert_eq!(router.current_view(), &before);
        }
    }
}
