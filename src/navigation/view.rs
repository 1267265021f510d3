use crate::models::Property;

/// The single screen currently on display
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Home,
    Auth,
    SellerDashboard,
    BuyerDashboard,
    About,
    Contact,
    PropertyDetail(Property),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Home => "home",
            ViewState::Auth => "auth",
            ViewState::SellerDashboard => "seller dashboard",
            ViewState::BuyerDashboard => "buyer dashboard",
            ViewState::About => "about",
            ViewState::Contact => "contact",
            ViewState::PropertyDetail(_) => "property detail",
        }
    }
}

/// User intents the router reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// Navbar "get started" / dashboard button
    GetStarted,
    /// The auth collaborator confirmed a login or registration
    AuthSucceeded,
    Back,
    SelectProperty(Property),
    /// Save button on the detail page
    Save,
    OpenAbout,
    OpenContact,
    /// Navbar home link; keeps the session
    Home,
    Logout,
}
