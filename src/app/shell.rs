use crate::api::{AuthMode, AuthService, Credentials, PropertyRepository};
use crate::app::command::{Command, HELP};
use crate::app::Marketplace;
use crate::models::{Category, Property, Role};
use crate::navigation::{NavEvent, Transition, ViewState};
use std::fmt::Write;
use std::ops::ControlFlow;

/// Text front end: turns commands into marketplace calls and renders the view.
pub struct Shell<A> {
    app: Marketplace<A>,
    /// Last list printed, so `open <n>` can refer to it
    shown: Vec<Property>,
}

impl<A> Shell<A>
where
    A: PropertyRepository + AuthService,
{
    pub fn new(app: Marketplace<A>) -> Self {
        Self {
            app,
            shown: Vec::new(),
        }
    }

    pub fn app(&self) -> &Marketplace<A> {
        &self.app
    }

    /// Run one command. Returns the text to print, or `Break` on quit.
    pub async fn handle(&mut self, command: Command) -> ControlFlow<(), String> {
        let mut out = String::new();

        match command {
            Command::Quit => return ControlFlow::Break(()),
            Command::Help => {
                out.push_str(HELP);
                out.push('\n');
                return ControlFlow::Continue(out);
            }
            Command::List => {
                self.app.dispatch(NavEvent::Home);
            }
            Command::Category(category) => self.app.set_category(category),
            Command::Search(query) => self.app.set_query(query),
            Command::Open(n) => match n.checked_sub(1).and_then(|i| self.shown.get(i)).cloned() {
                Some(property) => {
                    self.app.dispatch(NavEvent::SelectProperty(property));
                }
                None => {
                    let _ = writeln!(out, "No listing #{} on screen", n);
                }
            },
            Command::Back => {
                self.app.dispatch(NavEvent::Back);
            }
            Command::Save => {
                self.app.dispatch(NavEvent::Save);
            }
            Command::Start => {
                self.app.dispatch(NavEvent::GetStarted);
            }
            Command::About => {
                self.app.dispatch(NavEvent::OpenAbout);
            }
            Command::Contact => {
                self.app.dispatch(NavEvent::OpenContact);
            }
            Command::Logout => {
                // logout lives on the dashboards; a restored session may start elsewhere
                if self.app.session().current_user().is_some() {
                    self.app.dispatch(NavEvent::GetStarted);
                }
                if self.app.dispatch(NavEvent::Logout) != Transition::SignedOut {
                    let _ = writeln!(out, "Not signed in");
                }
            }
            Command::Login { email, password } => {
                let credentials = Credentials {
                    name: String::new(),
                    email,
                    password,
                };
                self.sign_in(AuthMode::Login, Role::Buyer, credentials, &mut out)
                    .await;
            }
            Command::Register {
                role,
                email,
                password,
                name,
            } => {
                let credentials = Credentials {
                    name,
                    email,
                    password,
                };
                self.sign_in(AuthMode::Register, role, credentials, &mut out)
                    .await;
            }
            Command::Refresh => {
                self.app.refresh().await;
            }
            Command::Listings => match self.app.my_listings().await {
                Ok(listings) => {
                    self.app.dispatch(NavEvent::GetStarted);
                    let _ = writeln!(out, "Your listings ({}):", listings.len());
                    for (i, property) in listings.iter().enumerate() {
                        let _ = writeln!(out, "{}. [{}] {}", i + 1, property.id, summary(property));
                    }
                    self.shown = listings;
                    return ControlFlow::Continue(out);
                }
                Err(e) => {
                    let _ = writeln!(out, "Could not load your listings: {}", e);
                }
            },
            Command::Publish(draft) => {
                let title = draft.title.clone();
                match self.app.publish_listing(draft).await {
                    Ok(()) => {
                        let _ = writeln!(out, "Published '{}'", title);
                    }
                    Err(e) => {
                        let _ = writeln!(out, "Could not publish: {}", e);
                    }
                }
            }
            Command::Edit { id, draft } => match self.app.update_listing(&id, draft).await {
                Ok(()) => {
                    let _ = writeln!(out, "Updated {}", id);
                }
                Err(e) => {
                    let _ = writeln!(out, "Could not update {}: {}", id, e);
                }
            },
            Command::Delete(id) => match self.app.delete_listing(&id).await {
                Ok(()) => {
                    let _ = writeln!(out, "Deleted {}", id);
                }
                Err(e) => {
                    let _ = writeln!(out, "Could not delete {}: {}", id, e);
                }
            },
            Command::Profile { name, email } => match self.app.update_profile(name, email).await {
                Ok(()) => {
                    let _ = writeln!(out, "Profile details updated");
                }
                Err(e) => {
                    let _ = writeln!(out, "Could not update profile: {}", e);
                }
            },
        }

        out.push_str(&self.render());
        ControlFlow::Continue(out)
    }

    async fn sign_in(&mut self, mode: AuthMode, role: Role, credentials: Credentials, out: &mut String) {
        if self.app.view() != &ViewState::Auth {
            self.app.dispatch(NavEvent::GetStarted);
        }
        if self.app.view() != &ViewState::Auth {
            let _ = writeln!(out, "Already signed in; log out first");
            return;
        }

        if let Err(e) = self.app.authenticate(mode, role, &credentials).await {
            let _ = writeln!(out, "Sign-in failed: {}", e);
        }
    }

    /// Draw the current view and remember which listings were numbered.
    pub fn render(&mut self) -> String {
        let mut out = String::new();

        match self.app.view() {
            ViewState::Home => {
                let search = self.app.search();
                let chips: Vec<String> = Category::ALL
                    .iter()
                    .map(|c| {
                        if *c == search.category {
                            format!("[{}]", c)
                        } else {
                            c.to_string()
                        }
                    })
                    .collect();
                let _ = writeln!(out, "{}", chips.join("  "));
                if !search.query.is_empty() {
                    let _ = writeln!(out, "Search: \"{}\"", search.query);
                }

                if self.app.store().is_loading() {
                    let _ = writeln!(out, "Loading listings...");
                }

                let visible = self.app.visible_properties();
                if visible.is_empty() {
                    let _ = writeln!(out, "No properties match.");
                }
                for (i, property) in visible.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", i + 1, summary(property));
                }
                self.shown = visible;
            }
            ViewState::PropertyDetail(property) => {
                let _ = writeln!(out, "{} ({})", property.title, property.property_type);
                let _ = writeln!(out, "{}", property.location);
                let _ = writeln!(
                    out,
                    "{} | {} beds | {} baths | {} sqft",
                    property.price, property.beds, property.baths, property.sqft
                );
                let description = property
                    .description
                    .as_deref()
                    .unwrap_or("A wonderful property in a prime location.");
                let _ = writeln!(out, "{}", description);
                if let Some(owner) = &property.owner_name {
                    let _ = writeln!(out, "Listed by {}", owner);
                }

                let similar = self.app.similar_properties();
                if !similar.is_empty() {
                    let _ = writeln!(out, "Similar properties:");
                    for (i, p) in similar.iter().enumerate() {
                        let _ = writeln!(out, "{}. {}", i + 1, summary(p));
                    }
                }
                self.shown = similar;
            }
            ViewState::Auth => {
                let _ = writeln!(out, "Sign in: login <email> <password>");
                let _ = writeln!(out, "New here: register <buyer|seller> <email> <password> <name>");
                if let Some(error) = self.app.last_auth_error() {
                    let _ = writeln!(out, "Error: {}", error);
                }
            }
            ViewState::SellerDashboard | ViewState::BuyerDashboard => {
                if let Some(user) = self.app.session().current_user() {
                    let _ = writeln!(out, "{} Dashboard: welcome, {}", user.role, user.name);
                }
                if self.app.view() == &ViewState::SellerDashboard {
                    let _ = writeln!(out, "listings | publish ... | edit ... | delete <id> | profile ...");
                } else {
                    let _ = writeln!(out, "Saved homes will appear here.");
                }
            }
            ViewState::About => {
                let _ = writeln!(out, "Kwathu Homes connects buyers with trusted sellers.");
            }
            ViewState::Contact => {
                let _ = writeln!(out, "Reach an agent at +260 97 000 0000.");
            }
        }

        out
    }
}

fn summary(property: &Property) -> String {
    format!(
        "{} - {} ({}, {})",
        property.title, property.location, property.property_type, property.price
    )
}
