use crate::api::ListingDraft;
use crate::models::{Category, Role};
use std::str::FromStr;

pub const HELP: &str = "\
Browse:   home | list | category <all|house|flats|apartment|shared-house> | search [text]
          open <n> | back | save | about | contact | refresh
Account:  start | login <email> <password> | register <buyer|seller> <email> <password> <name>
          logout | profile <name>|<email>
Seller:   listings | delete <id>
          publish <type>|<title>|<location>|<price>|<beds>|<baths>|<sqft>[|<description>]
          edit <id> <type>|<title>|<location>|<price>|<beds>|<baths>|<sqft>[|<description>]
Other:    help | quit";

/// One line of terminal input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Category(Category),
    Search(String),
    /// 1-based index into the last rendered list
    Open(usize),
    Back,
    Save,
    Start,
    About,
    Contact,
    Login { email: String, password: String },
    Register { role: Role, email: String, password: String, name: String },
    Logout,
    Listings,
    Publish(ListingDraft),
    Edit { id: String, draft: ListingDraft },
    Delete(String),
    Profile { name: String, email: String },
    Refresh,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "list" | "home" => Command::List,
            "category" | "cat" => Command::Category(rest.parse()?),
            "search" => Command::Search(rest.to_string()),
            "open" => Command::Open(parse_index(rest)?),
            "back" => Command::Back,
            "save" => Command::Save,
            "start" => Command::Start,
            "about" => Command::About,
            "contact" => Command::Contact,
            "login" => {
                let mut words = rest.split_whitespace();
                match (words.next(), words.next(), words.next()) {
                    (Some(email), Some(password), None) => Command::Login {
                        email: email.to_string(),
                        password: password.to_string(),
                    },
                    _ => return Err("usage: login <email> <password>".to_string()),
                }
            }
            "register" => {
                let mut parts = rest.splitn(4, char::is_whitespace);
                match (parts.next(), parts.next(), parts.next(), parts.next()) {
                    (Some(role), Some(email), Some(password), Some(name)) if !name.trim().is_empty() => {
                        Command::Register {
                            role: role.parse()?,
                            email: email.to_string(),
                            password: password.to_string(),
                            name: name.trim().to_string(),
                        }
                    }
                    _ => {
                        return Err(
                            "usage: register <buyer|seller> <email> <password> <name>".to_string()
                        )
                    }
                }
            }
            "logout" => Command::Logout,
            "listings" => Command::Listings,
            "publish" => {
                let mut draft = parse_draft(rest)?;
                draft.image = Some(FALLBACK_IMAGE.to_string());
                Command::Publish(draft)
            }
            "edit" => match rest.split_once(char::is_whitespace) {
                Some((id, fields)) => Command::Edit {
                    id: id.to_string(),
                    draft: parse_draft(fields)?,
                },
                None => return Err("usage: edit <id> <fields>".to_string()),
            },
            "delete" if !rest.is_empty() => Command::Delete(rest.to_string()),
            "delete" => return Err("usage: delete <id>".to_string()),
            "profile" => match rest.split_once('|') {
                Some((name, email)) if !name.trim().is_empty() && !email.trim().is_empty() => {
                    Command::Profile {
                        name: name.trim().to_string(),
                        email: email.trim().to_string(),
                    }
                }
                _ => return Err("usage: profile <name>|<email>".to_string()),
            },
            "refresh" => Command::Refresh,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };

        Ok(command)
    }
}

fn parse_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("usage: open <n> (n starts at 1)".to_string()),
    }
}

/// Cover picture for listings published without one
const FALLBACK_IMAGE: &str = "/house-2.jfif";

/// `<type>|<title>|<location>|<price>|<beds>|<baths>|<sqft>[|<description>]`
fn parse_draft(raw: &str) -> Result<ListingDraft, String> {
    // splitn keeps any '|' inside the description
    let fields: Vec<&str> = raw.splitn(8, '|').map(str::trim).collect();
    let (kind, title, location, price, beds, baths, sqft, description) = match fields.as_slice() {
        [kind, title, location, price, beds, baths, sqft] => {
            (kind, title, location, price, beds, baths, sqft, None)
        }
        [kind, title, location, price, beds, baths, sqft, description] => {
            (kind, title, location, price, beds, baths, sqft, Some(description))
        }
        _ => {
            return Err(
                "expected <type>|<title>|<location>|<price>|<beds>|<baths>|<sqft>[|<description>]"
                    .to_string(),
            )
        }
    };

    let category: Category = kind.parse()?;
    if category == Category::All {
        return Err("a listing needs a concrete type".to_string());
    }
    if title.is_empty() {
        return Err("a listing needs a title".to_string());
    }

    Ok(ListingDraft {
        title: title.to_string(),
        property_type: category.label().to_string(),
        location: location.to_string(),
        price: price.to_string(),
        // blank or garbled counts become 0, like the web form
        beds: beds.parse().unwrap_or(0),
        baths: baths.parse().unwrap_or(0),
        sqft: sqft.to_string(),
        description: description
            .filter(|d| !d.is_empty())
            .map(|d| d.to_string()),
        ..Default::default()
    })
}
