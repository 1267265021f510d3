use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Account role chosen at registration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Buyer,
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Buyer => write!(f, "Buyer"),
            Role::Seller => write!(f, "Seller"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Authenticated session principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(rename = "profilePic", default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

/// One listing as served by the marketplace API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Property {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub location: String,
    #[serde(rename = "type", default, deserialize_with = "nullable_text")]
    pub property_type: String,
    #[serde(default, deserialize_with = "display_text")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub beds: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub baths: u32,
    #[serde(default, deserialize_with = "display_text")]
    pub sqft: String,
    #[serde(
        rename = "ownerId",
        alias = "owner",
        default,
        deserialize_with = "owner_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "ownerName", default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Category chip used to narrow the listing grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    House,
    Flats,
    Apartment,
    SharedHouse,
}

impl Category {
    /// Chip order on the home screen
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::House,
        Category::Flats,
        Category::Apartment,
        Category::SharedHouse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::House => "House",
            Category::Flats => "Flats",
            Category::Apartment => "Apartment",
            Category::SharedHouse => "Shared House",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        match normalized.as_str() {
            "all" => Ok(Category::All),
            "house" => Ok(Category::House),
            "flats" | "flat" => Ok(Category::Flats),
            "apartment" => Ok(Category::Apartment),
            "sharedhouse" => Ok(Category::SharedHouse),
            _ => Err(format!("unknown category '{}'", s.trim())),
        }
    }
}

/// Accepts a JSON string, number or null and yields display text.
fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Int(n)) => n.to_string(),
        Some(Raw::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Counts may arrive as numbers, numeric strings, null or junk; the last two read as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// The owner is either a bare id or a populated user document.
fn owner_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Object(doc) => doc
            .get("_id")
            .or_else(|| doc.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
