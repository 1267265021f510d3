use crate::models::{Role, User};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which auth endpoint a submission targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Only sent on registration
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login or registration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSuccess {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

/// Seller form payload for creating or editing a listing
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ListingDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub location: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub beds: u32,
    pub baths: u32,
    pub sqft: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "ownerName", skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(rename = "profilePic", skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message} ({status})")]
    Status { status: StatusCode, message: String },
    #[error("sign in first")]
    Unauthenticated,
}

/// Auth outcome shown to the user verbatim
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),
}
