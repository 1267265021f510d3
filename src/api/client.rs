use crate::api::traits::{AuthService, PropertyRepository};
use crate::api::types::{
    ApiError, AuthError, AuthMode, AuthSuccess, Credentials, ErrorBody, ListingDraft, LoginBody,
    ProfileUpdate, RegisterBody, UserEnvelope,
};
use crate::config::Config;
use crate::models::{Property, Role, User};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info, warn};

/// HTTP client for the marketplace REST API
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("kwathu-homes/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response)
            .await
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        warn!("API returned {}: {}", status, message);
        Err(ApiError::Status { status, message })
    }
}

/// Pulls `message` out of a JSON error body, if there is one.
async fn error_message(response: Response) -> Option<String> {
    response.json::<ErrorBody>().await.ok().and_then(|body| body.message)
}

#[async_trait]
impl PropertyRepository for HttpApiClient {
    async fn fetch_all(&self) -> Result<Vec<Property>, ApiError> {
        let url = self.url("/api/properties");
        debug!("Fetching URL: {}", url);

        let properties: Vec<Property> = self.send(self.client.get(&url)).await?.json().await?;
        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    async fn my_listings(&self, token: &str) -> Result<Vec<Property>, ApiError> {
        let request = self
            .client
            .get(self.url("/api/properties/my/listings"))
            .bearer_auth(token);

        Ok(self.send(request).await?.json().await?)
    }

    async fn create(&self, token: &str, draft: &ListingDraft) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("/api/properties"))
            .bearer_auth(token)
            .json(draft);

        self.send(request).await?;
        info!("Published listing '{}'", draft.title);
        Ok(())
    }

    async fn update(&self, token: &str, id: &str, draft: &ListingDraft) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/api/properties/{}", id)))
            .bearer_auth(token)
            .json(draft);

        self.send(request).await?;
        info!("Updated listing {}", id);
        Ok(())
    }

    async fn delete(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/properties/{}", id)))
            .bearer_auth(token);

        self.send(request).await?;
        info!("Deleted listing {}", id);
        Ok(())
    }
}

#[async_trait]
impl AuthService for HttpApiClient {
    async fn submit(
        &self,
        mode: AuthMode,
        role: Role,
        credentials: &Credentials,
    ) -> Result<AuthSuccess, AuthError> {
        let request = match mode {
            AuthMode::Login => self.client.post(self.url("/api/auth/login")).json(&LoginBody {
                email: &credentials.email,
                password: &credentials.password,
            }),
            AuthMode::Register => {
                self.client
                    .post(self.url("/api/auth/register"))
                    .json(&RegisterBody {
                        name: &credentials.name,
                        email: &credentials.email,
                        password: &credentials.password,
                        role,
                    })
            }
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| "Authentication failed".to_string());
            return Err(AuthError::Rejected(message));
        }

        let success: AuthSuccess = response.json().await?;
        info!("Signed in as {} ({})", success.user.email, success.user.role);
        Ok(success)
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        let request = self
            .client
            .put(self.url("/api/auth/profile"))
            .bearer_auth(token)
            .json(update);

        let envelope: UserEnvelope = self.send(request).await?.json().await?;
        Ok(envelope.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(api_url: &str) -> Config {
        Config {
            api_url: api_url.to_string(),
            request_timeout: Duration::from_secs(5),
            session_path: None,
            log_level: "warn".to_string(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = HttpApiClient::new(&config("http://localhost:5000/")).unwrap();
        assert_eq!(
            client.url("/api/properties"),
            "http://localhost:5000/api/properties"
        );
    }

    #[test]
    fn test_register_body_shape() {
        let body = RegisterBody {
            name: "Bwalya",
            email: "b@example.com",
            password: "secret",
            role: Role::Seller,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["role"], "Seller");
        assert_eq!(value["name"], "Bwalya");
    }

    #[test]
    fn test_listing_draft_uses_wire_names() {
        let draft = ListingDraft {
            title: "Lake House".to_string(),
            property_type: "House".to_string(),
            owner_name: Some("Mwila".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "House");
        assert_eq!(value["ownerName"], "Mwila");
        assert!(value.get("description").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let client = HttpApiClient::new(&config("http://127.0.0.1:9")).unwrap();
        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
