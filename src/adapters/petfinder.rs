use crate::adapters::http::{build_client, ensure_success, join_url};
use crate::config::{HttpConfig, PetfinderConfig};
use crate::core::{Pet, PetSource, SearchRequest};
use crate::domain::model::parse_records;
use crate::utils::error::{PetError, Result};
use crate::utils::validation::{validate_required_field, validate_url};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;

const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;
const MAX_TOKEN_TTL_SECS: i64 = 86_400;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct AnimalsResponse {
    #[serde(default)]
    animals: serde_json::Value,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Expiry for a token that the server says lives `expires_in` seconds. The
/// value comes off the wire, so it is clamped to one day before use.
fn token_expiry(now: DateTime<Utc>, expires_in: Option<i64>) -> DateTime<Utc> {
    let ttl = expires_in
        .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
        .clamp(0, MAX_TOKEN_TTL_SECS)
        .saturating_sub(TOKEN_EXPIRY_MARGIN_SECS)
        .max(0);
    now + Duration::seconds(ttl)
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Petfinder v2 client: OAuth2 client-credentials token plus `/animals` search.
pub struct PetfinderClient {
    base_url: String,
    client_id: String,
    client_secret: String,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

impl PetfinderClient {
    /// Fails when the client id or secret is missing.
    pub fn new(config: &PetfinderConfig, http: &HttpConfig) -> Result<Self> {
        validate_url("petfinder.base_url", &config.base_url)?;
        let client_id = validate_required_field("petfinder.client_id", &config.client_id)?;
        let client_secret =
            validate_required_field("petfinder.client_secret", &config.client_secret)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            client: build_client(http)?,
            token: Mutex::new(None),
        })
    }

    /// A valid bearer token, requesting a new one when the cached one expired.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        tracing::debug!("Requesting Petfinder access token");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(join_url(&self.base_url, "oauth2/token"))
            .form(&form)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST
        ) {
            return Err(PetError::AuthError {
                message: format!("token request rejected with {}", response.status()),
            });
        }

        let body: TokenResponse = ensure_success(response, "oauth2/token")?.json().await?;
        let value = body.access_token.ok_or_else(|| PetError::AuthError {
            message: "token response carried no access_token".to_string(),
        })?;

        let expires_at = token_expiry(Utc::now(), body.expires_in);
        tracing::debug!("Petfinder token valid until {}", expires_at);

        Ok(CachedToken { value, expires_at })
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    async fn send_search(&self, request: &SearchRequest, token: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(join_url(&self.base_url, "animals"))
            .bearer_auth(token)
            .query(&[
                ("type", request.animal_type.to_string()),
                ("location", request.location.clone()),
                ("limit", request.limit.to_string()),
            ])
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl PetSource for PetfinderClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Pet>> {
        let token = self.access_token().await?;
        let mut response = self.send_search(request, &token).await?;

        // Tokens can be revoked before they expire; refresh once.
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!("Petfinder token rejected, requesting a new one");
            self.invalidate_token().await;
            let token = self.access_token().await?;
            response = self.send_search(request, &token).await?;
        }

        let body: AnimalsResponse = ensure_success(response, "animals")?.json().await?;
        match body.animals {
            serde_json::Value::Array(animals) => Ok(parse_records(animals)),
            serde_json::Value::Null => Ok(Vec::new()),
            other => {
                tracing::warn!("Unexpected animals payload: {}", other);
                Ok(Vec::new())
            }
        }
    }
}
