use crate::adapters::http::{build_client, ensure_success, join_url};
use crate::config::{DogCeoConfig, HttpConfig};
use crate::core::{BreedRecord, ImageSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DogCeoResponse {
    message: String,
    status: String,
}

/// Random breed pictures from dog.ceo. Needs no credentials.
pub struct DogCeoClient {
    base_url: String,
    client: Client,
}

impl DogCeoClient {
    pub fn new(config: &DogCeoConfig, http: &HttpConfig) -> Result<Self> {
        validate_url("dog_ceo.base_url", &config.base_url)?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client: build_client(http)?,
        })
    }

    /// Dog CEO names breeds as lower-case words without separators
    /// ("German Shepherd" -> "germanshepherd").
    pub fn breed_slug(name: &str) -> String {
        name.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    pub async fn random_image(&self, breed_name: &str) -> Result<Option<String>> {
        let slug = Self::breed_slug(breed_name);
        if slug.is_empty() {
            return Ok(None);
        }

        let path = format!("breed/{}/images/random", slug);
        let response = self.client.get(join_url(&self.base_url, &path)).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("Dog CEO does not know breed '{}'", slug);
            return Ok(None);
        }

        let body: DogCeoResponse = ensure_success(response, &path)?.json().await?;
        if body.status == "success" {
            Ok(Some(body.message))
        } else {
            tracing::debug!("Dog CEO returned status '{}' for {}", body.status, slug);
            Ok(None)
        }
    }
}

#[async_trait]
impl ImageSource for DogCeoClient {
    async fn image_url(&self, breed: &BreedRecord) -> Result<Option<String>> {
        self.random_image(&breed.name).await
    }
}
