use crate::adapters::http::{build_client, ensure_success, join_url};
use crate::config::{BreedApiConfig, HttpConfig};
use crate::core::{BreedImage, BreedRecord, BreedSource, ImageSource, Species};
use crate::domain::model::parse_records;
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;

/// Client for TheDogAPI / TheCatAPI (`/breeds`, `/images/...`).
pub struct BreedApiClient {
    species: Species,
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl BreedApiClient {
    pub fn new(species: Species, config: &BreedApiConfig, http: &HttpConfig) -> Result<Self> {
        validate_url("breed_api.base_url", &config.base_url)?;
        if config.api_key.is_none() {
            tracing::warn!(
                "No API key configured for the {} breed API, requests are rate limited",
                species
            );
        }

        Ok(Self {
            species,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            client: build_client(http)?,
        })
    }

    pub fn species(&self) -> Species {
        self.species
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(join_url(&self.base_url, path));
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }

    pub async fn image_by_reference(&self, reference_image_id: &str) -> Result<BreedImage> {
        let path = format!("images/{}", reference_image_id);
        tracing::debug!("Looking up reference image {}", reference_image_id);
        let response = ensure_success(self.get(&path).send().await?, &path)?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl BreedSource for BreedApiClient {
    async fn fetch_breeds(&self) -> Result<Vec<BreedRecord>> {
        tracing::debug!("Fetching {} breeds from {}", self.species, self.base_url);
        let response = ensure_success(self.get("breeds").send().await?, "breeds")?;
        let values: Vec<serde_json::Value> = response.json().await?;
        Ok(parse_records(values))
    }

    async fn images_for(&self, breed: &BreedRecord, limit: usize) -> Result<Vec<BreedImage>> {
        let Some(id) = &breed.id else {
            return Ok(Vec::new());
        };

        let response = self
            .get("images/search")
            .query(&[("breed_ids", id.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        let response = ensure_success(response, "images/search")?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ImageSource for BreedApiClient {
    async fn image_url(&self, breed: &BreedRecord) -> Result<Option<String>> {
        if let Some(reference) = breed.reference_image_id.as_deref() {
            match self.image_by_reference(reference).await {
                Ok(image) => return Ok(Some(image.url)),
                Err(e) => tracing::debug!("Reference image {} unavailable: {}", reference, e),
            }
        }

        let images = self.images_for(breed, 1).await?;
        Ok(images.into_iter().next().map(|image| image.url))
    }
}
