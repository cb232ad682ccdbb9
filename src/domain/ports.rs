use crate::domain::model::{BreedImage, BreedRecord, Pet, SearchRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only breed catalog.
#[async_trait]
pub trait BreedSource: Send + Sync {
    async fn fetch_breeds(&self) -> Result<Vec<BreedRecord>>;
    async fn images_for(&self, breed: &BreedRecord, limit: usize) -> Result<Vec<BreedImage>>;
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// A displayable URL for the breed, or `None` when the source has no picture.
    async fn image_url(&self, breed: &BreedRecord) -> Result<Option<String>>;
}

#[async_trait]
pub trait PetSource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Pet>>;
}
