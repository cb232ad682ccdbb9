use crate::core::breed_filter::select_match;
use crate::core::{BreedRecord, BreedSource, FilterCriteria, ImageSource, MatchOutcome};

pub const NO_BREEDS_MESSAGE: &str = "No breeds available right now. Please try again later.";

/// Fetches the catalog, runs the breed filter and decorates the pick with an
/// image. Upstream failures turn into `MatchOutcome::NoBreedsAvailable`.
pub struct BreedMatcher<S: BreedSource, I: ImageSource> {
    source: S,
    images: I,
}

impl<S: BreedSource, I: ImageSource> BreedMatcher<S, I> {
    pub fn new(source: S, images: I) -> Self {
        Self { source, images }
    }

    pub async fn find_match(&self, criteria: &FilterCriteria) -> MatchOutcome {
        tracing::info!(
            "🐶 Matching breeds for activity={}, size={}, personality={}",
            criteria.activity,
            criteria.size,
            criteria.personality
        );

        let breeds = match self.load_catalog().await {
            Ok(breeds) => breeds,
            Err(reason) => return MatchOutcome::NoBreedsAvailable { reason },
        };

        // The RNG is not Send, so it must be gone before the next await.
        let picked = {
            let mut rng = rand::thread_rng();
            select_match(&breeds, criteria, &mut rng).map(|s| (s.breed.clone(), s.fallback))
        };

        let Some((breed, fallback)) = picked else {
            return MatchOutcome::NoBreedsAvailable {
                reason: NO_BREEDS_MESSAGE.to_string(),
            };
        };

        if fallback {
            tracing::info!("No breed matched every filter, picked {} at random", breed.name);
        } else {
            tracing::info!("✅ Matched {}", breed.name);
        }

        let image_url = self.lookup_image(&breed).await;

        MatchOutcome::Matched {
            breed,
            image_url,
            fallback,
        }
    }

    /// The catalog, truncated to `limit` when given. Failures become an
    /// informational message.
    pub async fn list_breeds(
        &self,
        limit: Option<usize>,
    ) -> std::result::Result<Vec<BreedRecord>, String> {
        let mut breeds = self.load_catalog().await?;
        if let Some(limit) = limit {
            breeds.truncate(limit);
        }
        Ok(breeds)
    }

    async fn load_catalog(&self) -> std::result::Result<Vec<BreedRecord>, String> {
        match self.source.fetch_breeds().await {
            Ok(breeds) if breeds.is_empty() => {
                tracing::warn!("Breed source returned an empty catalog");
                Err(NO_BREEDS_MESSAGE.to_string())
            }
            Ok(breeds) => {
                tracing::debug!("Fetched {} breeds", breeds.len());
                Ok(breeds)
            }
            Err(e) => {
                tracing::warn!("Breed source unavailable: {}", e);
                Err(NO_BREEDS_MESSAGE.to_string())
            }
        }
    }

    async fn lookup_image(&self, breed: &BreedRecord) -> Option<String> {
        match self.images.image_url(breed).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("No image for {}: {}", breed.name, e);
                None
            }
        }
    }
}
