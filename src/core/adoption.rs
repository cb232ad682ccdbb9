use crate::core::{PetSource, SearchOutcome, SearchRequest};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub const NO_PETS_MESSAGE: &str = "No pets found. Try another location.";

/// Adoptable-animal search. Only an invalid request is an error; an
/// unreachable or empty upstream is reported as `SearchOutcome::NoneFound`.
pub struct AdoptionFinder<P: PetSource> {
    source: P,
}

impl<P: PetSource> AdoptionFinder<P> {
    pub fn new(source: P) -> Self {
        Self { source }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        request.validate()?;

        tracing::info!(
            "🔍 Searching {} adoptable {}s near {}",
            request.limit,
            request.animal_type,
            request.location
        );

        let outcome = match self.source.search(request).await {
            Ok(pets) if pets.is_empty() => {
                tracing::info!("Search returned no animals");
                SearchOutcome::NoneFound {
                    message: NO_PETS_MESSAGE.to_string(),
                }
            }
            Ok(pets) => {
                tracing::info!("✅ Found {} animals", pets.len());
                SearchOutcome::Found { pets }
            }
            Err(e) => {
                tracing::warn!("Pet search failed: {} ({:?})", e, e.category());
                SearchOutcome::NoneFound {
                    message: NO_PETS_MESSAGE.to_string(),
                }
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnimalType, Pet};
    use crate::utils::error::PetError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingSource {
        pets: Option<Vec<Pet>>,
        calls: Mutex<Vec<SearchRequest>>,
    }

    impl RecordingSource {
        fn new(pets: Option<Vec<Pet>>) -> Self {
            Self {
                pets,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PetSource for RecordingSource {
        async fn search(&self, request: &SearchRequest) -> Result<Vec<Pet>> {
            self.calls.lock().unwrap().push(request.clone());
            self.pets.clone().ok_or(PetError::AuthError {
                message: "invalid_client".to_string(),
            })
        }
    }

    fn pet(name: &str) -> Pet {
        Pet {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_found() {
        let finder = AdoptionFinder::new(RecordingSource::new(Some(vec![pet("Biscuit")])));
        let request = SearchRequest::new(AnimalType::Dog, "10001");

        let outcome = tokio_test::block_on(finder.search(&request)).unwrap();

        assert_eq!(
            outcome,
            SearchOutcome::Found {
                pets: vec![pet("Biscuit")]
            }
        );
        assert_eq!(finder.source.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_and_failed_searches_are_none_found() {
        let request = SearchRequest::new(AnimalType::Rabbit, "Seattle, WA");

        let empty = AdoptionFinder::new(RecordingSource::new(Some(vec![])));
        let failing = AdoptionFinder::new(RecordingSource::new(None));

        for finder in [empty, failing] {
            let outcome = tokio_test::block_on(finder.search(&request)).unwrap();
            assert_eq!(
                outcome,
                SearchOutcome::NoneFound {
                    message: NO_PETS_MESSAGE.to_string()
                }
            );
        }
    }

    #[test]
    fn test_invalid_request_never_reaches_source() {
        let finder = AdoptionFinder::new(RecordingSource::new(Some(vec![])));
        let request = SearchRequest::new(AnimalType::Bird, "10001").with_limit(500);

        let result = tokio_test::block_on(finder.search(&request));

        assert!(matches!(result, Err(PetError::InvalidConfigValueError { .. })));
        assert!(finder.source.calls.lock().unwrap().is_empty());
    }
}
