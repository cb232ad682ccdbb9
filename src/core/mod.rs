pub mod adoption;
pub mod breed_filter;
pub mod matcher;
pub mod render;

pub use crate::domain::model::{
    ActivityLevel, AnimalType, BreedId, BreedImage, BreedRecord, DogSize, FilterCriteria,
    HomeSize, MatchOutcome, PersonalityTrait, Pet, PetBreeds, PetPhoto, SearchOutcome, SearchRequest,
    Species, Weight,
};
pub use crate::domain::ports::{BreedSource, ImageSource, PetSource};
pub use crate::utils::error::Result;
