// Adapters layer: HTTP implementations of the breed, image and pet ports.

pub mod breed_api;
pub mod dog_ceo;
pub mod http;
pub mod petfinder;

pub use breed_api::BreedApiClient;
pub use dog_ceo::DogCeoClient;
pub use petfinder::PetfinderClient;
