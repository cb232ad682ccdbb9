use crate::core::{BreedRecord, FilterCriteria, MatchOutcome, Pet, SearchOutcome};
use crate::utils::error::Result;
use serde::Serialize;

pub const DESCRIPTION_LIMIT: usize = 300;
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_IMAGE: &str = "📷 No image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Cut `description` to `limit` characters, appending "..." when shortened.
/// Only a missing or empty description gets the placeholder; whitespace is
/// kept and counted.
pub fn truncate_description(description: Option<&str>, limit: usize) -> String {
    let text = match description {
        Some(d) if !d.is_empty() => d,
        _ => return NO_DESCRIPTION.to_string(),
    };

    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn breed_card(breed: &BreedRecord) -> String {
    format!(
        "### {}\n**Temperament:** {}\n**Life span:** {}\n**Weight:** {} lbs\n**Group:** {} | **Bred for:** {}",
        breed.display_name(),
        breed.temperament_or_placeholder(),
        breed.life_span_or_placeholder(),
        breed.weight_or_placeholder(),
        breed.breed_group_or_placeholder(),
        breed.bred_for_or_placeholder(),
    )
}

pub fn match_summary(outcome: &MatchOutcome, criteria: &FilterCriteria) -> String {
    match outcome {
        MatchOutcome::NoBreedsAvailable { reason } => format!("ℹ️ {}", reason),
        MatchOutcome::Matched {
            breed,
            image_url,
            fallback,
        } => {
            let mut lines = vec![
                format!(
                    "🐾 Your match for a {} activity, {}-sized dog with a {} streak ({} home):",
                    criteria.activity, criteria.size, criteria.personality, criteria.home
                ),
                String::new(),
                breed_card(breed),
            ];
            if *fallback {
                lines.push(
                    "No breed matched every preference, so here is a random pick instead."
                        .to_string(),
                );
            }
            lines.push(image_url.clone().unwrap_or_else(|| NO_IMAGE.to_string()));
            lines.join("\n")
        }
    }
}

pub fn pet_card(pet: &Pet) -> String {
    format!(
        "### {}\n**Age:** {} | **Gender:** {}\n{}\n{}",
        pet.name_or_placeholder(),
        pet.age_or_placeholder(),
        pet.gender_or_placeholder(),
        pet.thumbnail().unwrap_or(NO_IMAGE),
        truncate_description(pet.description.as_deref(), DESCRIPTION_LIMIT),
    )
}

pub fn breeds_text(breeds: &[BreedRecord]) -> String {
    breeds
        .iter()
        .map(breed_card)
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

pub fn search_text(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::NoneFound { message } => format!("⚠️ {}", message),
        SearchOutcome::Found { pets } => pets
            .iter()
            .map(pet_card)
            .collect::<Vec<_>>()
            .join("\n\n---\n\n"),
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Serialize)]
struct BreedRow<'a> {
    id: String,
    name: &'a str,
    temperament: &'a str,
    life_span: &'a str,
    weight_lbs: &'a str,
    breed_group: &'a str,
}

pub fn breeds_csv(breeds: &[BreedRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for breed in breeds {
        writer.serialize(BreedRow {
            id: breed.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: breed.display_name(),
            temperament: breed.temperament_or_placeholder(),
            life_span: breed.life_span_or_placeholder(),
            weight_lbs: breed.weight_or_placeholder(),
            breed_group: breed.breed_group_or_placeholder(),
        })?;
    }
    finish_csv(writer)
}

#[derive(Serialize)]
struct PetRow<'a> {
    id: String,
    name: &'a str,
    age: &'a str,
    gender: &'a str,
    breed: &'a str,
    photo: &'a str,
    url: &'a str,
}

pub fn pets_csv(pets: &[Pet]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for pet in pets {
        writer.serialize(PetRow {
            id: pet.id.map(|id| id.to_string()).unwrap_or_default(),
            name: pet.name_or_placeholder(),
            age: pet.age_or_placeholder(),
            gender: pet.gender_or_placeholder(),
            breed: pet.primary_breed(),
            photo: pet.thumbnail().unwrap_or(""),
            url: pet.url.as_deref().unwrap_or(""),
        })?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::utils::error::PetError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
