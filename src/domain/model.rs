use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const PLACEHOLDER: &str = "Unknown";

/// Reads a field that upstream may send as `null` or with the wrong type;
/// anything that does not fit becomes the default.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode each record on its own so one broken entry does not sink the list.
/// Entries that are not objects at all are dropped.
pub fn parse_records<T: DeserializeOwned>(values: Vec<serde_json::Value>) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect();
    if records.len() < total {
        tracing::debug!("Kept {} of {} records", records.len(), total);
    }
    records
}

/// Breed identifier: numeric on TheDogAPI, a short slug on TheCatAPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BreedId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for BreedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreedId::Numeric(n) => write!(f, "{}", n),
            BreedId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    #[serde(default, deserialize_with = "lenient")]
    pub imperial: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub metric: Option<String>,
}

/// One breed as returned by a breed catalog. Any field may be missing, `null`
/// or of the wrong type upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreedRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<BreedId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub temperament: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub life_span: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub weight: Option<Weight>,
    #[serde(default, deserialize_with = "lenient", alias = "referenceImageId")]
    pub reference_image_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub breed_group: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bred_for: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub origin: Option<String>,
}

impl BreedRecord {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            PLACEHOLDER
        } else {
            &self.name
        }
    }

    /// Temperament text for keyword matching; empty when missing.
    pub fn temperament_text(&self) -> &str {
        self.temperament.as_deref().unwrap_or("")
    }

    /// Raw imperial weight range for substring matching; empty when missing.
    pub fn weight_text(&self) -> &str {
        self.weight
            .as_ref()
            .and_then(|w| w.imperial.as_deref())
            .unwrap_or("")
    }

    pub fn temperament_or_placeholder(&self) -> &str {
        non_blank(self.temperament.as_deref())
    }

    pub fn life_span_or_placeholder(&self) -> &str {
        non_blank(self.life_span.as_deref())
    }

    pub fn weight_or_placeholder(&self) -> &str {
        non_blank(self.weight.as_ref().and_then(|w| w.imperial.as_deref()))
    }

    pub fn breed_group_or_placeholder(&self) -> &str {
        non_blank(self.breed_group.as_deref())
    }

    pub fn bred_for_or_placeholder(&self) -> &str {
        non_blank(self.bred_for.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedImage {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::utils::error::PetError;

            fn from_str(s: &str) -> crate::utils::error::Result<Self> {
                let wanted = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str() == wanted)
                    .ok_or_else(|| crate::utils::error::PetError::InvalidConfigValueError {
                        field: stringify!($name).to_string(),
                        value: s.to_string(),
                        reason: format!(
                            "expected one of: {}",
                            $name::ALL
                                .iter()
                                .map(|c| c.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    })
            }
        }
    };
}

choice_enum!(
    ActivityLevel { Low => "low", Medium => "medium", High => "high" }
);

choice_enum!(
    /// Where the dog will live. Only shown back to the user; it does not
    /// narrow the breed list.
    HomeSize { Apartment => "apartment", House => "house", Farm => "farm" }
);

choice_enum!(
    DogSize { Small => "small", Medium => "medium", Large => "large" }
);

choice_enum!(
    PersonalityTrait {
        Loyal => "loyal",
        Playful => "playful",
        Gentle => "gentle",
        Intelligent => "intelligent",
        Protective => "protective",
        Independent => "independent",
        Friendly => "friendly",
        Calm => "calm",
    }
);

choice_enum!(
    Species { Dog => "dog", Cat => "cat" }
);

choice_enum!(
    AnimalType { Dog => "dog", Cat => "cat", Rabbit => "rabbit", Bird => "bird" }
);

impl ActivityLevel {
    pub fn keyword(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "calm",
            ActivityLevel::High => "energetic",
            ActivityLevel::Medium => "friendly",
        }
    }
}

impl DogSize {
    /// Literal looked for inside the imperial weight range. This matches
    /// numerals as text ("10" also hits "100 - 110"); it is a placeholder
    /// heuristic until the intended size bands are known.
    pub fn weight_substring(&self) -> Option<&'static str> {
        match self {
            DogSize::Small => Some("10"),
            DogSize::Large => Some("70"),
            DogSize::Medium => None,
        }
    }
}

impl PersonalityTrait {
    pub fn keyword(&self) -> &'static str {
        self.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub activity: ActivityLevel,
    pub home: HomeSize,
    pub size: DogSize,
    pub personality: PersonalityTrait,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched {
        breed: BreedRecord,
        image_url: Option<String>,
        /// True when no breed survived the filters and the pick came from
        /// the whole catalog.
        fallback: bool,
    },
    NoBreedsAvailable {
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetPhoto {
    #[serde(default, deserialize_with = "lenient")]
    pub small: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub large: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetBreeds {
    #[serde(default, deserialize_with = "lenient")]
    pub primary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub secondary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub mixed: bool,
}

/// An adoptable animal listed on Petfinder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub photos: Vec<PetPhoto>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub breeds: Option<PetBreeds>,
}

impl Pet {
    pub fn name_or_placeholder(&self) -> &str {
        non_blank(self.name.as_deref())
    }

    pub fn age_or_placeholder(&self) -> &str {
        non_blank(self.age.as_deref())
    }

    pub fn gender_or_placeholder(&self) -> &str {
        non_blank(self.gender.as_deref())
    }

    pub fn primary_breed(&self) -> &str {
        non_blank(self.breeds.as_ref().and_then(|b| b.primary.as_deref()))
    }

    /// Medium-sized URL of the first photo, if any.
    pub fn thumbnail(&self) -> Option<&str> {
        self.photos.first().and_then(|p| p.medium.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub animal_type: AnimalType,
    pub location: String,
    pub limit: usize,
}

impl SearchRequest {
    pub const DEFAULT_LOCATION: &'static str = "10001";
    pub const DEFAULT_LIMIT: usize = 6;
    pub const MAX_LIMIT: usize = 100;

    pub fn new(animal_type: AnimalType, location: impl Into<String>) -> Self {
        Self {
            animal_type,
            location: location.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl crate::utils::validation::Validate for SearchRequest {
    fn validate(&self) -> crate::utils::error::Result<()> {
        crate::utils::validation::validate_non_empty_string("location", &self.location)?;
        crate::utils::validation::validate_range("limit", self.limit, 1, Self::MAX_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found { pets: Vec<Pet> },
    NoneFound { message: String },
}
