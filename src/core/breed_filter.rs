//! Keyword rule engine behind the breed match.
//!
//! Required rules (activity, size) are intersected; skippable rules
//! (personality) only refine the result when they leave at least one breed.
//! When nothing survives, the pick falls back to the whole catalog.

use crate::domain::model::{BreedRecord, FilterCriteria};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Temperament contains the keyword, case-insensitive.
    Activity(&'static str),
    /// Imperial weight text contains the literal, as raw text.
    Size(&'static str),
    /// Temperament contains the trait word, case-insensitive. Skipped when
    /// it would leave no candidates.
    Personality(&'static str),
}

impl Rule {
    pub fn matches(&self, breed: &BreedRecord) -> bool {
        match self {
            Rule::Activity(keyword) | Rule::Personality(keyword) => {
                contains_ignore_case(breed.temperament_text(), keyword)
            }
            Rule::Size(literal) => breed.weight_text().contains(literal),
        }
    }

    pub fn is_skippable(&self) -> bool {
        matches!(self, Rule::Personality(_))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// The rules implied by the user's choices, in the order they are described
/// to the user.
pub fn rules_for(criteria: &FilterCriteria) -> Vec<Rule> {
    let mut rules = vec![Rule::Activity(criteria.activity.keyword())];
    if let Some(literal) = criteria.size.weight_substring() {
        rules.push(Rule::Size(literal));
    }
    rules.push(Rule::Personality(criteria.personality.keyword()));
    rules
}

/// Narrow `breeds` by `rules`. The result does not depend on rule order.
pub fn narrow<'a>(breeds: &'a [BreedRecord], rules: &[Rule]) -> Vec<&'a BreedRecord> {
    let (required, skippable): (Vec<Rule>, Vec<Rule>) =
        rules.iter().partition(|rule| !rule.is_skippable());

    let mut candidates: Vec<&BreedRecord> = breeds
        .iter()
        .filter(|breed| required.iter().all(|rule| rule.matches(breed)))
        .collect();

    let refined: Vec<&BreedRecord> = candidates
        .iter()
        .copied()
        .filter(|breed| skippable.iter().all(|rule| rule.matches(breed)))
        .collect();

    if refined.is_empty() {
        tracing::debug!(
            "Personality filter left no breeds, keeping {} candidates",
            candidates.len()
        );
    } else {
        candidates = refined;
    }

    candidates
}

/// Candidate set for the given criteria.
pub fn candidates<'a>(breeds: &'a [BreedRecord], criteria: &FilterCriteria) -> Vec<&'a BreedRecord> {
    narrow(breeds, &rules_for(criteria))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub breed: &'a BreedRecord,
    pub fallback: bool,
}

/// Pick one breed for the criteria. Returns `None` only for an empty catalog.
pub fn select_match<'a, R: Rng + ?Sized>(
    breeds: &'a [BreedRecord],
    criteria: &FilterCriteria,
    rng: &mut R,
) -> Option<Selection<'a>> {
    let survivors = candidates(breeds, criteria);
    tracing::debug!("{} of {} breeds survived the filters", survivors.len(), breeds.len());

    match survivors.choose(rng).copied() {
        Some(breed) => Some(Selection {
            breed,
            fallback: false,
        }),
        None => breeds.choose(rng).map(|breed| Selection {
            breed,
            fallback: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ActivityLevel, DogSize, HomeSize, PersonalityTrait, Weight};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn breed(name: &str, temperament: &str, weight: &str) -> BreedRecord {
        BreedRecord {
            name: name.to_string(),
            temperament: Some(temperament.to_string()),
            weight: Some(Weight {
                imperial: Some(weight.to_string()),
                metric: None,
            }),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<BreedRecord> {
        vec![
            breed("Basset Hound", "Tenacious, Friendly, Calm, Affectionate", "40 - 65"),
            breed("Border Collie", "Energetic, Intelligent, Tenacious", "30 - 45"),
            breed("Chihuahua", "Devoted, Lively, Alert, Energetic", "3 - 6"),
            breed("Great Dane", "Friendly, Devoted, Reserved, Confident, Gentle", "110 - 190"),
            breed("Labrador Retriever", "Kind, Outgoing, Friendly, Gentle, Intelligent", "55 - 80"),
            breed("Newfoundland", "Sweet-Tempered, Calm, Gentle, Loyal", "100 - 150"),
            breed("Pug", "Docile, Clever, Charming, Playful", "14 - 18"),
        ]
    }

    fn criteria(
        activity: ActivityLevel,
        size: DogSize,
        personality: PersonalityTrait,
    ) -> FilterCriteria {
        FilterCriteria {
            activity,
            home: HomeSize::House,
            size,
            personality,
        }
    }

    fn names(records: &[&BreedRecord]) -> Vec<String> {
        let mut names: Vec<String> = records.iter().map(|b| b.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_activity_keyword_is_case_insensitive() {
        let breeds = catalog();
        let found = narrow(&breeds, &[Rule::Activity("energetic")]);
        assert_eq!(names(&found), vec!["Border Collie", "Chihuahua"]);
    }

    #[test]
    fn test_size_matches_raw_weight_substring() {
        let breeds = catalog();
        // "10" also hits "110 - 190" and "100 - 150"; the heuristic is text-only.
        let found = narrow(&breeds, &[Rule::Size("10")]);
        assert_eq!(names(&found), vec!["Great Dane", "Newfoundland"]);
    }

    #[test]
    fn test_personality_rule_is_skipped_when_it_empties_the_set() {
        let breeds = catalog();
        let c = criteria(ActivityLevel::Low, DogSize::Medium, PersonalityTrait::Protective);
        assert_eq!(names(&candidates(&breeds, &c)), vec!["Basset Hound", "Newfoundland"]);
    }

    #[test]
    fn test_personality_rule_refines_when_possible() {
        let breeds = catalog();
        let c = criteria(ActivityLevel::Low, DogSize::Medium, PersonalityTrait::Loyal);
        assert_eq!(names(&candidates(&breeds, &c)), vec!["Newfoundland"]);
    }

    #[test]
    fn test_candidate_set_is_independent_of_rule_order() {
        let breeds = catalog();
        let base = [
            Rule::Activity("friendly"),
            Rule::Size("10"),
            Rule::Personality("gentle"),
        ];
        let orders = [
            [base[0], base[1], base[2]],
            [base[0], base[2], base[1]],
            [base[1], base[0], base[2]],
            [base[1], base[2], base[0]],
            [base[2], base[0], base[1]],
            [base[2], base[1], base[0]],
        ];

        let expected = names(&narrow(&breeds, &base));
        assert_eq!(expected, vec!["Great Dane"]);
        for order in orders {
            assert_eq!(names(&narrow(&breeds, &order)), expected);
        }
    }

    #[test]
    fn test_select_match_always_returns_member_of_catalog() {
        let breeds = catalog();
        let mut rng = StdRng::seed_from_u64(7);

        for activity in ActivityLevel::ALL {
            for size in DogSize::ALL {
                for personality in PersonalityTrait::ALL {
                    let c = criteria(*activity, *size, *personality);
                    let selection = select_match(&breeds, &c, &mut rng).unwrap();
                    assert!(breeds.iter().any(|b| std::ptr::eq(b, selection.breed)));

                    let survivors = candidates(&breeds, &c);
                    if selection.fallback {
                        assert!(survivors.is_empty());
                    } else {
                        assert!(survivors.iter().any(|b| std::ptr::eq(*b, selection.breed)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_falls_back_to_full_catalog_when_nothing_matches() {
        let breeds = vec![
            breed("Pug", "Docile, Clever", "14 - 18"),
            breed("Beagle", "Amiable, Even Tempered", "20 - 30"),
        ];
        let c = criteria(ActivityLevel::High, DogSize::Large, PersonalityTrait::Loyal);
        assert!(candidates(&breeds, &c).is_empty());

        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let selection = select_match(&breeds, &c, &mut rng).unwrap();
            assert!(selection.fallback);
            seen.insert(selection.breed.name.clone());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_single_activity_match_wins_without_personality_hits() {
        let breeds = vec![
            breed("Akita", "Docile, Alert, Responsive", "70 - 130"),
            breed("Whippet", "Calm, Quiet, Affectionate", "25 - 40"),
            breed("Beagle", "Amiable, Even Tempered", "20 - 30"),
        ];
        let c = criteria(ActivityLevel::Low, DogSize::Medium, PersonalityTrait::Protective);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..16 {
            let selection = select_match(&breeds, &c, &mut rng).unwrap();
            assert_eq!(selection.breed.name, "Whippet");
            assert!(!selection.fallback);
        }
    }

    #[test]
    fn test_empty_catalog_yields_none() {
        let c = criteria(ActivityLevel::Medium, DogSize::Small, PersonalityTrait::Playful);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_match(&[], &c, &mut rng).is_none());
    }

    #[test]
    fn test_missing_fields_never_match() {
        let breeds = vec![BreedRecord {
            name: "Mystery".to_string(),
            ..Default::default()
        }];
        assert!(narrow(&breeds, &[Rule::Activity("calm")]).is_empty());
        assert!(narrow(&breeds, &[Rule::Size("10")]).is_empty());
    }

    #[test]
    fn test_medium_size_adds_no_size_rule() {
        let c = criteria(ActivityLevel::High, DogSize::Medium, PersonalityTrait::Playful);
        assert_eq!(
            rules_for(&c),
            vec![Rule::Activity("energetic"), Rule::Personality("playful")]
        );
    }
}
