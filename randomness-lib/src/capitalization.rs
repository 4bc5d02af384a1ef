use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How the letters of a generated value are capitalized.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum CapitalizationMode {
    /// Leave the value as it is.
    #[default]
    Retain,
    /// Uppercase the first letter and lowercase the rest.
    Sentence,
    Upper,
    Lower,
    /// Uppercase the first letter of every space separated word.
    FirstLetter,
    /// Flip a coin for every letter.
    Random,
}

impl CapitalizationMode {
    pub fn transform<R: Rng + ?Sized>(self, value: &str, rng: &mut R) -> String {
        match self {
            Self::Retain => value.to_string(),
            Self::Sentence => sentence_case(value),
            Self::Upper => value.to_uppercase(),
            Self::Lower => value.to_lowercase(),
            Self::FirstLetter => value
                .split(' ')
                .map(sentence_case)
                .collect::<Vec<_>>()
                .join(" "),
            Self::Random => value
                .chars()
                .map(|c| {
                    if rng.random_bool(0.5) {
                        c.to_uppercase().collect::<String>()
                    } else {
                        c.to_lowercase().collect::<String>()
                    }
                })
                .collect(),
        }
    }
}

fn sentence_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_transform() {
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(CapitalizationMode::Retain.transform("hAnD", &mut rng), "hAnD");
        assert_eq!(CapitalizationMode::Sentence.transform("hAnD sEt", &mut rng), "Hand set");
        assert_eq!(CapitalizationMode::Upper.transform("hand", &mut rng), "HAND");
        assert_eq!(CapitalizationMode::Lower.transform("HaND", &mut rng), "hand");
        assert_eq!(
            CapitalizationMode::FirstLetter.transform("hAnD sEt", &mut rng),
            "Hand Set"
        );
        assert_eq!(CapitalizationMode::Sentence.transform("", &mut rng), "");
    }

    #[test]
    fn test_random_keeps_letters() {
        let mut rng = StdRng::seed_from_u64(7);

        let result = CapitalizationMode::Random.transform("randomness", &mut rng);

        assert_eq!(result.to_lowercase(), "randomness");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            CapitalizationMode::from_str("first-letter").unwrap(),
            CapitalizationMode::FirstLetter
        );
        assert_eq!(
            CapitalizationMode::from_str("UPPER").unwrap(),
            CapitalizationMode::Upper
        );
        assert!(CapitalizationMode::from_str("shouting").is_err());
        assert_eq!(CapitalizationMode::Sentence.to_string(), "sentence");
    }
}
