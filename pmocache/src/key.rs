//! Dérivation des clés de cache
//!
//! Une clé est l'empreinte SHA1 (40 caractères hexadécimaux) de la
//! concaténation canonique `"{year}|{title}"`. Une année absente est
//! représentée par la chaîne vide : `GET /w185/Alien` et une année vide
//! explicite désignent donc la même entrée.

use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// Séparateur entre les champs hachés
const FIELD_SEPARATOR: char = '|';

/// Champs de la requête qui participent à la clé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFields {
    /// `"{year}|{title}"`
    #[default]
    YearAndTitle,
    /// `"{title}"` seul : toutes les années partagent la même entrée
    Title,
}

impl FromStr for KeyFields {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year_title" | "title_year" => Ok(Self::YearAndTitle),
            "title" => Ok(Self::Title),
            other => Err(format!("Unknown cache key fields: {}", other)),
        }
    }
}

/// Identifiant d'une entrée de cache (hexadécimal, largeur fixe)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Longueur en caractères d'une clé (SHA1 en hexadécimal)
    pub const LEN: usize = 40;

    /// Dérive la clé d'un couple (title, year) avec les champs par défaut
    pub fn derive(title: &str, year: &str) -> Self {
        Self::derive_with(KeyFields::YearAndTitle, title, year)
    }

    pub fn derive_with(fields: KeyFields, title: &str, year: &str) -> Self {
        let canonical = match fields {
            KeyFields::YearAndTitle => format!("{}{}{}", year, FIELD_SEPARATOR, title),
            KeyFields::Title => title.to_string(),
        };
        Self(hex::encode(Sha1::digest(canonical.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_known_digest() {
        // sha1("1999|Fight Club")
        let expected = hex::encode(Sha1::digest(b"1999|Fight Club"));
        assert_eq!(CacheKey::derive("Fight Club", "1999").as_str(), expected);
    }

    #[test]
    fn test_fixed_width_lowercase_hex() {
        let key = CacheKey::derive("Alien", "");
        assert_eq!(key.as_str().len(), CacheKey::LEN);
        assert!(key
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_field_order_matters() {
        assert_ne!(
            CacheKey::derive("1999", "Fight Club"),
            CacheKey::derive("Fight Club", "1999")
        );
    }

    #[test]
    fn test_missing_year_is_empty_string() {
        let key = CacheKey::derive("Alien", "");
        assert_eq!(key.as_str(), hex::encode(Sha1::digest(b"|Alien")));
    }

    #[test]
    fn test_title_only_ignores_year() {
        assert_eq!(
            CacheKey::derive_with(KeyFields::Title, "Alien", "1979"),
            CacheKey::derive_with(KeyFields::Title, "Alien", "")
        );
    }

    #[test]
    fn test_key_fields_from_str() {
        assert_eq!("year_title".parse::<KeyFields>(), Ok(KeyFields::YearAndTitle));
        assert_eq!("TITLE".parse::<KeyFields>(), Ok(KeyFields::Title));
        assert!("year".parse::<KeyFields>().is_err());
    }

    proptest! {
        #[test]
        fn prop_derive_is_deterministic(title in ".{0,64}", year in "[0-9]{0,4}") {
            prop_assert_eq!(
                CacheKey::derive(&title, &year),
                CacheKey::derive(&title, &year)
            );
        }

        #[test]
        fn prop_distinct_inputs_give_distinct_keys(
            pairs in proptest::collection::hash_set(("[A-Za-z0-9 :']{1,40}", "(19|20)[0-9]{2}"), 1..64)
        ) {
            let mut seen: HashMap<CacheKey, (String, String)> = HashMap::new();
            for (title, year) in pairs {
                let key = CacheKey::derive(&title, &year);
                if let Some(previous) = seen.insert(key, (title.clone(), year.clone())) {
                    prop_assert!(false, "collision between {:?} and {:?}", previous, (title, year));
                }
            }
        }
    }
}
