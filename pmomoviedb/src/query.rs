//! Analyse des chemins de requête
//!
//! ```text
//! /{size}/{title}[/{year}]   → affiche
//! /syn/{title}[/{year}]      → synopsis
//! ```
//!
//! Le type de requête n'est déterminé que par le premier segment : `syn`
//! désigne un synopsis, toute autre valeur est prise comme taille d'affiche.

use crate::error::PipelineError;
use percent_encoding::percent_decode_str;
use pmocache::is_valid_category;

/// Premier segment désignant un synopsis (et sa catégorie de cache)
pub const SYNOPSIS_MARKER: &str = "syn";

/// Premier segment réservé, toujours rejeté
pub const FAVICON: &str = "favicon.ico";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Artwork,
    Synopsis,
}

/// Requête typée, construite pour un seul appel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: QueryKind,
    /// Taille d'affiche (`w185`, `original`...) ou `syn`
    pub size_or_category: String,
    pub title: String,
    pub year: Option<String>,
}

impl Query {
    pub fn artwork(size: &str, title: &str, year: Option<&str>) -> Self {
        Self {
            kind: QueryKind::Artwork,
            size_or_category: size.to_string(),
            title: title.to_string(),
            year: year.map(String::from),
        }
    }

    pub fn synopsis(title: &str, year: Option<&str>) -> Self {
        Self {
            kind: QueryKind::Synopsis,
            size_or_category: SYNOPSIS_MARKER.to_string(),
            title: title.to_string(),
            year: year.map(String::from),
        }
    }

    /// Année telle qu'elle entre dans la clé : absente → chaîne vide
    pub fn year_or_empty(&self) -> &str {
        self.year.as_deref().unwrap_or("")
    }

    /// Année telle qu'elle est transmise à la recherche distante
    pub fn year_filter(&self) -> Option<&str> {
        self.year.as_deref().filter(|y| !y.is_empty())
    }
}

/// Découpe un chemin (éventuellement encodé) en [`Query`]
///
/// Le découpage est positionnel : `/w185//1999` donne un titre vide et
/// l'année `1999`. Les segments au-delà du troisième sont ignorés.
///
/// Le premier segment devient un répertoire du cache : il doit rester un
/// simple nom après décodage (voir [`pmocache::is_valid_category`]).
pub fn parse(path: &str) -> Result<Query, PipelineError> {
    let segments: Vec<String> = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect();

    if segments[0] == FAVICON {
        return Err(PipelineError::Reserved);
    }
    if segments.len() < 2 || !is_valid_category(&segments[0]) {
        return Err(PipelineError::BadQuery);
    }

    let head = segments[0].as_str();
    let title = segments[1].as_str();
    let year = segments.get(2).map(String::as_str);

    Ok(if head == SYNOPSIS_MARKER {
        Query::synopsis(title, year)
    } else {
        Query::artwork(head, title, year)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_with_year() {
        let q = parse("/w185/Fight Club/1999").unwrap();
        assert_eq!(q, Query::artwork("w185", "Fight Club", Some("1999")));
    }

    #[test]
    fn test_percent_encoded_title() {
        let q = parse("/w185/Fight%20Club/1999").unwrap();
        assert_eq!(q.title, "Fight Club");

        let q = parse("/syn/Am%C3%A9lie").unwrap();
        assert_eq!(q.title, "Amélie");
    }

    #[test]
    fn test_synopsis_without_year() {
        let q = parse("/syn/Alien").unwrap();
        assert_eq!(q.kind, QueryKind::Synopsis);
        assert_eq!(q.size_or_category, "syn");
        assert_eq!(q.year, None);
        assert_eq!(q.year_or_empty(), "");
        assert_eq!(q.year_filter(), None);
    }

    #[test]
    fn test_favicon_is_rejected() {
        assert!(matches!(parse("/favicon.ico"), Err(PipelineError::Reserved)));
        assert!(matches!(
            parse("/favicon.ico/anything"),
            Err(PipelineError::Reserved)
        ));
    }

    #[test]
    fn test_single_segment_is_bad_query() {
        assert!(matches!(parse("/x"), Err(PipelineError::BadQuery)));
        assert!(matches!(parse("/"), Err(PipelineError::BadQuery)));
        assert!(matches!(parse(""), Err(PipelineError::BadQuery)));
    }

    #[test]
    fn test_split_is_positional() {
        let q = parse("/w185//1999").unwrap();
        assert_eq!(q, Query::artwork("w185", "", Some("1999")));

        // Un `/` final donne une année vide, équivalente à une année absente
        let q = parse("/original/Heat/").unwrap();
        assert_eq!(q.year_or_empty(), "");
        assert_eq!(q.year_filter(), None);
    }

    #[test]
    fn test_size_must_be_a_plain_name() {
        for path in [
            "/..%2Fx/Heat",
            "/../Heat",
            "/..%2F..%2F..%2Fescaped/Heat",
            "/%2E%2E/Heat",
            "/a%5Cb/Heat",
            "//Heat",
        ] {
            assert!(matches!(parse(path), Err(PipelineError::BadQuery)), "{}", path);
        }
    }

    #[test]
    fn test_extra_segments_are_ignored() {
        let q = parse("/w92/Heat/1995/extra").unwrap();
        assert_eq!(q.year.as_deref(), Some("1995"));
    }
}
