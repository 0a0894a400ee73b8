//! Domain tables for the Latin America and Caribbean scope.
//!
//! Country names and keywords are stored in normalized form (see
//! [`crate::normalize::normalize`]) because they are matched against
//! normalized text. Non-LATAM markers are matched against the lowercased raw
//! question, so accented spellings are listed explicitly.

use crate::normalize::normalize;
use latam_core::config::DomainOverrides;

/// Default recognized countries and territories.
///
/// "dominica" is contained in "republica dominicana" and "dominican
/// republic", so questions about the Dominican Republic also detect Dominica.
pub const DEFAULT_LATAM_COUNTRIES: &[&str] = &[
    "antigua y barbuda",
    "argentina",
    "bahamas",
    "barbados",
    "belice",
    "belize",
    "bolivia",
    "brasil",
    "brazil",
    "chile",
    "colombia",
    "costa rica",
    "cuba",
    "dominica",
    "dominican republic",
    "ecuador",
    "el salvador",
    "grenada",
    "guatemala",
    "guyana",
    "haiti",
    "honduras",
    "jamaica",
    "mexico",
    "nicaragua",
    "panama",
    "paraguay",
    "peru",
    "puerto rico",
    "republica dominicana",
    "saint kitts",
    "saint vincent",
    "san cristobal y nieves",
    "san vicente y las granadinas",
    "santa lucia",
    "surinam",
    "trinidad y tobago",
    "uruguay",
    "venezuela",
];

/// Terms that name the region as a whole.
pub const REGIONAL_MARKERS: &[&str] = &[
    "latam",
    "latinoamerica",
    "latin america",
    "caribe",
    "sudamerica",
    "south america",
];

/// Default markers for geographies and entities outside the region.
pub const DEFAULT_NON_LATAM_MARKERS: &[&str] = &[
    "estados unidos",
    "united states",
    "eeuu",
    "ee.uu",
    "europa",
    "europe",
    "union europea",
    "unión europea",
    "china",
    "japon",
    "japón",
    "japan",
    "rusia",
    "russia",
    "canada",
    "canadá",
    "espana",
    "españa",
    "spain",
    "francia",
    "france",
    "alemania",
    "germany",
    "reino unido",
    "united kingdom",
    "australia",
];

/// Default topic table: topic name and the question keywords that trigger it.
pub const DEFAULT_TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "economia",
        &[
            "inflacion",
            "pib",
            "crecimiento",
            "economia",
            "desempleo",
            "deuda",
            "tipo de cambio",
            "exportaciones",
        ],
    ),
    (
        "politica",
        &["eleccion", "gobierno", "presidente", "congreso", "politica"],
    ),
    ("salud", &["salud", "hospital", "vacuna", "pandemia", "mortalidad"]),
    ("educacion", &["educacion", "escuela", "universidad", "alfabetizacion"]),
    ("energia", &["energia", "petroleo", "litio", "electricidad", "renovable"]),
    ("seguridad", &["seguridad", "homicidio", "crimen", "violencia"]),
    ("migracion", &["migracion", "migrante", "refugiado"]),
    ("clima", &["clima", "sequia", "deforestacion", "emisiones"]),
];

/// A topic and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRule {
    pub topic: String,
    pub keywords: Vec<String>,
}

/// The externally configurable lookup data used by the scope detector and
/// the document scorer.
#[derive(Debug, Clone)]
pub struct DomainTables {
    /// Normalized country names
    pub countries: Vec<String>,
    pub non_latam_markers: Vec<String>,
    pub topics: Vec<TopicRule>,
}

impl Default for DomainTables {
    fn default() -> Self {
        Self {
            countries: DEFAULT_LATAM_COUNTRIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            non_latam_markers: DEFAULT_NON_LATAM_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            topics: DEFAULT_TOPIC_KEYWORDS
                .iter()
                .map(|(topic, keywords)| TopicRule {
                    topic: topic.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl DomainTables {
    /// Build tables from config overrides, falling back to the defaults.
    ///
    /// Override countries, keywords and topic names are normalized; markers
    /// are lowercased. Blank entries are dropped.
    pub fn from_overrides(overrides: &DomainOverrides) -> Self {
        let mut tables = Self::default();

        if let Some(countries) = &overrides.latam_countries {
            tables.countries = countries
                .iter()
                .map(|c| normalize(c))
                .filter(|c| !c.is_empty())
                .collect();
        }

        if let Some(markers) = &overrides.non_latam_markers {
            tables.non_latam_markers = markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect();
        }

        if let Some(topics) = &overrides.topic_keywords {
            tables.topics = topics
                .iter()
                .map(|(topic, keywords)| TopicRule {
                    topic: normalize(topic),
                    keywords: keywords
                        .iter()
                        .map(|k| normalize(k))
                        .filter(|k| !k.is_empty())
                        .collect(),
                })
                .filter(|rule| !rule.topic.is_empty())
                .collect();
        }

        tracing::debug!(
            "Domain tables: {} countries, {} non-LATAM markers, {} topics",
            tables.countries.len(),
            tables.non_latam_markers.len(),
            tables.topics.len()
        );

        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_builtin_names_are_normalized() {
        for country in DEFAULT_LATAM_COUNTRIES {
            assert_eq!(normalize(country), *country);
        }
        for (topic, keywords) in DEFAULT_TOPIC_KEYWORDS {
            assert_eq!(normalize(topic), *topic);
            for keyword in *keywords {
                assert_eq!(normalize(keyword), *keyword);
            }
        }
    }

    #[test]
    fn test_default_countries_cover_eastern_caribbean() {
        let tables = DomainTables::default();
        for country in [
            "dominica",
            "san cristobal y nieves",
            "san vicente y las granadinas",
            "santa lucia",
        ] {
            assert!(tables.countries.contains(&country.to_string()), "{}", country);
        }
    }

    #[test]
    fn test_default_tables() {
        let tables = DomainTables::default();
        assert!(tables.non_latam_markers.contains(&"china".to_string()));
        assert!(tables.topics.iter().any(|t| t.topic == "economia"));
    }

    #[test]
    fn test_overrides_replace_and_normalize() {
        let mut topics = BTreeMap::new();
        topics.insert(
            "Energía".to_string(),
            vec!["Petróleo".to_string(), "  ".to_string()],
        );
        let overrides = DomainOverrides {
            latam_countries: Some(vec!["  Guayana Francesa ".to_string(), " ".to_string()]),
            non_latam_markers: Some(vec!["  Asia Central ".to_string(), "".to_string()]),
            topic_keywords: Some(topics),
        };

        let tables = DomainTables::from_overrides(&overrides);
        assert_eq!(tables.countries, vec!["guayana francesa"]);
        assert_eq!(tables.non_latam_markers, vec!["asia central"]);
        assert_eq!(
            tables.topics,
            vec![TopicRule {
                topic: "energia".to_string(),
                keywords: vec!["petroleo".to_string()],
            }]
        );
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let tables = DomainTables::from_overrides(&DomainOverrides::default());
        assert_eq!(tables.countries.len(), DEFAULT_LATAM_COUNTRIES.len());
        assert_eq!(
            tables.non_latam_markers.len(),
            DEFAULT_NON_LATAM_MARKERS.len()
        );
        assert_eq!(tables.topics.len(), DEFAULT_TOPIC_KEYWORDS.len());
    }
}
