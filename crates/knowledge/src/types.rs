//! Knowledge base type definitions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A document of the static knowledge base.
///
/// Fields missing from the source JSON default to empty values. Values of
/// the wrong JSON type are coerced once, at load time: scalars become
/// strings, a scalar `country` or `tags` becomes a one-element list and
/// `null` becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,

    /// Free-text category label
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: String,

    /// Countries the document talks about, in source order
    #[serde(default, deserialize_with = "lenient_list")]
    pub country: Vec<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub source_name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub source_url: String,

    /// Data as-of date, expected in ISO 8601
    #[serde(default, deserialize_with = "lenient_string")]
    pub as_of_date: String,
}

/// A document paired with its relevance score for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub score: u32,
}

/// An entry of the distinct data sources listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    /// Slug derived from the name
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(value_to_string).collect(),
        other => value_to_string(other).into_iter().collect(),
    })
}
