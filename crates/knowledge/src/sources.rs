//! Distinct data sources listing.

use crate::types::{DataSource, Document};
use std::collections::HashSet;

/// One entry per distinct source name, first occurrence wins.
///
/// Names are trimmed and blank names skipped. The id is the lowercased name
/// with spaces replaced by hyphens.
pub fn distinct_sources(documents: &[Document]) -> Vec<DataSource> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut sources = Vec::new();

    for doc in documents {
        let name = doc.source_name.trim();
        if name.is_empty() || !seen.insert(name) {
            continue;
        }

        sources.push(DataSource {
            id: source_slug(name),
            name: name.to_string(),
            url: doc.source_url.trim().to_string(),
        });
    }

    sources
}

fn source_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
