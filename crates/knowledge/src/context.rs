//! Generation inputs: the citation-labeled context block and the data cutoff.

use crate::types::Document;

/// Returned by [`infer_cutoff`] when no document carries a date.
pub const NO_CUTOFF: &str = "no-disponible";

const DEFAULT_TOPIC: &str = "general";
const DEFAULT_SOURCE: &str = "fuente";
const MISSING_DATE: &str = "sin fecha";

/// Render documents as one line each, labeled `[S1]`, `[S2]`, ... in input order.
///
/// The generator cites these labels, so they must match array positions.
pub fn build_context(documents: &[Document]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            format!(
                "[S{}] [{}] {} | Paises: {} | Fecha: {} | Fuente: {} | {}",
                i + 1,
                non_empty_or(doc.topic.trim(), DEFAULT_TOPIC),
                doc.title,
                doc.country.join(", "),
                non_empty_or(doc.as_of_date.trim(), MISSING_DATE),
                non_empty_or(doc.source_name.trim(), DEFAULT_SOURCE),
                doc.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// The latest `as_of_date` among the documents, compared as strings.
///
/// Correct only when all dates share one sortable format such as ISO 8601.
pub fn infer_cutoff(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| doc.as_of_date.trim())
        .filter(|date| !date.is_empty())
        .max()
        .map(str::to_string)
        .unwrap_or_else(|| NO_CUTOFF.to_string())
}
