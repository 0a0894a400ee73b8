//! Ranking and top-k selection over the document collection.

use crate::domain::DomainTables;
use crate::score::QueryProfile;
use crate::types::{Document, ScoredDocument};

/// Default number of documents handed to the generator.
pub const DEFAULT_TOP_K: usize = 4;

/// Score every document and return the positive ones, best first.
///
/// The sort is stable: equal scores keep collection order.
pub fn rank<'a>(
    question: &str,
    documents: &'a [Document],
    tables: &DomainTables,
) -> Vec<ScoredDocument<'a>> {
    let profile = QueryProfile::new(question, tables);

    let mut scored: Vec<ScoredDocument<'a>> = documents
        .iter()
        .map(|document| ScoredDocument {
            document,
            score: profile.score(document),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.retain(|s| s.score > 0);
    scored
}

/// Select up to `top_k` supporting documents for a question.
///
/// Returns owned copies. An empty result means there is no evidence.
pub fn retrieve(
    question: &str,
    documents: &[Document],
    top_k: usize,
    tables: &DomainTables,
) -> Vec<Document> {
    let ranked = rank(question, documents, tables);

    tracing::debug!(
        "Ranked {} of {} documents (top_k: {})",
        ranked.len(),
        documents.len(),
        top_k
    );
    for hit in ranked.iter().take(top_k) {
        tracing::trace!(id = %hit.document.id, score = hit.score, "Selected document");
    }

    ranked
        .into_iter()
        .take(top_k)
        .map(|hit| hit.document.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_collection() {
        let tables = DomainTables::default();
        assert!(retrieve("inflación en Chile", &[], DEFAULT_TOP_K, &tables).is_empty());
    }

    #[test]
    fn test_all_zero_scores() {
        let tables = DomainTables::default();
        let docs = vec![doc("a", "Fútbol"), doc("b", "Cine")];
        assert!(retrieve("inflación en Chile", &docs, 4, &tables).is_empty());
    }

    #[test]
    fn test_orders_by_score() {
        let tables = DomainTables::default();
        let docs = vec![
            doc("low", "litio"),
            doc("high", "litio salares produccion"),
            doc("none", "otro"),
        ];
        let ids: Vec<String> = retrieve("produccion litio salares", &docs, 4, &tables)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["high", "low"]);
    }

    #[test]
    fn test_top_k_truncates() {
        let tables = DomainTables::default();
        let docs: Vec<Document> = (0..6).map(|i| doc(&i.to_string(), "remesas")).collect();
        assert_eq!(retrieve("remesas", &docs, 3, &tables).len(), 3);
        assert!(retrieve("remesas", &docs, 0, &tables).is_empty());
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let tables = DomainTables::default();
        let docs = vec![
            doc("first", "remesas"),
            doc("skip", "nada"),
            doc("second", "remesas"),
            doc("third", "remesas"),
        ];
        let ids: Vec<String> = retrieve("remesas", &docs, DEFAULT_TOP_K, &tables)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_returns_independent_copies() {
        let tables = DomainTables::default();
        let docs = vec![doc("a", "remesas")];
        let mut picked = retrieve("remesas", &docs, 1, &tables);
        picked[0].title = "changed".to_string();
        assert_eq!(docs[0].title, "remesas");
    }

    #[test]
    fn test_rank_exposes_scores() {
        let tables = DomainTables::default();
        let docs = vec![doc("a", "remesas familiares")];
        let ranked = rank("remesas familiares", &docs, &tables);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 4);
    }
}
