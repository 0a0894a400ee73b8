//! Loading the static knowledge base from a JSON array file.

use crate::types::Document;
use latam_core::{AppError, AppResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load documents from `path`.
///
/// A missing file or a root that is not an array yields an empty collection.
/// Entries that are not JSON objects are skipped. A file that exists but
/// cannot be read or parsed is an error.
pub fn load_documents(path: &Path) -> AppResult<Vec<Document>> {
    if !path.exists() {
        tracing::warn!("Knowledge base not found at {:?}; starting empty", path);
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Knowledge(format!("Failed to read knowledge base {:?}: {}", path, e))
    })?;

    let documents = parse_documents(&content).map_err(|e| {
        AppError::Knowledge(format!("Failed to parse knowledge base {:?}: {}", path, e))
    })?;

    tracing::info!("Loaded {} documents from {:?}", documents.len(), path);
    Ok(documents)
}

/// Parse a JSON document array.
pub fn parse_documents(content: &str) -> AppResult<Vec<Document>> {
    let root: Value = serde_json::from_str(content)?;

    let Value::Array(items) = root else {
        tracing::warn!("Knowledge base root is not an array; ignoring it");
        return Ok(Vec::new());
    };

    let total = items.len();
    let documents: Vec<Document> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            if !item.is_object() {
                tracing::debug!("Skipping knowledge base entry {}: not an object", i);
                return None;
            }
            match serde_json::from_value::<Document>(item) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::warn!("Skipping knowledge base entry {}: {}", i, e);
                    None
                }
            }
        })
        .collect();

    if documents.len() < total {
        tracing::info!(
            "Discarded {} of {} knowledge base entries",
            total - documents.len(),
            total
        );
    }

    Ok(documents)
}
