//! The loaded knowledge base: documents plus the domain tables used to
//! search them.
//!
//! Built once at startup and shared read-only (typically behind an `Arc`).

use crate::context::{build_context, infer_cutoff};
use crate::domain::DomainTables;
use crate::loader::load_documents;
use crate::retrieve::{rank, retrieve};
use crate::scope::{assess_scope, ScopeAssessment};
use crate::sources::distinct_sources;
use crate::types::{DataSource, Document, ScoredDocument};
use latam_core::AppResult;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    path: Option<PathBuf>,
    documents: Vec<Document>,
    tables: DomainTables,
}

/// Evidence selected for one question, ready for the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub documents: Vec<Document>,
    pub context: String,
    pub cutoff: String,
}

impl KnowledgeBase {
    /// Load the collection at `path` (see [`load_documents`]).
    pub fn load(path: &Path, tables: DomainTables) -> AppResult<Self> {
        let documents = load_documents(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            documents,
            tables,
        })
    }

    pub fn from_documents(documents: Vec<Document>, tables: DomainTables) -> Self {
        Self {
            path: None,
            documents,
            tables,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn tables(&self) -> &DomainTables {
        &self.tables
    }

    pub fn assess_scope(&self, question: &str) -> ScopeAssessment {
        assess_scope(question, &self.tables)
    }

    pub fn rank(&self, question: &str) -> Vec<ScoredDocument<'_>> {
        rank(question, &self.documents, &self.tables)
    }

    pub fn retrieve(&self, question: &str, top_k: usize) -> Vec<Document> {
        retrieve(question, &self.documents, top_k, &self.tables)
    }

    /// Retrieve and render generation inputs. `None` when nothing scored.
    pub fn gather_evidence(&self, question: &str, top_k: usize) -> Option<Evidence> {
        let documents = self.retrieve(question, top_k);
        if documents.is_empty() {
            return None;
        }

        let context = build_context(&documents);
        let cutoff = infer_cutoff(&documents);
        Some(Evidence {
            documents,
            context,
            cutoff,
        })
    }

    pub fn sources(&self) -> Vec<DataSource> {
        distinct_sources(&self.documents)
    }
}
