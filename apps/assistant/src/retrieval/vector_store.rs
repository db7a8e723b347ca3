//! Local on-disk vector collection.
//!
//! A collection is one JSON file, `{dir}/{name}.json`, holding an array of stored documents.
//! The handle is read-only: it loads the file once at startup and answers similarity
//! lookups from memory. A missing file is an empty collection.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt collection file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A retrieved document with its cosine similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    pub id: String,
    pub text: String,
    pub score: f32,
}

#[derive(Debug)]
pub struct VectorStore {
    collection: String,
    path: PathBuf,
    documents: Vec<StoredDocument>,
}

impl VectorStore {
    /// Opens (or lazily creates the directory for) a named collection under `dir`.
    pub fn open(dir: &Path, collection: &str) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{collection}.json"));
        let documents = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Vec<StoredDocument>>(&bytes).map_err(
                |source| StoreError::Corrupt {
                    path: path.clone(),
                    source,
                },
            )?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        info!(
            "Vector collection '{}' opened at {} ({} documents)",
            collection,
            path.display(),
            documents.len()
        );

        Ok(Self {
            collection: collection.to_string(),
            path,
            documents,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Top-`k` documents by cosine similarity, best first. Documents whose embedding
    /// dimension differs from the query are skipped.
    pub fn similarity_search(&self, query: &[f32], k: usize) -> Vec<ScoredDocument> {
        let mut scored: Vec<ScoredDocument> = self
            .documents
            .iter()
            .filter(|d| d.embedding.len() == query.len())
            .map(|d| ScoredDocument {
                id: d.id.clone(),
                text: d.text.clone(),
                score: cosine_similarity(query, &d.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        scored
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, embedding: Vec<f32>) -> StoredDocument {
        StoredDocument {
            id: id.to_string(),
            text: format!("text of {id}"),
            embedding,
        }
    }

    fn write_collection(dir: &Path, name: &str, docs: &[StoredDocument]) {
        let bytes = serde_json::to_vec(docs).unwrap();
        std::fs::write(dir.join(format!("{name}.json")), bytes).unwrap();
    }

    #[test]
    fn test_open_missing_collection_is_empty_and_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("chroma_db");
        let store = VectorStore::open(&dir, "ai_candidates").unwrap();
        assert!(store.is_empty());
        assert!(dir.is_dir());
        assert_eq!(store.collection(), "ai_candidates");
        assert!(store.similarity_search(&[1.0, 0.0], 4).is_empty());
    }

    #[test]
    fn test_open_corrupt_collection_fails() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("broken.json"), b"{not json").unwrap();
        let err = VectorStore::open(tmp.path(), "broken").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_similarity_search_orders_and_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        write_collection(
            tmp.path(),
            "c",
            &[
                doc("orthogonal", vec![0.0, 1.0]),
                doc("same", vec![2.0, 0.0]),
                doc("close", vec![1.0, 0.2]),
                doc("wrong-dims", vec![1.0, 0.0, 0.0]),
            ],
        );
        let store = VectorStore::open(tmp.path(), "c").unwrap();
        assert_eq!(store.len(), 4);

        let hits = store.similarity_search(&[1.0, 0.0], 2);
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["same", "close"]);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
