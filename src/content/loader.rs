//! Content loader - loads post documents from the source directory

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::query::{ContentSource, PostConnection, PostQuery};
use super::{ContentError, Document};
use crate::Slicepress;

/// Loads exported repository documents (one JSON file per document)
pub struct ContentLoader {
    posts_dir: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(site: &Slicepress) -> Self {
        Self {
            posts_dir: site.posts_dir(),
        }
    }

    /// Load all documents from source/_posts
    ///
    /// Files that fail to parse, and documents reusing an earlier uid, are
    /// skipped with a warning.
    pub fn load_documents(&self) -> Result<Vec<Document>, ContentError> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_json_file(p))
            .collect();
        paths.sort();

        let mut documents = Vec::new();
        let mut seen_uids = HashSet::new();

        for path in paths {
            let document = match load_document(&path) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("{}", e);
                    continue;
                }
            };

            if let Some(uid) = document.uid() {
                if !seen_uids.insert(uid.to_string()) {
                    let err = ContentError::DuplicateUid {
                        uid: uid.to_string(),
                        path,
                    };
                    tracing::warn!("{}, skipping", err);
                    continue;
                }
            }

            tracing::debug!("Loaded document {} from {:?}", document.meta.id, path);
            documents.push(document);
        }

        Ok(documents)
    }
}

impl ContentSource for ContentLoader {
    fn all_posts(&self, query: &PostQuery) -> Result<PostConnection, ContentError> {
        self.load_documents()?.as_slice().all_posts(query)
    }
}

/// Load a single document from a file
fn load_document(path: &Path) -> Result<Document, ContentError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Check if a file is a JSON document
fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
