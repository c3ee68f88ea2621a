//! Knowledge base loader with a process-lifetime report cache
//!
//! Reports are parsed once per path and reused by every later call. The cache
//! sits behind a read-mostly lock: reads dominate, writes only happen for
//! paths seen for the first time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::Result;
use crate::report::{parse_sections, CategoryExtractor, ReportDocument};

/// Why a file did not make it into the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No filename rule matched
    NoCategory,
    /// The file has no recognized section with content
    NoSections,
    /// Read or UTF-8 decode failure
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCategory => f.write_str("filename matches no category rule"),
            SkipReason::NoSections => f.write_str("no recognized section with content"),
            SkipReason::Unreadable(reason) => write!(f, "unreadable: {}", reason),
        }
    }
}

/// A file excluded from the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// State of the knowledge base after a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorpusStatus {
    /// At least one report loaded
    Ready,
    /// Directory readable but nothing eligible in it
    Empty,
    /// Knowledge base directory does not exist
    DirectoryMissing(PathBuf),
    /// Directory exists but could not be listed
    DirectoryUnreadable(String),
}

/// Result of loading the knowledge base
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub documents: Vec<Arc<ReportDocument>>,
    pub skipped: Vec<SkippedFile>,
    pub status: CorpusStatus,
}

impl LoadReport {
    fn unavailable(status: CorpusStatus) -> Self {
        Self {
            documents: Vec::new(),
            skipped: Vec::new(),
            status,
        }
    }
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Loaded(Arc<ReportDocument>),
    Skipped(SkipReason),
}

/// Reference report corpus rooted at one directory
pub struct KnowledgeBase {
    root: PathBuf,
    extension: String,
    extractor: CategoryExtractor,
    cache: RwLock<HashMap<PathBuf, CacheEntry>>,
}

impl KnowledgeBase {
    /// Create a knowledge base over `root` for `*.<extension>` files
    pub fn new(root: impl Into<PathBuf>, extension: &str, modality_prefix: &str) -> Result<Self> {
        let extension = extension.trim_start_matches('.').to_string();
        let extractor = CategoryExtractor::new(modality_prefix, &extension)?;

        Ok(Self {
            root: root.into(),
            extension,
            extractor,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Create from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.knowledge_dir(),
            &config.knowledge.extension,
            &config.knowledge.modality_prefix,
        )
    }

    /// Knowledge base directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of cached paths, loaded or skipped
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Drop every cached entry; the next load re-reads the directory
    pub fn reset(&self) {
        self.cache.write().unwrap_or_else(|e| e.into_inner()).clear();
        debug!(root = %self.root.display(), "report cache cleared");
    }

    /// Load every eligible report, reading only paths not cached yet
    pub fn load(&self) -> LoadReport {
        if !self.root.is_dir() {
            warn!(root = %self.root.display(), "knowledge base directory does not exist");
            return LoadReport::unavailable(CorpusStatus::DirectoryMissing(self.root.clone()));
        }

        let paths = match self.list_candidates() {
            Ok(paths) => paths,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "failed to list knowledge base");
                return LoadReport::unavailable(CorpusStatus::DirectoryUnreadable(e.to_string()));
            }
        };

        let mut documents = Vec::new();
        let mut skipped = Vec::new();

        for path in paths {
            match self.cached_or_read(&path) {
                CacheEntry::Loaded(doc) => documents.push(doc),
                CacheEntry::Skipped(reason) => skipped.push(SkippedFile { path, reason }),
            }
        }

        let status = if documents.is_empty() {
            CorpusStatus::Empty
        } else {
            CorpusStatus::Ready
        };

        debug!(
            loaded = documents.len(),
            skipped = skipped.len(),
            "knowledge base loaded"
        );

        LoadReport {
            documents,
            skipped,
            status,
        }
    }

    /// Parse a single file without touching the cache
    pub fn read_report(&self, path: &Path) -> std::result::Result<ReportDocument, SkipReason> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let category = self
            .extractor
            .extract(&filename)
            .ok_or(SkipReason::NoCategory)?;

        let content =
            fs::read_to_string(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;

        let sections = parse_sections(&content);
        if sections.is_empty() {
            return Err(SkipReason::NoSections);
        }

        Ok(ReportDocument::new(path, category, sections))
    }

    /// Files directly under the root with the configured extension, sorted
    fn list_candidates(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "failed to read knowledge base entry");
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && self.has_extension(&path) {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }

    fn cached_or_read(&self, path: &Path) -> CacheEntry {
        if let Some(entry) = self
            .cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
        {
            return entry.clone();
        }

        let entry = match self.read_report(path) {
            Ok(doc) => CacheEntry::Loaded(Arc::new(doc)),
            Err(SkipReason::Unreadable(reason)) => {
                // Not cached: I/O failures get another chance on the next load
                warn!(path = %path.display(), error = %reason, "failed to read report");
                return CacheEntry::Skipped(SkipReason::Unreadable(reason));
            }
            Err(reason) => {
                debug!(path = %path.display(), %reason, "report skipped");
                CacheEntry::Skipped(reason)
            }
        };

        // Another caller may have populated the path meanwhile; keep the first entry.
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(path.to_path_buf())
            .or_insert(entry)
            .clone()
    }
}
