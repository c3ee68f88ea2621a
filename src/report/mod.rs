// Reference report model: typed sections plus filename-derived category
//
// Components:
// - Sections: closed header vocabulary and the section parser
// - Category: ordered filename rules

pub mod category;
pub mod sections;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use category::CategoryExtractor;
pub use sections::{parse_sections, Section, SectionMap};

/// A parsed reference report. Identity is the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub path: PathBuf,
    pub category: String,
    pub sections: SectionMap,
}

impl ReportDocument {
    pub fn new(path: impl Into<PathBuf>, category: impl Into<String>, sections: SectionMap) -> Self {
        Self {
            path: path.into(),
            category: category.into(),
            sections,
        }
    }

    /// File name shown in results
    pub fn basename(&self) -> String {
        basename(&self.path)
    }

    /// Section text joined for vectorization
    pub fn flattened_text(&self) -> String {
        self.sections.flatten()
    }
}

pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
