//! Section parsing for reference reports
//!
//! A report is plain text split by header lines such as `Indication:` or
//! `Conclusion: RAS`. The header vocabulary is closed, so sections are keyed
//! by the [`Section`] enum and iterate in canonical report order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Recognized report sections, declared in canonical rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    Title,
    Indication,
    Technique,
    Views,
    Findings,
    Conclusion,
}

impl Section {
    /// All sections in canonical order
    pub const ALL: [Section; 6] = [
        Section::Title,
        Section::Indication,
        Section::Technique,
        Section::Views,
        Section::Findings,
        Section::Conclusion,
    ];

    /// Header label as written in the corpus
    pub fn label(&self) -> &'static str {
        match self {
            Section::Title => "TITRE",
            Section::Indication => "Indication",
            Section::Technique => "Technique",
            Section::Views => "Incidences",
            Section::Findings => "Résultat",
            Section::Conclusion => "Conclusion",
        }
    }

    /// Match a header line (already trimmed) against the vocabulary.
    ///
    /// Returns the section and whatever follows the first colon.
    pub fn match_header(line: &str) -> Option<(Section, &str)> {
        Section::ALL.iter().find_map(|section| {
            line.strip_prefix(section.label())
                .and_then(|rest| rest.strip_prefix(':'))
                .map(|body| (*section, body))
        })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Section name to section text, never holding empty text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    sections: BTreeMap<Section, String>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a section; blank text is ignored.
    pub fn insert(&mut self, section: Section, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.sections.insert(section, trimmed.to_string());
    }

    pub fn get(&self, section: Section) -> Option<&str> {
        self.sections.get(&section).map(String::as_str)
    }

    pub fn contains(&self, section: Section) -> bool {
        self.sections.contains_key(&section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        self.sections.iter().map(|(s, text)| (*s, text.as_str()))
    }

    /// Single text blob used for vectorization: `"<label>: <text>"` per
    /// section, space separated.
    pub fn flatten(&self) -> String {
        self.iter()
            .map(|(section, text)| format!("{}: {}", section.label(), text))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Section being accumulated by the parser
struct OpenSection {
    section: Section,
    lines: Vec<String>,
}

impl OpenSection {
    fn commit(self, sections: &mut SectionMap) {
        if !self.lines.is_empty() {
            sections.insert(self.section, self.lines.join("\n"));
        }
    }
}

/// Parse a report into its sections.
///
/// Lines before the first header are dropped, blank lines are skipped and a
/// header without any following content produces no entry. A repeated header
/// replaces the earlier section.
pub fn parse_sections(content: &str) -> SectionMap {
    let mut sections = SectionMap::new();
    let mut current: Option<OpenSection> = None;

    for line in content.lines() {
        let stripped = line.trim();

        if let Some((section, body)) = Section::match_header(stripped) {
            if let Some(open) = current.take() {
                open.commit(&mut sections);
            }

            let mut lines = Vec::new();
            let body = body.trim();
            if !body.is_empty() {
                lines.push(body.to_string());
            }
            current = Some(OpenSection { section, lines });
            continue;
        }

        if stripped.is_empty() {
            continue;
        }

        if let Some(open) = current.as_mut() {
            open.lines.push(stripped.to_string());
        }
    }

    if let Some(open) = current {
        open.commit(&mut sections);
    }

    sections
}
