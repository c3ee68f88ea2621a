//! Category extraction from report filenames
//!
//! Reports carry their category in the filename (`irm_hepatique_01.txt`,
//! `cerveau_irm_02.txt`, ...). Rules are tried in order and the first match
//! wins. Order matters: the generic `<type>.<ext>` rule matches nearly any
//! single-token filename, so it must stay last or it shadows the others.

use regex::{Regex, RegexBuilder};
use std::path::Path;

use crate::errors::{RagError, Result};

/// Characters allowed in a category token
const TYPE_CLASS: &str = r"[A-Za-z0-9_\-]+?";

/// One ordered filename rule; capture group 1 is the category
#[derive(Debug, Clone)]
pub struct FilenameRule {
    pub name: &'static str,
    regex: Regex,
}

impl FilenameRule {
    fn compile(name: &'static str, pattern: String) -> Result<Self> {
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RagError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { name, regex })
    }

    fn capture(&self, basename: &str) -> Option<String> {
        self.regex
            .captures(basename)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase())
    }
}

/// Derives a lowercase category from a filename
#[derive(Debug, Clone)]
pub struct CategoryExtractor {
    rules: Vec<FilenameRule>,
}

impl CategoryExtractor {
    /// Build the rule list for a modality prefix (`irm`) and extension (`txt`)
    pub fn new(prefix: &str, extension: &str) -> Result<Self> {
        let prefix = regex::escape(prefix);
        let ext = regex::escape(extension.trim_start_matches('.'));

        // Most specific first; the bare `<type>.<ext>` fallback must be last.
        let rules = vec![
            FilenameRule::compile(
                "prefix_type_number",
                format!(r"^{prefix}_({TYPE_CLASS})_\d+\.{ext}$"),
            )?,
            FilenameRule::compile("prefix_type", format!(r"^{prefix}_({TYPE_CLASS})\.{ext}$"))?,
            FilenameRule::compile(
                "type_prefix_number",
                format!(r"^({TYPE_CLASS})_{prefix}_\d+\.{ext}$"),
            )?,
            FilenameRule::compile("type", format!(r"^({TYPE_CLASS})\.{ext}$"))?,
        ];

        Ok(Self { rules })
    }

    /// Extract the category of a file; only the basename is considered.
    ///
    /// Returns `None` when no rule matches.
    pub fn extract(&self, filename: &str) -> Option<String> {
        let basename = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename);

        self.rules
            .iter()
            .find_map(|rule| rule.capture(basename))
            .filter(|category| !category.is_empty())
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> CategoryExtractor {
        CategoryExtractor::new("irm", "txt").unwrap()
    }

    #[test]
    fn test_prefix_type_number() {
        assert_eq!(extractor().extract("irm_hepatique_01.txt").as_deref(), Some("hepatique"));
    }

    #[test]
    fn test_prefix_type() {
        assert_eq!(extractor().extract("irm_prostate.txt").as_deref(), Some("prostate"));
    }

    #[test]
    fn test_type_prefix_number() {
        assert_eq!(extractor().extract("cerveau_irm_02.txt").as_deref(), Some("cerveau"));
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(extractor().extract("genou.txt").as_deref(), Some("genou"));
        // Fallback keeps whatever precedes the extension
        assert_eq!(extractor().extract("compte_rendu_7.txt").as_deref(), Some("compte_rendu_7"));
    }

    #[test]
    fn test_multi_token_type_is_captured_whole() {
        assert_eq!(
            extractor().extract("irm_foie_gras_12.txt").as_deref(),
            Some("foie_gras")
        );
    }

    #[test]
    fn test_case_insensitive_and_lowercased() {
        assert_eq!(extractor().extract("IRM_Hepatique_03.TXT").as_deref(), Some("hepatique"));
    }

    #[test]
    fn test_basename_only() {
        assert_eq!(
            extractor().extract("/data/kb/irm_prostate_2.txt").as_deref(),
            Some("prostate")
        );
    }

    #[test]
    fn test_no_match() {
        let ex = extractor();
        assert_eq!(ex.extract("notes.md"), None);
        assert_eq!(ex.extract("compte rendu.txt"), None);
        assert_eq!(ex.extract("hépatique.txt"), None);
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            extractor().rule_names(),
            vec!["prefix_type_number", "prefix_type", "type_prefix_number", "type"]
        );
    }

    #[test]
    fn test_custom_prefix() {
        let ex = CategoryExtractor::new("scanner", "txt").unwrap();
        assert_eq!(ex.extract("scanner_thorax_01.txt").as_deref(), Some("thorax"));
        assert_eq!(ex.extract("irm_thorax_01.txt").as_deref(), Some("irm_thorax_01"));
    }
}
