// Result formatting: renders ranked reports as a reference text block
use crate::rag::reranking::RankedDocument;
use crate::rag::retrieval::RetrievalOutcome;
use crate::report::Section;

/// Renders retrieval outcomes for the calling pipeline
#[derive(Debug, Clone, Default)]
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render an outcome, keeping at most `top_k` reports
    pub fn format(&self, outcome: &RetrievalOutcome, top_k: usize) -> String {
        match outcome {
            RetrievalOutcome::Ranked { query, ranked, .. } => {
                self.format_ranked(query, ranked, top_k)
            }
            RetrievalOutcome::NoMatchingCategory {
                requested,
                available,
                ..
            } => self.format_no_match(requested, available),
        }
    }

    /// Header line followed by one block per report
    pub fn format_ranked(&self, query: &str, ranked: &[RankedDocument], top_k: usize) -> String {
        let top = &ranked[..top_k.min(ranked.len())];

        let mut output = vec![
            format!(
                "Retrieved {} similar reports for query: '{}'",
                top.len(),
                query
            ),
            String::new(),
        ];

        for (i, report) in top.iter().enumerate() {
            output.push(format!("--- Report {} ---", i + 1));
            output.push(self.format_document(report));
        }

        output.join("\n")
    }

    /// Message used when the category filter matched nothing
    pub fn format_no_match(&self, requested: &str, available: &[String]) -> String {
        format!(
            "No reports found for type: {}. Available types: {}",
            requested,
            available.join(", ")
        )
    }

    /// Basename, similarity, then present sections in canonical order
    pub fn format_document(&self, ranked: &RankedDocument) -> String {
        let doc = &ranked.document;
        let mut output = vec![
            format!("Report: {}", doc.basename()),
            format!("Similarity: {:.4}", ranked.similarity),
            String::new(),
        ];

        for section in Section::ALL {
            if let Some(text) = doc.sections.get(section) {
                output.push(format!("{}:", section.label()));
                output.push(text.to_string());
                output.push(String::new());
            }
        }

        output.join("\n")
    }
}
