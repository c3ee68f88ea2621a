//! Integration tests for reportrag retrieval
//!
//! Builds small knowledge bases on disk and runs the full
//! load -> filter -> rank -> format flow.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use reportrag::{
    corpus::{CorpusStatus, KnowledgeBase},
    rag::{RankingStatus, ReportRetriever, RetrievalOutcome},
    tools::{RetrieveReportsTool, ToolRegistry, RETRIEVE_TOOL_NAME},
};
use serde_json::json;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn liver_and_prostate_corpus(dir: &Path) {
    write(
        dir,
        "irm_hepatique_01.txt",
        "TITRE: IRM hépatique\n\
         Indication: bilan de lésion hépatique\n\
         Résultat: lésion hépatique du segment VII\n\
         Conclusion: lésion hépatique bénigne\n",
    );
    write(
        dir,
        "irm_hepatique_02.txt",
        "Indication: douleur abdominale\nConclusion: foie normal, aucune lésion\n",
    );
    write(
        dir,
        "irm_hepatique_03.txt",
        "Indication: contrôle\nConclusion: kyste biliaire simple\n",
    );
    write(
        dir,
        "irm_prostate_01.txt",
        "Indication: PSA élevé\nConclusion: adénome prostatique\n",
    );
}

#[test]
fn test_end_to_end_category_and_top_k() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let text = retriever.retrieve("lésion hépatique", "hepatique", 2);

    assert!(text.starts_with("Retrieved 2 similar reports for query: 'lésion hépatique'\n\n"));
    assert_eq!(text.matches("--- Report ").count(), 2);
    assert!(!text.contains("prostate"));

    let first = text.find("Report: irm_hepatique_01.txt").unwrap();
    let second = text.find("Report: irm_hepatique_02.txt").unwrap();
    assert!(first < second);
    assert!(!text.contains("irm_hepatique_03.txt"));

    // Canonical section order inside the first block
    let block = &text[first..second];
    let title = block.find("TITRE:\nIRM hépatique").unwrap();
    let indication = block.find("Indication:\n").unwrap();
    let findings = block.find("Résultat:\n").unwrap();
    let conclusion = block.find("Conclusion:\n").unwrap();
    assert!(title < indication && indication < findings && findings < conclusion);
    assert!(!block.contains("Technique:"));
}

#[test]
fn test_similarities_descend() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let outcome = retriever.retrieve_detailed("lésion hépatique", "all");

    assert_eq!(outcome.corpus_status(), &CorpusStatus::Ready);
    let ranked = outcome.ranked();
    assert_eq!(ranked.len(), 4);
    assert!(ranked.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    assert!(ranked.iter().all(|r| (0.0..=1.0).contains(&r.similarity)));
    assert!(ranked[0].similarity > 0.0);
    assert_eq!(ranked[3].similarity, 0.0);

    match outcome {
        RetrievalOutcome::Ranked { ranking, .. } => assert_eq!(ranking, RankingStatus::Scored),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_wildcard_keeps_every_category() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let all = retriever.retrieve("adénome", "ALL", 10);
    let empty = retriever.retrieve("adénome", "", 10);

    assert!(all.starts_with("Retrieved 4 similar reports"));
    assert_eq!(all, empty);
    // Only the prostate report mentions the query term
    let first_block = all.split("--- Report 2 ---").next().unwrap();
    assert!(first_block.contains("irm_prostate_01.txt"));
}

#[test]
fn test_partial_category_match() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let text = retriever.retrieve("kyste", "HEPAT", 3);

    assert!(text.starts_with("Retrieved 3 similar reports"));
    assert!(!text.contains("prostate"));
}

#[test]
fn test_unknown_category_lists_available_types() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let text = retriever.retrieve("lésion", "thyroide", 3);

    assert_eq!(
        text,
        "No reports found for type: thyroide. Available types: hepatique, prostate"
    );
}

#[test]
fn test_zero_top_k_returns_header_only() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let text = retriever.retrieve("lésion", "hepatique", 0);

    assert_eq!(text, "Retrieved 0 similar reports for query: 'lésion'\n");
}

#[test]
fn test_retrieval_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let first = retriever.retrieve("lésion hépatique", "all", 3);
    let second = retriever.retrieve("lésion hépatique", "all", 3);

    assert_eq!(first, second);
}

#[test]
fn test_cached_reports_survive_file_changes_until_reset() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    let before = retriever.retrieve("adénome", "prostate", 1);

    write(dir.path(), "irm_prostate_01.txt", "Conclusion: nodule PIRADS 4\n");
    let cached = retriever.retrieve("adénome", "prostate", 1);
    assert_eq!(before, cached);

    retriever.reset_cache();
    let reloaded = retriever.retrieve("adénome", "prostate", 1);
    assert!(reloaded.contains("nodule PIRADS 4"));
    assert!(!reloaded.contains("adénome prostatique"));
}

#[test]
fn test_new_files_are_picked_up_without_reset() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let retriever = ReportRetriever::open(dir.path()).unwrap();
    assert_eq!(retriever.categories().len(), 2);

    write(dir.path(), "cerveau_irm_01.txt", "Conclusion: pas d'anomalie\n");
    let categories: Vec<String> = retriever
        .categories()
        .into_iter()
        .map(|c| c.category)
        .collect();
    assert_eq!(categories, vec!["cerveau", "hepatique", "prostate"]);
}

#[test]
fn test_missing_knowledge_base_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");

    let retriever = ReportRetriever::open(&missing).unwrap();
    let outcome = retriever.retrieve_detailed("lésion", "all");

    assert_eq!(outcome.corpus_status(), &CorpusStatus::DirectoryMissing(missing));
    assert_eq!(
        retriever.retrieve("lésion", "hepatique", 3),
        "No reports found for type: hepatique. Available types: "
    );
}

#[test]
fn test_tool_invocation_through_registry_schema() {
    let dir = tempfile::tempdir().unwrap();
    liver_and_prostate_corpus(dir.path());

    let kb = Arc::new(KnowledgeBase::new(dir.path(), "txt", "irm").unwrap());
    let retriever = Arc::new(ReportRetriever::with_knowledge_base(kb, 5000).unwrap());
    let tool = RetrieveReportsTool::new(Arc::clone(&retriever));

    let registry = ToolRegistry::new();
    let schema = registry.get(RETRIEVE_TOOL_NAME).unwrap();
    assert_eq!(schema.required(), vec!["query", "report_type"]);

    let result = tool.invoke(json!({
        "query": "lésion hépatique",
        "report_type": "hepatique",
        "top_k": 2
    }));
    assert!(result.success);
    assert_eq!(result.output, retriever.retrieve("lésion hépatique", "hepatique", 2));

    let bad = tool.invoke(json!({ "report_type": "hepatique" }));
    assert!(!bad.success);
    assert!(bad.error.is_some());
}

#[test]
fn test_concurrent_retrievals_share_one_cache() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KnowledgeBase>();
    assert_send_sync::<ReportRetriever>();

    let dir = tempfile::tempdir().unwrap();
    for i in 0..50 {
        write(
            dir.path(),
            &format!("irm_hepatique_{:02}.txt", i),
            &format!("Indication: bilan {}\nConclusion: lésion {} du foie\n", i, i % 7),
        );
    }

    let kb = Arc::new(KnowledgeBase::new(dir.path(), "txt", "irm").unwrap());
    let retriever = Arc::new(ReportRetriever::with_knowledge_base(Arc::clone(&kb), 5000).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let retriever = Arc::clone(&retriever);
            thread::spawn(move || retriever.retrieve("lésion 7", "hepatique", 3))
        })
        .collect();

    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(outputs[0].starts_with("Retrieved 3 similar reports for query: 'lésion 7'"));
    assert!(outputs.iter().all(|o| o == &outputs[0]));
    assert_eq!(kb.cached_len(), 50);
    assert_eq!(outputs[0], retriever.retrieve("lésion 7", "hepatique", 3));
}
