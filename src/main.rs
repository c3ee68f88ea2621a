//! reportrag - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use reportrag::{
    cli::{Args, Commands, Verbosity},
    config::Config,
    corpus::{CorpusStatus, KnowledgeBase},
    rag::ReportRetriever,
    telemetry,
};

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("{}: {}", "Error".red(), e);
        std::process::exit(2);
    }

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    if let Some(kb) = &args.kb {
        config.knowledge.path = kb.to_string_lossy().into_owned();
    }

    let verbosity = if args.quiet || args.verbose > 0 {
        args.verbosity()
    } else {
        Verbosity::from_config(&config.telemetry.default_verbosity).unwrap_or(Verbosity::Normal)
    };
    colored::control::set_override(config.telemetry.color_output);
    telemetry::init_tracing(verbosity.log_level(), config.telemetry.color_output);

    match &args.command {
        Some(Commands::Categories) => list_categories(&config)?,
        Some(Commands::Inspect { file }) => inspect_report(&config, file)?,
        Some(Commands::Config) => show_config(&config)?,
        None => {
            if let Some(query) = &args.query {
                run_retrieval(&config, &args, query)?;
            } else {
                println!("reportrag - Reference report retrieval");
                println!("\nUsage:");
                println!("  reportrag <query> [-t <type>] [-k <n>]   Retrieve similar reports");
                println!("  reportrag categories                     List report categories");
                println!("  reportrag inspect <file>                 Show parsed sections of a report");
                println!("  reportrag config                         Show configuration");
                println!("\nExample:");
                println!("  reportrag \"lésion hépatique\" -t hepatique -k 2");
                println!();
            }
        }
    }

    Ok(())
}

fn run_retrieval(config: &Config, args: &Args, query: &str) -> Result<()> {
    let retriever = ReportRetriever::from_config(config).context("Failed to build retriever")?;
    let top_k = args.top_k.unwrap_or(retriever.default_top_k());

    let outcome = retriever.retrieve_detailed(query, &args.report_type);
    report_corpus_status(outcome.corpus_status(), config);

    let text = reportrag::rag::ResultFormatter::new().format(&outcome, top_k);
    println!("{}", text);
    Ok(())
}

fn list_categories(config: &Config) -> Result<()> {
    let retriever = ReportRetriever::from_config(config).context("Failed to build retriever")?;
    let categories = retriever.categories();

    if categories.is_empty() {
        println!(
            "{} No reports found in {}",
            "!".yellow(),
            config.knowledge_dir().display()
        );
        return Ok(());
    }

    println!("{}", "Report categories:".bold());
    for entry in categories {
        println!("  {:<24} {}", entry.category.cyan(), entry.documents);
    }
    Ok(())
}

fn inspect_report(config: &Config, file: &std::path::Path) -> Result<()> {
    let kb = KnowledgeBase::from_config(config).context("Failed to open knowledge base")?;

    match kb.read_report(file) {
        Ok(doc) => {
            println!("{} {}", "Report:".bold(), doc.basename());
            println!("{} {}", "Category:".bold(), doc.category.cyan());
            for (section, text) in doc.sections.iter() {
                println!("\n{}", format!("{}:", section.label()).green());
                println!("{}", text);
            }
        }
        Err(reason) => {
            println!("{} {} excluded: {}", "✗".red(), file.display(), reason);
        }
    }
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

fn report_corpus_status(status: &CorpusStatus, config: &Config) {
    match status {
        CorpusStatus::DirectoryMissing(path) => eprintln!(
            "{}: knowledge base {} does not exist",
            "Warning".yellow(),
            path.display()
        ),
        CorpusStatus::DirectoryUnreadable(reason) => eprintln!(
            "{}: knowledge base {} unreadable: {}",
            "Warning".yellow(),
            config.knowledge_dir().display(),
            reason
        ),
        CorpusStatus::Empty => eprintln!(
            "{}: no usable reports in {}",
            "Warning".yellow(),
            config.knowledge_dir().display()
        ),
        CorpusStatus::Ready => {}
    }
}
