use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use minisearch_core::source::load_documents;
use minisearch_core::{Normalizer, RankedDocument, SearchConfig, SearchEngine};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

const PREVIEW_CHARS: usize = 160;

#[derive(Parser)]
#[command(name = "minisearch")]
#[command(about = "Rank a folder of text documents against a free-text query with TF-IDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Corpus path: a folder of text files, a .jsonl file, or a single file
    #[arg(long)]
    corpus: PathBuf,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// File extension to index when the corpus is a folder (repeatable)
    #[arg(long = "ext")]
    extensions: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the corpus and print the best matching documents
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Free-text query
        #[arg(long, short)]
        query: String,
        /// Number of results (defaults to the configured top_n)
        #[arg(long)]
        top_n: Option<usize>,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print index statistics and the heaviest terms of each document
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Terms listed per document
        #[arg(long, default_value_t = 5)]
        top_terms: usize,
    },
}

#[derive(Serialize)]
struct JsonHit<'a> {
    doc_id: usize,
    name: &'a str,
    score: f64,
    text: &'a str,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query, top_n, json } => {
            let (engine, config) = open_engine(&corpus)?;
            let hits = engine.search(&query, top_n.unwrap_or(config.top_n));
            if json {
                print_json(&hits)
            } else {
                print_hits(&hits);
                Ok(())
            }
        }
        Commands::Stats { corpus, top_terms } => {
            let (engine, _) = open_engine(&corpus)?;
            print_stats(&engine, top_terms);
            Ok(())
        }
    }
}

fn open_engine(args: &CorpusArgs) -> Result<(SearchEngine, SearchConfig)> {
    let mut config = SearchConfig::load_or_default(args.config.as_deref())?;
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    let normalizer = Normalizer::from_config(&config.normalizer)?;
    let documents = load_documents(Path::new(&args.corpus), &config.extensions)?;
    let engine = SearchEngine::build(normalizer, documents);
    tracing::info!(num_docs = engine.len(), vocabulary = engine.index().vocabulary_size(), "index ready");
    Ok((engine, config))
}

fn print_hits(hits: &[RankedDocument<'_>]) {
    if hits.iter().all(|h| h.score == 0.0) {
        println!("no matching documents");
        return;
    }
    for (rank, hit) in hits.iter().filter(|h| h.score > 0.0).enumerate() {
        println!("{}. [{:.4}] {}", rank + 1, hit.score, hit.document.name);
        println!("   {}", preview(&hit.document.text));
    }
}

fn print_json(hits: &[RankedDocument<'_>]) -> Result<()> {
    let out: Vec<JsonHit<'_>> = hits
        .iter()
        .map(|h| JsonHit { doc_id: h.document.id, name: &h.document.name, score: h.score, text: &h.document.text })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_stats(engine: &SearchEngine, top_terms: usize) {
    let index = engine.index();
    println!("documents:  {}", index.num_docs());
    println!("vocabulary: {}", index.vocabulary_size());
    for (pos, doc) in engine.documents().iter().enumerate() {
        let terms: Vec<String> =
            index.top_terms(pos, top_terms).into_iter().map(|(t, w)| format!("{t}={w:.4}")).collect();
        println!("{:>5} {}: {}", pos, doc.name, terms.join(" "));
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}
