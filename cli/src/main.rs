use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::loader::{load_corpus_dir, load_document, CorpusPaths, DEFAULT_QUERIES_FILE};
use search_core::{QueryProcessor, QueryResult};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Rank a folder of documents against free-text queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every query in the folder's queries file against the other files
    Query {
        /// Folder holding the documents and the queries file
        #[arg(long)]
        dir: PathBuf,
        /// Name of the queries file inside the folder
        #[arg(long, default_value = DEFAULT_QUERIES_FILE)]
        queries: String,
        /// Maximum number of documents to list per query (default: all)
        #[arg(long)]
        limit: Option<usize>,
        /// Emit one JSON object per query instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Count occurrences of the given words in one document
    Count {
        #[arg(long)]
        file: PathBuf,
        /// Whitespace-separated words, matched as-is
        words: String,
    },
    /// Print a document's indexed words in tree preorder
    Keys {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct JsonLine<'a> {
    query: &'a str,
    results: Vec<JsonHit<'a>>,
}

#[derive(Serialize)]
struct JsonHit<'a> {
    doc_id: &'a str,
    score: u64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { dir, queries, limit, json } => run_queries(dir, queries, limit, json),
        Commands::Count { file, words } => {
            let doc = load_document(&file)?;
            println!("{}", doc.get_count(&words));
            Ok(())
        }
        Commands::Keys { file } => {
            let doc = load_document(&file)?;
            let keys: Vec<&str> = doc.words().preorder_keys().into_iter().map(String::as_str).collect();
            println!("{}", keys.join(" "));
            Ok(())
        }
    }
}

fn run_queries(dir: PathBuf, queries: String, limit: Option<usize>, json: bool) -> Result<()> {
    let corpus = load_corpus_dir(&CorpusPaths::new(&dir, queries))?;
    let processor = QueryProcessor::from(corpus);
    let results = processor.process(limit);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for result in &results {
        if json {
            writeln!(out, "{}", serde_json::to_string(&to_json(result))?)?;
        } else {
            writeln!(out, "{}", render_plain(result))?;
        }
    }
    tracing::info!(dir = %dir.display(), queries = results.len(), "query run complete");
    Ok(())
}

fn render_plain(result: &QueryResult) -> String {
    let mut line = format!("Query: {} [", result.query);
    for id in &result.doc_ids {
        line.push_str(id);
        line.push(' ');
    }
    line.push(']');
    line
}

fn to_json(result: &QueryResult) -> JsonLine<'_> {
    let results = result
        .doc_ids
        .iter()
        .zip(&result.scores)
        .map(|(doc_id, &score)| JsonHit { doc_id: doc_id.as_str(), score })
        .collect();
    JsonLine { query: &result.query, results }
}
