use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use retrieval_core::evaluation::{evaluate, mean_metrics, QueryMetrics};
use retrieval_core::loader::{load_input, load_judgments};
use retrieval_core::{Corpus, DocId};
use tracing_subscriber::{fmt, EnvFilter};

use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Load documents into an in-memory TF-IDF index, search and evaluate it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Input path (.txt/.json/.jsonl file or directory)
    #[arg(long)]
    input: PathBuf,
    /// Only load the `.txt` files directly inside the input folder
    #[arg(long, default_value_t = false)]
    flat: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the loaded documents against a query
    Search {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        query: String,
        /// Number of hits to print
        #[arg(long, default_value_t = 10)]
        k: usize,
        /// Print results as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Precision, recall and F1 for every query in a judgments file
    Evaluate {
        #[command(flatten)]
        source: Source,
        /// JSON object mapping query strings to relevant document ids
        #[arg(long)]
        judgments: PathBuf,
    },
    /// Document count and vocabulary size
    Stats {
        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { source, query, k, json } => {
            let corpus = load(&source)?;
            let results: Vec<_> = corpus.search(&query).into_iter().take(k).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }
            if results.is_empty() {
                println!("no results for {query:?}");
            }
            for (pos, r) in results.iter().enumerate() {
                println!("{:>3}. [{}] {}  rank={:.4}  matched={}", pos + 1, r.doc_id, r.title, r.rank, r.matched_terms.join(","));
            }
            Ok(())
        }
        Commands::Evaluate { source, judgments } => {
            let corpus = load(&source)?;
            let judgments = load_judgments(&judgments)?;
            let metrics = evaluate(&corpus, &judgments);
            print_report(&metrics);
            Ok(())
        }
        Commands::Stats { source } => {
            let corpus = load(&source)?;
            println!("documents: {}", corpus.document_count());
            println!("vocabulary: {}", corpus.index().vocabulary_size());
            Ok(())
        }
    }
}

fn load(source: &Source) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    let loaded = load_input(&mut corpus, &source.input, source.flat)?;
    println!("{loaded} documents loaded");
    Ok(corpus)
}

fn ids(set: &BTreeSet<DocId>) -> String {
    set.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

fn print_report(metrics: &[QueryMetrics]) {
    println!("{:<32} {:>9} {:>9} {:>9}  retrieved / relevant", "query", "precision", "recall", "f1");
    for m in metrics {
        println!(
            "{:<32} {:>9.2} {:>9.2} {:>9.2}  {{{}}} / {{{}}}",
            m.query, m.precision, m.recall, m.f1, ids(&m.retrieved), ids(&m.relevant)
        );
    }
    let (p, r, f) = mean_metrics(metrics);
    println!("{:<32} {:>9.2} {:>9.2} {:>9.2}", "mean", p, r, f);
}
