use anyhow::Result;
use axum::Router;
use clap::Parser;
use retrieval_core::loader::load_input;
use retrieval_core::{Corpus, SharedCorpus};
use server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Documents to load at startup (.txt/.json/.jsonl file or directory)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Only load the `.txt` files directly inside the input folder
    #[arg(long, default_value_t = false)]
    flat: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut corpus = Corpus::new();
    if let Some(input) = &args.input {
        load_input(&mut corpus, input, args.flat)?;
    }
    let corpus = SharedCorpus::new(corpus);
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app: Router = build_app(corpus.clone(), admin_token)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, documents = corpus.document_count(), "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
