use anyhow::{bail, Context, Result};
use clap::Parser;
use feedrank_core::{Document, FieldSelector, SearchEngine};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "feedrank")]
#[command(about = "Rank a document collection against a query with BM25", long_about = None)]
struct Cli {
    /// Input documents: JSON array of objects, or JSONL with one object per line
    #[arg(long)]
    input: String,
    /// Candidate text fields, first match wins
    #[arg(long, value_delimiter = ',', default_value = "description,summary,content,text")]
    fields: Vec<String>,
    /// Search query; without it the loaded documents are printed
    #[arg(long)]
    query: Option<String>,
    /// Number of results to return
    #[arg(long, default_value_t = 5)]
    top_k: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let documents = load_documents(Path::new(&cli.input))?;
    tracing::info!(count = documents.len(), input = %cli.input, "loaded documents");

    match cli.query {
        Some(query) => {
            let engine = SearchEngine::new(documents, FieldSelector::new(cli.fields));
            let hits = engine.search(&query, cli.top_k);
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
    }
    Ok(())
}

fn load_documents(path: &Path) -> Result<Vec<Document>> {
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        load_jsonl(path)
    } else {
        load_json(path)
    }
}

fn load_json(path: &Path) -> Result<Vec<Document>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {}", path.display()))?;
    match json {
        serde_json::Value::Array(rows) => rows.into_iter().map(as_document).collect(),
        serde_json::Value::Object(row) => Ok(vec![row]),
        _ => bail!("expected a JSON array of objects in {}", path.display()),
    }
}

fn load_jsonl(path: &Path) -> Result<Vec<Document>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut documents = Vec::new();
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row: serde_json::Value = serde_json::from_str(&line)
            .with_context(|| format!("parse {}:{}", path.display(), lineno + 1))?;
        documents.push(as_document(row)?);
    }
    Ok(documents)
}

fn as_document(value: serde_json::Value) -> Result<Document> {
    match value {
        serde_json::Value::Object(row) => Ok(row),
        other => bail!("document rows must be JSON objects, got {other}"),
    }
}
