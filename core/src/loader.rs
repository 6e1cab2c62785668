//! Feeding documents from disk into a corpus.
//!
//! The engine itself never touches the filesystem; these helpers read and decode files
//! and hand plain strings to [`Corpus::ingest`].

use crate::corpus::Corpus;
use crate::evaluation::Judgments;
use crate::DocId;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub title: String,
    pub body: String,
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

/// Ingest every `*.txt` file directly inside `dir`, titled by file name.
///
/// Files are visited in file-name order so identifiers are reproducible.
pub fn load_folder(corpus: &mut Corpus, dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        bail!("folder not found: {}", dir.display());
    }
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let p = entry?.path();
        if p.is_file() && extension(&p) == Some("txt") {
            files.push(p);
        }
    }
    files.sort();
    for file in &files {
        ingest_text_file(corpus, file)?;
    }
    tracing::info!(folder = %dir.display(), loaded = files.len(), "loaded text documents");
    Ok(files.len())
}

fn ingest_text_file(corpus: &mut Corpus, file: &Path) -> Result<DocId> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let title = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    Ok(corpus.ingest(title, text))
}

/// Ingest `{ "title", "body" }` records from a `.json` (object or array) or `.jsonl` file.
pub fn load_json_docs(corpus: &mut Corpus, file: &Path) -> Result<usize> {
    let mut count = 0;
    if extension(file) == Some("jsonl") {
        let reader = BufReader::new(File::open(file)?);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let doc: InputDoc = serde_json::from_str(&line).with_context(|| format!("parsing {}", file.display()))?;
            corpus.ingest(doc.title, doc.body);
            count += 1;
        }
        return Ok(count);
    }

    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v).with_context(|| format!("parsing {}", file.display()))?;
                corpus.ingest(doc.title, doc.body);
                count += 1;
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json).with_context(|| format!("parsing {}", file.display()))?;
            corpus.ingest(doc.title, doc.body);
            count += 1;
        }
        _ => bail!("expected a JSON object or array in {}", file.display()),
    }
    Ok(count)
}

/// Load a single file or walk a directory tree for `.txt`, `.json` and `.jsonl` files.
pub fn load_path(corpus: &mut Corpus, input: &Path) -> Result<usize> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("txt" | "json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input not found: {}", input.display());
    }

    let mut count = 0;
    for file in files {
        count += match extension(&file) {
            Some("json" | "jsonl") => load_json_docs(corpus, &file)?,
            _ => {
                ingest_text_file(corpus, &file)?;
                1
            }
        };
    }
    tracing::info!(input = %input.display(), loaded = count, "loaded documents");
    Ok(count)
}

/// Load `input` either as a flat folder of `.txt` files or through [`load_path`].
pub fn load_input(corpus: &mut Corpus, input: &Path, flat: bool) -> Result<usize> {
    if flat {
        load_folder(corpus, input)
    } else {
        load_path(corpus, input)
    }
}

/// Read relevance judgments from JSON: `{ "query": [doc ids...] }`.
pub fn load_judgments(path: &Path) -> Result<Judgments> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed: BTreeMap<String, BTreeSet<DocId>> = serde_json::from_str(&raw)?;
    Ok(parsed)
}
