use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use retrieval_core::loader::InputDoc;
use retrieval_core::{DocId, SharedCorpus};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_K: usize = 10;
pub const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_K }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub rank: f64,
    pub title: String,
    pub matched_terms: Vec<String>,
    pub snippet: String,
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub doc_ids: Vec<DocId>,
    pub document_count: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: SharedCorpus,
    pub admin_token: Option<String>,
}

pub fn build_app(corpus: SharedCorpus, admin_token: Option<String>) -> Result<Router> {
    let app_state = AppState { corpus, admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .route("/index/batch", post(index_batch))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let ranked = state.corpus.search(&params.q);
    let total_hits = ranked.len();
    let k = params.k.clamp(1, MAX_K);

    let results: Vec<SearchHit> = ranked
        .into_iter()
        .take(k)
        .map(|r| SearchHit {
            snippet: highlight_terms(&r.snippet, &r.matched_terms),
            doc_id: r.doc_id,
            rank: r.rank,
            title: r.title,
            matched_terms: r.matched_terms,
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, "search served");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let corpus = state.corpus.read();
    match corpus.document(doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "title": doc.title,
            "text": doc.text,
        }))),
        None => Err((StatusCode::NOT_FOUND, format!("document {doc_id} not found"))),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let corpus = state.corpus.read();
    Json(serde_json::json!({
        "document_count": corpus.document_count(),
        "vocabulary_size": corpus.index().vocabulary_size(),
    }))
}

/// Matched terms are lowercase letter runs; wrap whole-word, case-insensitive occurrences.
fn highlight_terms(snippet: &str, terms: &[String]) -> String {
    let mut s = snippet.to_string();
    for t in terms {
        let pattern = format!(r"\b{}\b", regex::escape(t));
        let Ok(pat) = regex::RegexBuilder::new(&pattern).case_insensitive(true).build() else { continue };
        s = pat.replace_all(&s, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).to_string();
    }
    s
}

// --- Admin endpoints ---
async fn index_batch(State(state): State<AppState>, headers: HeaderMap, Json(docs): Json<Vec<InputDoc>>) -> Result<Json<BatchResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let doc_ids = state.corpus.ingest_all(docs.into_iter().map(|d| (d.title, d.body)));
    let document_count = state.corpus.document_count();
    tracing::info!(ingested = doc_ids.len(), document_count, "batch ingested");
    Ok(Json(BatchResponse { doc_ids, document_count }))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
