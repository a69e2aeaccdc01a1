use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use minisearch_core::source::load_documents;
use minisearch_core::{DocId, Normalizer, SearchConfig, SearchEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    /// Documents with a positive score, before truncation to `k`
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub name: String,
    pub score: f64,
    pub snippet: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub default_k: usize,
}

/// Load the corpus, build the index and wrap it in a router.
pub fn build_app_from_corpus(corpus: &std::path::Path, config: &SearchConfig) -> Result<Router> {
    let normalizer = Normalizer::from_config(&config.normalizer)?;
    let documents = load_documents(corpus, &config.extensions)?;
    let engine = SearchEngine::build(normalizer, documents);
    tracing::info!(num_docs = engine.len(), vocabulary = engine.index().vocabulary_size(), "index ready");
    Ok(build_app(Arc::new(engine), config.top_n))
}

pub fn build_app(engine: Arc<SearchEngine>, default_k: usize) -> Router {
    let app_state = AppState { engine, default_k };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.unwrap_or(state.default_k).clamp(1, MAX_K);
    let engine = &state.engine;

    // Rank the whole corpus once so total_hits reflects every match, then cut to k.
    let ranked = engine.search(&params.q, engine.len());
    let total_hits = ranked.iter().filter(|h| h.score > 0.0).count();

    let raw_terms: Vec<String> = params
        .q
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();
    let results: Vec<SearchHit> = ranked
        .into_iter()
        .filter(|h| h.score > 0.0)
        .take(k)
        .map(|h| SearchHit {
            doc_id: h.document.id,
            name: h.document.name.clone(),
            score: h.score,
            snippet: snippet(&h.document.text, &raw_terms),
        })
        .collect();

    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_ms: elapsed.as_millis(), took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match state.engine.document(doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "name": doc.name,
            "text": doc.text,
        }))),
        None => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))),
    }
}

fn snippet(text: &str, raw_terms: &[String]) -> Option<String> {
    if text.is_empty() { return None; }
    // find first match (case-insensitive) of any raw term
    let lowered = text.to_lowercase();
    let first_idx = raw_terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .find_map(|t| lowered.find(&t.to_lowercase()));
    let snippet = match first_idx {
        // lowercasing can shift byte offsets for some scripts; fall back to the head when it does
        Some(idx) if lowered.len() == text.len() => {
            let start = floor_char_boundary(text, idx.saturating_sub(100));
            let end = floor_char_boundary(text, (idx + 200).min(text.len()));
            text[start..end].to_string()
        }
        _ => text.chars().take(200).collect(),
    };
    Some(highlight_terms(&snippet, raw_terms))
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Wrap every query term in `<em>` in a single pass, HTML-escaping the text around and inside matches.
fn highlight_terms(snippet: &str, terms: &[String]) -> String {
    let mut alternatives: Vec<String> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();
    // longest first so overlapping terms prefer the longer match
    alternatives.sort_by(|a, b| b.len().cmp(&a.len()));
    alternatives.dedup();
    let pat = match regex::RegexBuilder::new(&alternatives.join("|")).case_insensitive(true).build() {
        Ok(pat) if !alternatives.is_empty() => pat,
        _ => return escape_html(snippet),
    };
    let mut out = String::with_capacity(snippet.len() + 16);
    let mut last = 0;
    for m in pat.find_iter(snippet) {
        out.push_str(&escape_html(&snippet[last..m.start()]));
        out.push_str("<em>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</em>");
        last = m.end();
    }
    out.push_str(&escape_html(&snippet[last..]));
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
