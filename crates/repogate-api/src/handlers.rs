use crate::{routes::ROUTE_TABLE, ApiError, ApiResult, AppState, RouteEntry};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use http::header;
use repogate_core::{PublishReport, SearchHit, SymbolEntry, WriteMode};
use repogate_parser::{file_tree_index as build_tree_index, index_symbols, list_all_files};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn repo_tree(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let files = state
        .checkout
        .with_fresh_tree(|root| list_all_files(&root))
        .await?;
    Ok(Json(files))
}

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    pub path: Option<String>,
}

/// Returns the raw file as plain text. Never pulls; only clones when the
/// checkout does not exist yet.
pub async fn get_file(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> ApiResult<Response> {
    let path = required(query.path, "Missing file path")?;
    state.checkout.ensure_cloned().await?;
    let entry = state.checkout.read_file(&path).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        entry.content,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SearchHit>>> {
    let term = required(query.term, "Missing search term")?;
    let limit = state.settings.search.max_results;
    let hits = state
        .checkout
        .with_fresh_tree(move |root| repogate_parser::search(&root, &term, limit))
        .await??;
    Ok(Json(hits))
}

pub async fn list_routes() -> Json<&'static [RouteEntry]> {
    Json(ROUTE_TABLE)
}

pub async fn functions_index(State(state): State<AppState>) -> ApiResult<Json<Vec<SymbolEntry>>> {
    let symbols = state
        .checkout
        .with_fresh_tree(|root| index_symbols(&root))
        .await?;
    Ok(Json(symbols))
}

pub async fn file_tree_index(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<String, Vec<String>>>> {
    let index = state
        .checkout
        .with_fresh_tree(|root| build_tree_index(&list_all_files(&root)))
        .await?;
    Ok(Json(index))
}

#[derive(Debug, Default, Deserialize)]
pub struct WriteRequest {
    pub path: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub message: &'static str,
    pub path: String,
    pub committed: bool,
    pub commit: Option<String>,
}

impl WriteResponse {
    fn new(message: &'static str, report: PublishReport) -> Self {
        Self {
            message,
            path: report.path,
            committed: report.committed,
            commit: report.commit,
        }
    }
}

pub async fn update_file(
    State(state): State<AppState>,
    payload: Result<Json<WriteRequest>, JsonRejection>,
) -> ApiResult<Json<WriteResponse>> {
    let request = parse_body(payload)?;
    let path = required(request.path, "Missing file path")?;
    let content = request
        .content
        .ok_or_else(|| ApiError::BadRequest("Missing file content".into()))?;

    let report = state
        .checkout
        .write_file(&path, &content, WriteMode::Update)
        .await?;
    Ok(Json(WriteResponse::new(
        "File updated and pushed successfully",
        report,
    )))
}

pub async fn create_file(
    State(state): State<AppState>,
    payload: Result<Json<WriteRequest>, JsonRejection>,
) -> ApiResult<Json<WriteResponse>> {
    let request = parse_body(payload)?;
    let path = required(request.path, "Missing file path")?;
    let content = request.content.unwrap_or_default();

    let report = state
        .checkout
        .write_file(&path, &content, WriteMode::Create)
        .await?;
    Ok(Json(WriteResponse::new(
        "File created and pushed successfully",
        report,
    )))
}

fn required(value: Option<String>, message: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

fn parse_body(payload: Result<Json<WriteRequest>, JsonRejection>) -> ApiResult<WriteRequest> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => Err(ApiError::BadRequest(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    }
}
