/// Resolution API endpoints
///
/// Lets a browser client ask how to address an author or entry instead of
/// re-deriving locality from ambiguous backend fields.
use crate::{
    context::AppContext,
    error::{LinkError, LinkResult, ResolutionExt},
    identifier::{is_valid_identifier, try_extract_identifier},
    links::try_extract_host,
    locality::{AuthorRef, EntityRef, EntryRef, Locality},
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Build resolution routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/resolve/author", post(resolve_author))
        .route("/api/resolve/entry", post(resolve_entry))
        .route("/api/identifiers/validate", get(validate_identifier))
        .route("/api/identifiers/extract", get(extract_identifier))
        .route("/api/hosts", get(resolve_host))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAuthor {
    pub locality: Locality,
    pub reference: EntityRef,
    pub route_path: String,
    pub api_url: String,
    pub inbox_url: String,
}

/// Classify an author once and derive every address the client needs for it
pub async fn resolve_author(
    State(ctx): State<AppContext>,
    Json(author): Json<AuthorRef>,
) -> Json<ResolvedAuthor> {
    let resolver = &ctx.resolver;
    let reference = resolver.classify_author(&author);

    Json(ResolvedAuthor {
        locality: reference.locality(),
        route_path: reference.author_route_path(),
        api_url: resolver.author_api_url_for(&reference),
        inbox_url: resolver.inbox_api_url_for(&reference),
        reference,
    })
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntry {
    pub locality: Locality,
    pub reference: EntityRef,
    pub route_path: String,
    pub api_identifier: String,
    pub api_url: String,
}

/// Classify an entry once and derive every address the client needs for it
pub async fn resolve_entry(
    State(ctx): State<AppContext>,
    Json(entry): Json<EntryRef>,
) -> Json<ResolvedEntry> {
    let resolver = &ctx.resolver;
    let reference = resolver.classify_entry(&entry);

    Json(ResolvedEntry {
        locality: reference.locality(),
        route_path: reference.entry_route_path(),
        api_identifier: reference.api_identifier().to_string(),
        api_url: resolver.entry_api_url_for(&reference),
        reference,
    })
}

#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    pub candidate: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub candidate: String,
    pub valid: bool,
}

pub async fn validate_identifier(Query(params): Query<ValidateParams>) -> Json<ValidateResponse> {
    let valid = is_valid_identifier(&params.candidate);
    Json(ValidateResponse {
        candidate: params.candidate,
        valid,
    })
}

#[derive(Debug, Deserialize)]
pub struct ExtractParams {
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub identifier: String,
    /// False when the identifier is only a best-effort guess
    pub confident: bool,
}

pub async fn extract_identifier(Query(params): Query<ExtractParams>) -> Json<ExtractResponse> {
    let resolution = try_extract_identifier(&params.reference);
    let confident = resolution.is_confident();

    Json(ExtractResponse {
        identifier: resolution.or_fallback(),
        confident,
    })
}

#[derive(Debug, Deserialize)]
pub struct HostParams {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HostResponse {
    pub host: String,
    /// Whether the host is the configured backend
    pub local: bool,
}

/// Extract a URL's host and compare it with the backend.
///
/// Unlike the resolver itself this endpoint rejects malformed input, since
/// a caller asking about a host wants to know the URL was bad.
pub async fn resolve_host(
    State(ctx): State<AppContext>,
    Query(params): Query<HostParams>,
) -> LinkResult<Json<HostResponse>> {
    let host = try_extract_host(&params.url)
        .map_err(|e| LinkError::Validation(e.to_string()))?;

    Ok(Json(HostResponse {
        local: ctx.resolver.is_backend_host(&host),
        host,
    }))
}
