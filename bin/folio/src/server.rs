//! Read-only JSON API over the content repositories

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use folio_core::{ContentKind, Facet};
use folio_site::{Site, SitemapGenerator};
use folio_store::{ContentError, Filter};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::with_repository;

/// Default number of entries for `/api/{kind}/recent`.
pub const DEFAULT_RECENT: usize = 3;

/// API error rendered as `{ "error": "..." }`.
///
/// Messages come from [`ContentError`] and never carry filesystem paths.
/// The repository has already logged the failure by the time it gets here.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::InvalidIdentifier { .. }
            | ContentError::PathEscape { .. }
            | ContentError::NotFound { .. } => Self::NotFound(err.to_string()),
            ContentError::Parse { .. } | ContentError::Enumeration { .. } => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

type ApiResult = Result<Response, ApiError>;

#[derive(Debug, Deserialize)]
struct RecentParams {
    limit: Option<usize>,
}

/// Create the API router.
pub fn create_router(site: Arc<Site>) -> Router {
    Router::new()
        .route("/api/{kind}", get(list_handler))
        .route("/api/{kind}/slugs", get(slugs_handler))
        .route("/api/{kind}/recent", get(recent_handler))
        .route("/api/{kind}/featured", get(featured_handler))
        .route("/api/{kind}/facets/{facet}", get(facets_handler))
        .route("/api/{kind}/{slug}", get(document_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

fn parse_kind(raw: &str) -> Result<ContentKind, ApiError> {
    raw.parse().map_err(ApiError::BadRequest)
}

async fn list_handler(
    State(site): State<Arc<Site>>,
    Path(kind): Path<String>,
    Query(filter): Query<Filter>,
) -> ApiResult {
    let kind = parse_kind(&kind)?;
    Ok(with_repository!(site, kind, |repo| Json(repo.query(&filter)).into_response()))
}

async fn slugs_handler(State(site): State<Arc<Site>>, Path(kind): Path<String>) -> ApiResult {
    let kind = parse_kind(&kind)?;
    Ok(Json(site.slugs(kind)).into_response())
}

async fn recent_handler(
    State(site): State<Arc<Site>>,
    Path(kind): Path<String>,
    Query(params): Query<RecentParams>,
) -> ApiResult {
    let kind = parse_kind(&kind)?;
    let limit = params.limit.unwrap_or(DEFAULT_RECENT);
    Ok(with_repository!(site, kind, |repo| Json(repo.recent(limit)).into_response()))
}

async fn featured_handler(State(site): State<Arc<Site>>, Path(kind): Path<String>) -> ApiResult {
    let kind = parse_kind(&kind)?;
    with_repository!(site, kind, |repo| {
        repo.featured()
            .map(|item| Json(item).into_response())
            .ok_or_else(|| ApiError::NotFound(format!("no featured {}", kind.label())))
    })
}

async fn facets_handler(
    State(site): State<Arc<Site>>,
    Path((kind, facet)): Path<(String, String)>,
) -> ApiResult {
    let kind = parse_kind(&kind)?;
    let facet: Facet = facet.parse().map_err(ApiError::BadRequest)?;
    Ok(with_repository!(site, kind, |repo| Json(repo.facets(facet)).into_response()))
}

async fn document_handler(
    State(site): State<Arc<Site>>,
    Path((kind, slug)): Path<(String, String)>,
) -> ApiResult {
    let kind = parse_kind(&kind)?;
    // A cache miss stats and parses a file.
    tokio::task::spawn_blocking(move || {
        with_repository!(site, kind, |repo| {
            let document = repo.try_get(&slug)?;
            Ok(Json(&*document).into_response())
        })
    })
    .await
    .map_err(|e| ApiError::Internal(format!("document lookup aborted: {e}")))?
}

async fn sitemap_handler(State(site): State<Arc<Site>>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        SitemapGenerator::generate(&site),
    )
        .into_response()
}
