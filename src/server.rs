// Web server - page, doodle SVG and JSON API over the team directory

use crate::config::Config;
use crate::directory::{TeamDirectory, DEFAULT_SUGGESTION_LIMIT};
use crate::doodle;
use crate::loader::{CsvTableParser, TableParser};
use crate::page;
use crate::record::TeamRecord;
use crate::share;
use crate::view::{DoodleView, Selection};
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    directory: Arc<RwLock<TeamDirectory>>,
    public_url: String,
}

impl AppState {
    pub fn new(directory: TeamDirectory, public_url: impl Into<String>) -> Self {
        AppState {
            directory: Arc::new(RwLock::new(directory)),
            public_url: public_url.into(),
        }
    }

    pub fn from_config(config: &Config, directory: TeamDirectory) -> Self {
        Self::new(directory, config.public_url.clone())
    }

    fn directory(&self) -> RwLockReadGuard<'_, TeamDirectory> {
        // a panicked writer leaves the old directory intact
        self.directory.read().unwrap_or_else(|e| e.into_inner())
    }

    fn replace_directory(&self, directory: TeamDirectory) {
        let mut guard = self.directory.write().unwrap_or_else(|e| e.into_inner());
        *guard = directory;
    }
}

// ============================================================================
// Errors & responses
// ============================================================================

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Team not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = ApiResponse {
            success: false,
            data: (),
            error: Some(self.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

#[derive(Serialize)]
struct TeamResponse {
    record: TeamRecord,
    view: Selection,
}

#[derive(Serialize)]
struct UploadResponse {
    rows: usize,
}

#[derive(Deserialize)]
struct SuggestParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct DoodleParams {
    #[serde(default)]
    team: String,
    seed: Option<u64>,
}

fn team_param(raw: Option<String>) -> String {
    raw.as_deref()
        .and_then(share::team_from_query)
        .unwrap_or_default()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Full page, pre-filled from ?team=
async fn serve_page(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Html<String> {
    let team = team_param(raw);
    let directory = state.directory();
    let view = DoodleView::build(&directory, &team);
    let share_url = share::share_url(&state.public_url, &team);
    Html(page::render_page(&directory, &view, &share_url, &mut rand::thread_rng()))
}

/// GET /fragment - Result panel only
async fn serve_fragment(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Html<String> {
    let team = team_param(raw);
    let view = DoodleView::build(&state.directory(), &team);
    Html(page::render_fragment(&view, &mut rand::thread_rng()))
}

/// GET /doodle.svg - The avatar on its own
async fn serve_doodle(
    State(state): State<AppState>,
    Query(params): Query<DoodleParams>,
) -> Result<Response, AppError> {
    let view = DoodleView::build(&state.directory(), &params.team);
    let selection = view
        .selection
        .ok_or_else(|| AppError::NotFound(params.team.clone()))?;

    let svg = match params.seed {
        Some(seed) => doodle::render_svg(&selection.doodle, &mut StdRng::seed_from_u64(seed)),
        None => doodle::render_svg(&selection.doodle, &mut rand::thread_rng()),
    };

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/teams - Autocomplete suggestions
async fn suggest_teams(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let suggestions: Vec<String> = state
        .directory()
        .suggestions(&params.q, limit)
        .into_iter()
        .map(String::from)
        .collect();
    Json(ApiResponse::ok(suggestions))
}

/// GET /api/teams/:name - Record plus derived view
async fn get_team(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<TeamResponse>>, AppError> {
    let directory = state.directory();
    let record = directory
        .lookup(&name)
        .cloned()
        .ok_or_else(|| AppError::NotFound(name.clone()))?;
    let view = DoodleView::build(&directory, &name)
        .selection
        .ok_or_else(|| AppError::NotFound(name.clone()))?;

    Ok(Json(ApiResponse::ok(TeamResponse { record, view })))
}

/// POST /api/table - Replace the table with uploaded CSV text
async fn upload_table(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ApiResponse<UploadResponse>>, AppError> {
    let text = body.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("empty CSV body".to_string()));
    }

    let records = CsvTableParser
        .parse_str(text)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let directory = TeamDirectory::new(records);
    if directory.is_empty() {
        return Err(AppError::BadRequest("CSV contains no teams".to_string()));
    }

    let rows = directory.len();
    state.replace_directory(directory);
    tracing::info!(rows, "team table replaced from upload");

    Ok(Json(ApiResponse::ok(UploadResponse { rows })))
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/teams", get(suggest_teams))
        .route("/teams/:name", get(get_team))
        .route("/table", post(upload_table))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_page))
        .route("/fragment", get(serve_fragment))
        .route("/doodle.svg", get(serve_doodle))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HairLength;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn state() -> AppState {
        let directory = TeamDirectory::new(vec![
            TeamRecord::new("Arsenal")
                .with_colors("#EF0107", "#FFFFFF")
                .with_hair(HairLength::Text("15".to_string())),
            TeamRecord::new("Aston Villa"),
            TeamRecord::new("Chelsea").with_hair(HairLength::Text("long".to_string())),
        ]);
        AppState::new(directory, "http://x/")
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_page_prefilled_from_query() {
        let (status, html) = get_body(build_router(state()), "/?team=%20arsenal%20").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<svg"));
        assert!(html.contains(r##"fill="#EF0107""##));
        assert!(html.contains(r#"href="http://x/?team=arsenal""#));
    }

    #[tokio::test]
    async fn test_page_prompt_without_team() {
        let (status, html) = get_body(build_router(state()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Start typing a team"));
        assert!(html.contains(r#"href="http://x/""#));
    }

    #[tokio::test]
    async fn test_fragment() {
        let (_, html) = get_body(build_router(state()), "/fragment?team=Chelsea").await;
        assert!(html.contains("<code>long</code>"));
        assert!(!html.contains("<html"));
    }

    #[tokio::test]
    async fn test_doodle_svg_seeded() {
        let app = build_router(state());
        let (status, a) = get_body(app.clone(), "/doodle.svg?team=arsenal&seed=3").await;
        let (_, b) = get_body(app, "/doodle.svg?team=arsenal&seed=3").await;
        assert_eq!(status, StatusCode::OK);
        assert!(a.starts_with("<svg"));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_doodle_svg_not_found() {
        let (status, _) = get_body(build_router(state()), "/doodle.svg?team=Real%20Madrid").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_suggestions_api() {
        let (_, body) = get_body(build_router(state()), "/api/teams?q=a&limit=2").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!(["Arsenal", "Aston Villa"]));
    }

    #[tokio::test]
    async fn test_team_api() {
        let (status, body) = get_body(build_router(state()), "/api/teams/CHELSEA").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["record"]["Team"], "Chelsea");
        assert_eq!(json["data"]["view"]["hair_px"], 40);

        let (status, body) = get_body(build_router(state()), "/api/teams/Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Team not found"));
    }

    #[tokio::test]
    async fn test_upload_replaces_table() {
        let state = state();
        let app = build_router(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri("/api/table")
            .body(Body::from("Club,Hair\nCeltic,3\nRangers,short\n"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, _) = get_body(build_router(state.clone()), "/api/teams/celtic").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_body(build_router(state), "/api/teams/arsenal").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_rejects_empty() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/table")
            .body(Body::from("  "))
            .unwrap();
        let response = build_router(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
