use std::{path::PathBuf, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Serialize;
use time::OffsetDateTime;
use tower_http::{cors::CorsLayer, services::ServeDir};

use podium_model::SubmitRequest;

use crate::{
    error::ApiError,
    handler::LeaderboardHandler,
    page::{PageOptions, render_page},
};

/// HTTP service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
    page: PageOptions,
    static_dir: Option<PathBuf>,
}

struct AppState<H> {
    handler: Arc<H>,
    page: Arc<PageOptions>,
}

impl<H> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            page: Arc::clone(&self.page),
        }
    }
}

impl<H> HttpApi<H>
where
    H: LeaderboardHandler,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            page: PageOptions::default(),
            static_dir: None,
        }
    }

    /// Presentation settings for `GET /`.
    pub fn with_page(mut self, page: PageOptions) -> Self {
        self.page = page;
        self
    }

    /// Serve files from `dir` under `/static`.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Build the axum router.
    ///
    /// Routes:
    /// - POST /update - record a submission
    /// - POST /reset - clear every task, then redirect to `/`
    /// - POST /reset/{task} - clear one task, then redirect to `/`
    /// - GET / - HTML leaderboard with a refresh directive
    /// - GET /api/v1/leaderboard - the same view as JSON
    /// - GET /healthz - liveness
    ///
    /// Every route accepts cross-origin requests from any origin.
    pub fn router(self) -> Router {
        let state = AppState {
            handler: self.handler,
            page: Arc::new(self.page),
        };

        let mut router = Router::new()
            .route("/", get(show_page::<H>))
            .route("/update", post(submit::<H>))
            .route("/reset", post(reset_all::<H>))
            .route("/reset/{task}", post(reset_task::<H>))
            .route("/api/v1/leaderboard", get(show_json::<H>))
            .route("/healthz", get(health))
            .with_state(state);

        if let Some(dir) = self.static_dir {
            router = router.nest_service("/static", ServeDir::new(dir));
        }

        router.layer(CorsLayer::permissive())
    }
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    status: &'static str,
    seq: u64,
}

/// POST /update
async fn submit<H>(
    State(state): State<AppState<H>>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: LeaderboardHandler,
{
    let Json(req) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let sub = state.handler.submit(req).await?;

    Ok(Json(SubmitResponse {
        status: "ok",
        seq: sub.seq(),
    }))
}

/// POST /reset
async fn reset_all<H>(State(state): State<AppState<H>>) -> Result<Redirect, ApiError>
where
    H: LeaderboardHandler,
{
    state.handler.reset(None).await?;
    Ok(Redirect::to("/"))
}

/// POST /reset/{task}
async fn reset_task<H>(
    State(state): State<AppState<H>>,
    Path(task): Path<String>,
) -> Result<Redirect, ApiError>
where
    H: LeaderboardHandler,
{
    if task.trim().is_empty() {
        return Err(ApiError::InvalidRequest("task cannot be empty".into()));
    }
    state.handler.reset(Some(&task)).await?;
    Ok(Redirect::to("/"))
}

/// GET /
async fn show_page<H>(State(state): State<AppState<H>>) -> Result<Html<String>, ApiError>
where
    H: LeaderboardHandler,
{
    let board = state.handler.leaderboard().await?;
    Ok(Html(render_page(&board, &state.page, OffsetDateTime::now_utc())))
}

/// GET /api/v1/leaderboard
async fn show_json<H>(State(state): State<AppState<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: LeaderboardHandler,
{
    Ok(Json(state.handler.leaderboard().await?))
}

async fn health() -> &'static str {
    "ok"
}
