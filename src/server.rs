// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::pipeline::{self, AggregateCache};
use crate::present::{ViewResponse, render_page};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub cache: Option<Arc<AggregateCache>>,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        let cache = cfg.cache_ttl().map(|ttl| Arc::new(AggregateCache::new(ttl)));
        Self {
            cfg: Arc::new(cfg),
            cache,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub branch: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/branches", get(branches))
        .route("/api/view", get(view))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(
        &state.cfg.branch_options(),
        &state.cfg.all_branches_label,
    ))
}

async fn branches(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.cfg.branch_options())
}

/// Runs the whole pipeline for every request; the fetch blocks, so it goes
/// to the blocking pool.
async fn view(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> (StatusCode, Json<ViewResponse>) {
    let branch = params
        .branch
        .unwrap_or_else(|| state.cfg.all_branches_label.clone());
    let st = state.clone();
    let selected = branch.clone();
    let res = tokio::task::spawn_blocking(move || {
        pipeline::run(&st.cfg, &selected, st.cache.as_deref())
    })
    .await;

    match res {
        Ok(Ok(view)) => (
            StatusCode::OK,
            Json(ViewResponse::from_view(&view, &state.cfg.currency_suffix)),
        ),
        Ok(Err(e)) => {
            warn!(branch = %branch, error = %e, "pipeline failed");
            (StatusCode::BAD_GATEWAY, Json(ViewResponse::failed(&branch, e)))
        }
        Err(e) => {
            error!(branch = %branch, error = %e, "pipeline task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ViewResponse::failed(&branch, "internal error")),
            )
        }
    }
}

pub async fn serve(cfg: Config, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(address = %listener.local_addr()?, source = %cfg.source, "dashboard listening");
    axum::serve(listener, router(AppState::new(cfg))).await?;
    Ok(())
}
