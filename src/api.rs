use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::card::{CardSnapshot, CardState};
use crate::source::DynAdviceSource;
use crate::widget::{AdviceWidget, FetchOutcome, Trigger};

pub type SharedWidget = Arc<AdviceWidget<CardState>>;

#[derive(Clone)]
pub struct AppState {
    pub widget: SharedWidget,
}

impl AppState {
    /// Fresh, blank card backed by `source`.
    pub fn new(source: DynAdviceSource) -> Self {
        Self {
            widget: Arc::new(AdviceWidget::new(source, CardState::new())),
        }
    }
}

/// JSON API only (no static files). Used directly by tests.
pub fn create_router(state: AppState) -> Router {
    api_routes().with_state(state)
}

/// JSON API plus the static page served from `ui_dir`.
pub fn router(state: AppState, ui_dir: &Path) -> Router {
    api_routes()
        .fallback_service(ServeDir::new(ui_dir))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/card", get(get_card))
        .route("/api/advice", post(request_advice))
        .layer(CorsLayer::very_permissive())
}

#[derive(Debug, Default, Deserialize)]
struct AdviceQuery {
    #[serde(default)]
    trigger: Trigger,
}

#[derive(Serialize)]
struct AdviceResp {
    result: FetchOutcome,
    /// Absent on failure: the card is shared, so it may hold another viewer's advice.
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<CardSnapshot>,
}

async fn get_card(State(state): State<AppState>) -> Json<CardSnapshot> {
    Json(state.widget.snapshot())
}

/// Always 200. A failed fetch returns no card, so the page keeps what it already shows.
async fn request_advice(
    State(state): State<AppState>,
    Query(q): Query<AdviceQuery>,
) -> Json<AdviceResp> {
    let result = state.widget.request_advice(q.trigger).await;
    let card = match result {
        FetchOutcome::Failed { .. } => None,
        _ => Some(state.widget.snapshot()),
    };
    Json(AdviceResp { result, card })
}
