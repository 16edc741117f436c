//! Member search endpoints
//!
//! - `GET /v1/members`: every matching row
//! - `GET /v2/members`: one page, always counted
//! - `GET /v3/members`: one page, counted only when needed
//!
//! All three accept `username`, `teamName`, `ageGoe` and `ageLoe`; the paged
//! ones also take `page` (0-based) and `size`.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use super::error::ApiError;
use crate::app::AppState;
use crate::dto::{MemberSearchCondition, MemberTeamDto};
use crate::orm::{Page, PageRequest};

async fn search_v1(
    State(state): State<AppState>,
    Query(condition): Query<MemberSearchCondition>,
) -> Result<Json<Vec<MemberTeamDto>>, ApiError> {
    let rows = state.db.queries().search(&condition).await?;
    Ok(Json(rows))
}

async fn search_v2(
    State(state): State<AppState>,
    Query(condition): Query<MemberSearchCondition>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<MemberTeamDto>>, ApiError> {
    let page = state
        .db
        .queries()
        .search_page_simple(&condition, page)
        .await?;
    Ok(Json(page))
}

async fn search_v3(
    State(state): State<AppState>,
    Query(condition): Query<MemberSearchCondition>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<MemberTeamDto>>, ApiError> {
    let page = state
        .db
        .queries()
        .search_page_complex(&condition, page)
        .await?;
    Ok(Json(page))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/members", get(search_v1))
        .route("/v2/members", get(search_v2))
        .route("/v3/members", get(search_v3))
}
