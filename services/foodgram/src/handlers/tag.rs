use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::FoodgramError;
use crate::handlers::path_id;
use crate::handlers::response::TagResponse;
use crate::state::AppState;
use crate::usecase::tag::{GetTagUseCase, ListTagsUseCase};

// ── GET /api/tags ────────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, FoodgramError> {
    let uc = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = uc.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{id} ───────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TagResponse>, FoodgramError> {
    let id = path_id(&id, FoodgramError::TagNotFound)?;
    let uc = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}
