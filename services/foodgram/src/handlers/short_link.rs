use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use serde::Serialize;

use crate::error::FoodgramError;
use crate::handlers::path_id;
use crate::state::AppState;
use crate::usecase::short_link::{GetShortLinkUseCase, ResolveShortLinkUseCase};

#[derive(Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

// ── GET /api/recipes/{id}/get-link ───────────────────────────────────────────

pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShortLinkResponse>, FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    let uc = GetShortLinkUseCase {
        repo: state.recipe_repo(),
    };
    let code = uc.execute(id).await?;
    Ok(Json(ShortLinkResponse {
        short_link: format!("{}/s/{code}", state.public_url),
    }))
}

// ── GET /s/{code} ────────────────────────────────────────────────────────────

pub async fn follow_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, FoodgramError> {
    let uc = ResolveShortLinkUseCase {
        repo: state.recipe_repo(),
    };
    let id = uc.execute(&code).await?;
    Ok(Redirect::to(&format!("/recipes/{id}")))
}
