use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use serde::Deserialize;

use crate::error::FoodgramError;
use crate::handlers::{parse_query, path_id};
use crate::handlers::response::IngredientResponse;
use crate::state::AppState;
use crate::usecase::ingredient::{GetIngredientUseCase, ListIngredientsUseCase};

#[derive(Deserialize, Default)]
pub struct IngredientListQuery {
    pub name: Option<String>,
}

// ── GET /api/ingredients ─────────────────────────────────────────────────────

pub async fn list_ingredients(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<IngredientResponse>>, FoodgramError> {
    let query: IngredientListQuery = parse_query(raw_query)?;
    let uc = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = uc.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

// ── GET /api/ingredients/{id} ────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IngredientResponse>, FoodgramError> {
    let id = path_id(&id, FoodgramError::IngredientNotFound)?;
    let uc = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}
