use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::types::RecipeRelation;
use crate::error::FoodgramError;
use crate::handlers::path_id;
use crate::handlers::response::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::relation::{AddRecipeRelationUseCase, RemoveRecipeRelationUseCase};

async fn add(
    state: &AppState,
    relation: RecipeRelation,
    user_id: i32,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), FoodgramError> {
    let uc = AddRecipeRelationUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
        relations: state.relation_repo(relation),
    };
    let recipe = uc.execute(user_id, recipe_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeSummaryResponse::new(recipe, state)),
    ))
}

async fn remove(
    state: &AppState,
    relation: RecipeRelation,
    user_id: i32,
    recipe_id: i32,
) -> Result<StatusCode, FoodgramError> {
    let uc = RemoveRecipeRelationUseCase {
        recipes: state.recipe_repo(),
        relations: state.relation_repo(relation),
    };
    uc.execute(user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST/DELETE /api/recipes/{id}/favorite ───────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    add(&state, RecipeRelation::Favorite, identity.user_id, id).await
}

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    remove(&state, RecipeRelation::Favorite, identity.user_id, id).await
}

// ── POST/DELETE /api/recipes/{id}/shopping_cart ──────────────────────────────

pub async fn add_to_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    add(&state, RecipeRelation::ShoppingCart, identity.user_id, id).await
}

pub async fn remove_from_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    remove(&state, RecipeRelation::ShoppingCart, identity.user_id, id).await
}
