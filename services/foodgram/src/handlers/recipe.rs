use axum::{
    Json,
    extract::{OriginalUri, Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::{Query, QueryRejection};
use chrono::Utc;
use serde::Deserialize;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_core::serde::deserialize_flag;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::IngredientAmount;
use crate::error::FoodgramError;
use crate::handlers::pagination::Paginated;
use crate::handlers::response::RecipeResponse;
use crate::handlers::{json_body, path_id, required};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase, RecipeInput,
    RecipePatch, RecipeQuery, UpdateRecipeUseCase,
};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── Request types ────────────────────────────────────────────────────────────

/// `tags` may repeat: `?tags=breakfast&tags=lunch`.
#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_favorited: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_in_shopping_cart: Option<bool>,
}

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

impl From<IngredientAmountRequest> for IngredientAmount {
    fn from(line: IngredientAmountRequest) -> Self {
        Self {
            ingredient_id: line.id,
            amount: line.amount,
        }
    }
}

/// Body of create and update. Every field is optional here; each operation
/// decides what it requires.
#[derive(Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

fn lines(ingredients: Option<Vec<IngredientAmountRequest>>) -> Option<Vec<IngredientAmount>> {
    ingredients.map(|lines| lines.into_iter().map(IngredientAmount::from).collect())
}

// ── GET /api/recipes ─────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<RecipeListQuery>, QueryRejection>,
) -> Result<Json<Paginated<RecipeResponse>>, FoodgramError> {
    let Query(query) = query.map_err(|_| FoodgramError::InvalidQuery)?;
    let page = PageRequest::new(query.page, query.limit, state.page_size);
    let uc = ListRecipesUseCase {
        repo: state.recipe_repo(),
    };
    let recipes = uc
        .execute(
            identity.map(|i| i.user_id),
            RecipeQuery {
                tags: query.tags,
                author: query.author,
                is_favorited: query.is_favorited.unwrap_or(false),
                is_in_shopping_cart: query.is_in_shopping_cart.unwrap_or(false),
            },
            page,
        )
        .await?;
    let recipes = recipes.map(|view| RecipeResponse::new(view, &state));
    Ok(Json(Paginated::new(recipes, page, &state.public_url, &uri)))
}

// ── GET /api/recipes/{id} ────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    let uc = GetRecipeUseCase {
        repo: state.recipe_repo(),
    };
    let view = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(RecipeResponse::new(view, &state)))
}

// ── POST /api/recipes ────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodgramError> {
    let body = json_body(body)?;
    let input = RecipeInput {
        ingredients: required("ingredients", lines(body.ingredients))?,
        tags: required("tags", body.tags)?,
        image: required("image", body.image)?,
        name: required("name", body.name)?,
        text: required("text", body.text)?,
        cooking_time: required("cooking_time", body.cooking_time)?,
    };
    let uc = CreateRecipeUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
    };
    let view = uc.execute(identity.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(RecipeResponse::new(view, &state))))
}

// ── PATCH /api/recipes/{id} ──────────────────────────────────────────────────

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    let body = json_body(body)?;
    let patch = RecipePatch {
        ingredients: lines(body.ingredients),
        tags: body.tags,
        image: body.image,
        name: body.name,
        text: body.text,
        cooking_time: body.cooking_time,
    };
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.image_store(),
    };
    let view = uc.execute(identity.user_id, id, patch).await?;
    Ok(Json(RecipeResponse::new(view, &state)))
}

// ── DELETE /api/recipes/{id} ─────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, FoodgramError> {
    let id = path_id(&id, FoodgramError::RecipeNotFound)?;
    let uc = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        images: state.image_store(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/recipes/download_shopping_cart ──────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, FoodgramError> {
    let uc = DownloadShoppingListUseCase {
        repo: state.shopping_list_repo(),
    };
    let text = uc
        .execute(identity.user_id, Utc::now().date_naive())
        .await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_cart.txt\"",
            ),
        ],
        text,
    ))
}
