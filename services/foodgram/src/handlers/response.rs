use serde::Serialize;

use crate::domain::types::{
    AuthorView, Ingredient, RecipeIngredient, RecipeSummary, RecipeView, Tag, User, UserView,
};
use crate::state::AppState;

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl UserResponse {
    pub fn new(user: User, is_subscribed: bool, state: &AppState) -> Self {
        Self {
            avatar: user.avatar.as_deref().map(|path| state.media_url(path)),
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }

    pub fn from_view(view: UserView, state: &AppState) -> Self {
        Self::new(view.user, view.is_subscribed, state)
    }
}

/// Body returned on sign-up.
#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for CreatedUserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Followed author with a preview of their recipes.
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl AuthorResponse {
    pub fn new(view: AuthorView, state: &AppState) -> Self {
        Self {
            user: UserResponse::new(view.author, view.is_subscribed, state),
            recipes: view
                .recipes
                .into_iter()
                .map(|r| RecipeSummaryResponse::new(r, state))
                .collect(),
            recipes_count: view.recipes_count,
        }
    }
}

// ── Tags / ingredients ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.ingredient.id,
            name: line.ingredient.name,
            measurement_unit: line.ingredient.measurement_unit,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeResponse {
    pub fn new(view: RecipeView, state: &AppState) -> Self {
        let recipe = view.recipe;
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            author: UserResponse::new(recipe.author, view.author_subscribed, state),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: recipe.name,
            image: state.media_url(&recipe.image),
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Minified recipe.
#[derive(Debug, Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl RecipeSummaryResponse {
    pub fn new(recipe: RecipeSummary, state: &AppState) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: state.media_url(&recipe.image),
            cooking_time: recipe.cooking_time,
        }
    }
}
