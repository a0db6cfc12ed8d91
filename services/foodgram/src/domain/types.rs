use std::fmt;

use chrono::{DateTime, Utc};

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    /// Media-relative avatar path.
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Sign-up data after validation and hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Recipe with its author, tags and ingredient lines loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author: User,
    pub name: String,
    /// Media-relative image path.
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub published_at: DateTime<Utc>,
}

/// The short form of a recipe used in relations and subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Submitted `(ingredient id, amount)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Validated recipe contents ready to be written.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// List filters for recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Tag slugs; a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub author: Option<i32>,
    /// Restrict to recipes the viewer favorited.
    pub favorited_by: Option<i32>,
    /// Restrict to recipes in the viewer's cart.
    pub in_cart_of: Option<i32>,
}

/// Per-user recipe bookmark relations sharing one table shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeRelation {
    Favorite,
    ShoppingCart,
}

impl fmt::Display for RecipeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorite => f.write_str("favorites"),
            Self::ShoppingCart => f.write_str("the shopping cart"),
        }
    }
}

/// Recipe as seen by a particular caller.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author_subscribed: bool,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// User as seen by a particular caller.
#[derive(Debug, Clone)]
pub struct UserView {
    pub user: User,
    pub is_subscribed: bool,
}

/// Followed author together with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct AuthorView {
    pub author: User,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

/// One aggregated shopping-list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Recipe in a cart, listed at the end of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecipe {
    pub name: String,
    pub author: String,
}

/// Decoded image upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Media folder an upload is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Recipes,
    Users,
}

impl MediaFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recipes => "recipes",
            Self::Users => "users",
        }
    }
}
