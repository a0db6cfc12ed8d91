#![allow(async_fn_in_trait)]

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    CartRecipe, ImageUpload, Ingredient, MediaFolder, NewUser, RecipeDraft, RecipeFilter,
    RecipeRelation, RecipeSummary, RecipeView, ShoppingListItem, Tag, User,
};
use crate::error::FoodgramError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    /// Users ordered by id.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError>;
    async fn email_taken(&self, email: &str) -> Result<bool, FoodgramError>;
    async fn username_taken(&self, username: &str) -> Result<bool, FoodgramError>;
    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError>;
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError>;
    async fn update_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), FoodgramError>;
}

/// Repository for user-follows-author relations.
pub trait SubscriptionRepository: Send + Sync {
    async fn is_subscribed(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError>;

    /// Subset of `author_ids` the user follows.
    async fn subscribed_among(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> Result<Vec<i32>, FoodgramError>;

    /// Returns `false` when the subscription already existed.
    async fn add(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError>;

    /// Returns `false` when there was nothing to delete.
    async fn remove(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError>;

    /// Followed authors in subscription order.
    async fn list_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError>;
}

pub trait TagRepository: Send + Sync {
    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError>;
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError>;
}

pub trait IngredientRepository: Send + Sync {
    /// Ingredients ordered by name, optionally filtered by a case-insensitive name prefix.
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError>;
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError>;
}

/// Repository for recipes with their tags and ingredient lines.
///
/// Views are resolved relative to `viewer`; anonymous viewers see all flags unset.
pub trait RecipeRepository: Send + Sync {
    /// Recipes newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, FoodgramError>;

    async fn find_by_id(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> Result<Option<RecipeView>, FoodgramError>;

    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, FoodgramError>;

    /// Author id and stored image of a recipe, used for ownership checks.
    async fn find_owner(&self, id: i32) -> Result<Option<(i32, String)>, FoodgramError>;

    /// Newest recipes of an author, optionally truncated, plus the author's total count.
    async fn by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<(Vec<RecipeSummary>, u64), FoodgramError>;

    /// Insert the recipe with its tags and ingredient lines; returns the new id.
    async fn create(&self, author_id: i32, draft: &RecipeDraft) -> Result<i32, FoodgramError>;

    /// Overwrite fields and replace tags and ingredient lines wholesale.
    async fn update(&self, id: i32, draft: &RecipeDraft) -> Result<(), FoodgramError>;

    async fn delete(&self, id: i32) -> Result<(), FoodgramError>;
}

/// Per-user recipe bookmarks. One implementation serves every [`RecipeRelation`].
pub trait RecipeRelationRepository: Send + Sync {
    fn relation(&self) -> RecipeRelation;

    /// Returns `false` when the recipe was already present.
    async fn add(&self, user_id: i32, recipe_id: i32) -> Result<bool, FoodgramError>;

    /// Returns `false` when there was nothing to delete.
    async fn remove(&self, user_id: i32, recipe_id: i32) -> Result<bool, FoodgramError>;
}

/// Aggregation over the caller's shopping cart.
pub trait ShoppingListRepository: Send + Sync {
    /// Amounts summed per (name, unit), sorted by name then unit.
    async fn items(&self, user_id: i32) -> Result<Vec<ShoppingListItem>, FoodgramError>;
    async fn recipes(&self, user_id: i32) -> Result<Vec<CartRecipe>, FoodgramError>;
}

/// Storage for uploaded images.
pub trait ImageStore: Send + Sync {
    /// Persist the upload and return its media-relative path.
    async fn save(&self, folder: MediaFolder, image: &ImageUpload)
    -> Result<String, FoodgramError>;

    /// Remove a stored file; missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), FoodgramError>;
}
