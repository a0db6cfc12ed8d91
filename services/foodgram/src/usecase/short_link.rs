use crate::domain::repository::RecipeRepository;
use crate::domain::short_link::{decode, encode};
use crate::error::FoodgramError;

// ── GetShortLink ─────────────────────────────────────────────────────────────

pub struct GetShortLinkUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetShortLinkUseCase<R> {
    /// Returns the short code for an existing recipe.
    pub async fn execute(&self, recipe_id: i32) -> Result<String, FoodgramError> {
        if self.repo.find_summary(recipe_id).await?.is_none() {
            return Err(FoodgramError::RecipeNotFound);
        }
        Ok(encode(recipe_id))
    }
}

// ── ResolveShortLink ─────────────────────────────────────────────────────────

pub struct ResolveShortLinkUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> ResolveShortLinkUseCase<R> {
    /// Returns the recipe id behind `code`.
    pub async fn execute(&self, code: &str) -> Result<i32, FoodgramError> {
        let id = decode(code).ok_or(FoodgramError::RecipeNotFound)?;
        if self.repo.find_summary(id).await?.is_none() {
            return Err(FoodgramError::RecipeNotFound);
        }
        Ok(id)
    }
}
