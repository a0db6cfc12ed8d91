use crate::domain::repository::{RecipeRelationRepository, RecipeRepository, UserRepository};
use crate::domain::types::RecipeSummary;
use crate::error::FoodgramError;
use crate::usecase::require_caller;

// ── AddRecipeRelation ────────────────────────────────────────────────────────

/// Put a recipe into the caller's favorites or shopping cart.
pub struct AddRecipeRelationUseCase<U, R, L>
where
    U: UserRepository,
    R: RecipeRepository,
    L: RecipeRelationRepository,
{
    pub users: U,
    pub recipes: R,
    pub relations: L,
}

impl<U, R, L> AddRecipeRelationUseCase<U, R, L>
where
    U: UserRepository,
    R: RecipeRepository,
    L: RecipeRelationRepository,
{
    pub async fn execute(
        &self,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<RecipeSummary, FoodgramError> {
        require_caller(&self.users, user_id).await?;
        let recipe = self
            .recipes
            .find_summary(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if !self.relations.add(user_id, recipe_id).await? {
            return Err(FoodgramError::AlreadyRelated {
                relation: self.relations.relation(),
                name: recipe.name,
            });
        }
        Ok(recipe)
    }
}

// ── RemoveRecipeRelation ─────────────────────────────────────────────────────

pub struct RemoveRecipeRelationUseCase<R: RecipeRepository, L: RecipeRelationRepository> {
    pub recipes: R,
    pub relations: L,
}

impl<R: RecipeRepository, L: RecipeRelationRepository> RemoveRecipeRelationUseCase<R, L> {
    pub async fn execute(&self, user_id: i32, recipe_id: i32) -> Result<(), FoodgramError> {
        if self.recipes.find_summary(recipe_id).await?.is_none() {
            return Err(FoodgramError::RecipeNotFound);
        }
        if !self.relations.remove(user_id, recipe_id).await? {
            return Err(FoodgramError::NotRelated(self.relations.relation()));
        }
        Ok(())
    }
}
