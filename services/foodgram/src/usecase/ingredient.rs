use crate::domain::repository::IngredientRepository;
use crate::domain::types::Ingredient;
use crate::error::FoodgramError;

pub struct ListIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ListIngredientsUseCase<R> {
    /// Blank `name` is treated as no filter.
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let prefix = name.map(str::trim).filter(|n| !n.is_empty());
        self.repo.list(prefix).await
    }
}

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, FoodgramError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::IngredientNotFound)
    }
}
