use chrono::NaiveDate;

use crate::domain::repository::ShoppingListRepository;
use crate::domain::shopping_list::render_shopping_list;
use crate::error::FoodgramError;

pub struct DownloadShoppingListUseCase<L: ShoppingListRepository> {
    pub repo: L,
}

impl<L: ShoppingListRepository> DownloadShoppingListUseCase<L> {
    pub async fn execute(&self, user_id: i32, today: NaiveDate) -> Result<String, FoodgramError> {
        let items = self.repo.items(user_id).await?;
        let recipes = self.repo.recipes(user_id).await?;
        Ok(render_shopping_list(today, &items, &recipes))
    }
}
