use crate::domain::repository::TagRepository;
use crate::domain::types::Tag;
use crate::error::FoodgramError;

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, FoodgramError> {
        self.repo.list().await
    }
}

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, FoodgramError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::TagNotFound)
    }
}
