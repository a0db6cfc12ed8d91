pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod shopping_list;
pub mod short_link;
pub mod subscription;
pub mod tag;
pub mod user;

use crate::domain::repository::{ImageStore, UserRepository};
use crate::domain::types::User;
use crate::error::FoodgramError;

/// Load the calling user. An identity naming no user is treated as unauthenticated.
pub(crate) async fn require_caller<U: UserRepository>(
    users: &U,
    user_id: i32,
) -> Result<User, FoodgramError> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or(FoodgramError::Unauthorized)
}

/// Remove an image no row references. Failures are logged, not returned.
pub(crate) async fn discard_image<I: ImageStore>(images: &I, path: &str) {
    if let Err(e) = images.delete(path).await {
        tracing::warn!(path, error = %e, "failed to remove unreferenced image");
    }
}
