use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::domain::types::RecipeRelation;
use crate::infra::db::{
    DbIngredientRepository, DbRecipeRelationRepository, DbRecipeRepository,
    DbShoppingListRepository, DbSubscriptionRepository, DbTagRepository, DbUserRepository,
};
use crate::infra::media::FsImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub images: FsImageStore,
    /// Origin used to build absolute media, pagination and short-link URLs.
    pub public_url: String,
    pub page_size: u32,
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscription_repo(&self) -> DbSubscriptionRepository {
        DbSubscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn relation_repo(&self, relation: RecipeRelation) -> DbRecipeRelationRepository {
        DbRecipeRelationRepository {
            db: self.db.clone(),
            relation,
        }
    }

    pub fn shopping_list_repo(&self) -> DbShoppingListRepository {
        DbShoppingListRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> FsImageStore {
        self.images.clone()
    }

    /// Absolute URL of a media-relative path.
    pub fn media_url(&self, path: &str) -> String {
        format!("{}/media/{}", self.public_url, path)
    }
}
