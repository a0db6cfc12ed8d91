use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::domain::types::{AuthorView, User};
use crate::error::FoodgramError;
use crate::usecase::require_caller;

async fn author_view<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<AuthorView, FoodgramError> {
    let (recipes, recipes_count) = recipes.by_author(author.id, recipes_limit).await?;
    Ok(AuthorView {
        author,
        is_subscribed: true,
        recipes,
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    pub users: U,
    pub subscriptions: S,
    pub recipes: R,
}

impl<U, S, R> SubscribeUseCase<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    pub async fn execute(
        &self,
        user_id: i32,
        author_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<AuthorView, FoodgramError> {
        require_caller(&self.users, user_id).await?;
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        if user_id == author_id {
            return Err(FoodgramError::SelfSubscription);
        }
        if !self.subscriptions.add(user_id, author_id).await? {
            return Err(FoodgramError::AlreadySubscribed(author.username));
        }
        author_view(&self.recipes, author, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> UnsubscribeUseCase<U, S> {
    pub async fn execute(&self, user_id: i32, author_id: i32) -> Result<(), FoodgramError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(FoodgramError::UserNotFound);
        }
        if !self.subscriptions.remove(user_id, author_id).await? {
            return Err(FoodgramError::NotSubscribed);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<S: SubscriptionRepository, R: RecipeRepository> {
    pub subscriptions: S,
    pub recipes: R,
}

impl<S: SubscriptionRepository, R: RecipeRepository> ListSubscriptionsUseCase<S, R> {
    pub async fn execute(
        &self,
        user_id: i32,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<AuthorView>, FoodgramError> {
        let authors = self.subscriptions.list_authors(user_id, page).await?;
        let mut items = Vec::with_capacity(authors.items.len());
        for author in authors.items {
            items.push(author_view(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Page::new(items, authors.count))
    }
}
