use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait,
    sea_query::{Expr, OnConflict, Query, SelectStatement},
};

use foodgram_core::sea_ext::{SelectPage, ilike_prefix};
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    subscriptions, tags, users,
};

use crate::domain::repository::{
    IngredientRepository, RecipeRelationRepository, RecipeRepository, ShoppingListRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    CartRecipe, Ingredient, NewUser, Recipe, RecipeDraft, RecipeFilter, RecipeIngredient,
    RecipeRelation, RecipeSummary, RecipeView, ShoppingListItem, Tag, User,
};
use crate::error::FoodgramError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .page(page)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page::new(
            models.into_iter().map(user_from_model).collect(),
            count,
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn email_taken(&self, email: &str) -> Result<bool, FoodgramError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("check email taken")?;
        Ok(count > 0)
    }

    async fn username_taken(&self, username: &str) -> Result<bool, FoodgramError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("check username taken")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        let model = users::ActiveModel {
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            avatar: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(user_from_model(model))
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }

    async fn update_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), FoodgramError> {
        users::ActiveModel {
            id: Set(id),
            avatar: Set(avatar.map(str::to_owned)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user avatar")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

async fn users_by_ids(
    db: &DatabaseConnection,
    ids: Vec<i32>,
) -> Result<HashMap<i32, User>, FoodgramError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let models = users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await
        .context("find users by ids")?;
    Ok(models
        .into_iter()
        .map(|m| (m.id, user_from_model(m)))
        .collect())
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn is_subscribed(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let count = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("check subscription")?;
        Ok(count > 0)
    }

    async fn subscribed_among(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> Result<Vec<i32>, FoodgramError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = subscriptions::Entity::find()
            .select_only()
            .column(subscriptions::Column::AuthorId)
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.is_in(author_ids.to_vec()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("list subscribed authors")?;
        Ok(ids)
    }

    async fn add(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let inserted = subscriptions::Entity::insert(subscriptions::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                subscriptions::Column::UserId,
                subscriptions::Column::AuthorId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert subscription")?;
        Ok(inserted > 0)
    }

    async fn remove(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let result = subscriptions::Entity::delete_many()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .context("delete subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError> {
        let count = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count subscriptions")?;
        let author_ids: Vec<i32> = subscriptions::Entity::find()
            .select_only()
            .column(subscriptions::Column::AuthorId)
            .filter(subscriptions::Column::UserId.eq(user_id))
            .order_by_asc(subscriptions::Column::Id)
            .page(page)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("list subscriptions")?;
        let mut authors = users_by_ids(&self.db, author_ids.clone()).await?;
        let items = author_ids
            .into_iter()
            .filter_map(|id| authors.remove(&id))
            .collect();
        Ok(Page::new(items, count))
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError> {
        let found = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.to_vec()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing tag ids")?;
        Ok(found)
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix.filter(|p| !p.is_empty()) {
            query = query.filter(ilike_prefix(ingredients::Column::Name, prefix));
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::MeasurementUnit)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError> {
        let found = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.to_vec()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing ingredient ids")?;
        Ok(found)
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, FoodgramError> {
        let mut query = recipes::Entity::find();
        if !filter.tags.is_empty() {
            query = query.filter(recipes::Column::Id.in_subquery(recipe_ids_with_tags(&filter.tags)));
        }
        if let Some(author_id) = filter.author {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(recipes::Column::Id.in_subquery(
                Query::select()
                    .column(favorites::Column::RecipeId)
                    .from(favorites::Entity)
                    .and_where(favorites::Column::UserId.eq(user_id))
                    .to_owned(),
            ));
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(recipes::Column::Id.in_subquery(
                Query::select()
                    .column(shopping_carts::Column::RecipeId)
                    .from(shopping_carts::Entity)
                    .and_where(shopping_carts::Column::UserId.eq(user_id))
                    .to_owned(),
            ));
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::PublishedAt)
            .order_by_desc(recipes::Column::Id)
            .page(page)
            .all(&self.db)
            .await
            .context("list recipes")?;
        let views = self.hydrate(models, viewer).await?;
        Ok(Page::new(views, count))
    }

    async fn find_by_id(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> Result<Option<RecipeView>, FoodgramError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model], viewer).await?.pop())
    }

    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, FoodgramError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(summary_from_model))
    }

    async fn find_owner(&self, id: i32) -> Result<Option<(i32, String)>, FoodgramError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe owner")?;
        Ok(model.map(|m| (m.author_id, m.image)))
    }

    async fn by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<(Vec<RecipeSummary>, u64), FoodgramError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count author recipes")?;
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::PublishedAt)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&self.db)
            .await
            .context("list author recipes")?;
        Ok((models.into_iter().map(summary_from_model).collect(), count))
    }

    async fn create(&self, author_id: i32, draft: &RecipeDraft) -> Result<i32, FoodgramError> {
        let txn = self.db.begin().await.context("begin transaction")?;
        let recipe = recipes::ActiveModel {
            author_id: Set(author_id),
            name: Set(draft.name.clone()),
            image: Set(draft.image.clone()),
            text: Set(draft.text.clone()),
            cooking_time: Set(draft.cooking_time),
            published_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("insert recipe")?;
        write_recipe_links(&txn, recipe.id, draft).await?;
        txn.commit().await.context("commit transaction")?;
        Ok(recipe.id)
    }

    async fn update(&self, id: i32, draft: &RecipeDraft) -> Result<(), FoodgramError> {
        let txn = self.db.begin().await.context("begin transaction")?;
        recipes::ActiveModel {
            id: Set(id),
            name: Set(draft.name.clone()),
            image: Set(draft.image.clone()),
            text: Set(draft.text.clone()),
            cooking_time: Set(draft.cooking_time),
            ..Default::default()
        }
        .update(&txn)
        .await
        .context("update recipe")?;
        recipe_tags::Entity::delete_many()
            .filter(recipe_tags::Column::RecipeId.eq(id))
            .exec(&txn)
            .await
            .context("clear recipe tags")?;
        recipe_ingredients::Entity::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(id))
            .exec(&txn)
            .await
            .context("clear recipe ingredients")?;
        write_recipe_links(&txn, id, draft).await?;
        txn.commit().await.context("commit transaction")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), FoodgramError> {
        recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(())
    }
}

impl DbRecipeRepository {
    /// Load authors, tags, ingredient lines and the viewer's flags for `models`,
    /// keeping their order.
    async fn hydrate(
        &self,
        models: Vec<recipes::Model>,
        viewer: Option<i32>,
    ) -> Result<Vec<RecipeView>, FoodgramError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let recipe_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let author_ids: Vec<i32> = models
            .iter()
            .map(|m| m.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let authors = users_by_ids(&self.db, author_ids.clone()).await?;

        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        let tag_rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.clone()))
            .find_also_related(tags::Entity)
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("load recipe tags")?;
        for (link, tag) in tag_rows {
            if let Some(tag) = tag {
                tags_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }

        let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        let ingredient_rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.clone()))
            .find_also_related(ingredients::Entity)
            .order_by_asc(recipe_ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("load recipe ingredients")?;
        for (line, ingredient) in ingredient_rows {
            if let Some(ingredient) = ingredient {
                ingredients_by_recipe
                    .entry(line.recipe_id)
                    .or_default()
                    .push(RecipeIngredient {
                        ingredient: ingredient_from_model(ingredient),
                        amount: line.amount,
                    });
            }
        }

        let (favorited, in_cart, subscribed) = match viewer {
            Some(user_id) => {
                let favorited: HashSet<i32> = favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(recipe_ids.clone()))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
                    .context("load favorite flags")?
                    .into_iter()
                    .collect();
                let in_cart: HashSet<i32> = shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.clone()))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
                    .context("load shopping cart flags")?
                    .into_iter()
                    .collect();
                let subscribed: HashSet<i32> = subscriptions::Entity::find()
                    .select_only()
                    .column(subscriptions::Column::AuthorId)
                    .filter(subscriptions::Column::UserId.eq(user_id))
                    .filter(subscriptions::Column::AuthorId.is_in(author_ids))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
                    .context("load subscription flags")?
                    .into_iter()
                    .collect();
                (favorited, in_cart, subscribed)
            }
            None => Default::default(),
        };

        models
            .into_iter()
            .map(|m| -> Result<RecipeView, FoodgramError> {
                let author = authors
                    .get(&m.author_id)
                    .cloned()
                    .with_context(|| format!("author {} of recipe {} missing", m.author_id, m.id))?;
                Ok(RecipeView {
                    author_subscribed: subscribed.contains(&m.author_id),
                    is_favorited: favorited.contains(&m.id),
                    is_in_shopping_cart: in_cart.contains(&m.id),
                    recipe: Recipe {
                        id: m.id,
                        author,
                        tags: tags_by_recipe.remove(&m.id).unwrap_or_default(),
                        ingredients: ingredients_by_recipe.remove(&m.id).unwrap_or_default(),
                        name: m.name,
                        image: m.image,
                        text: m.text,
                        cooking_time: m.cooking_time,
                        published_at: m.published_at,
                    },
                })
            })
            .collect()
    }
}

/// `SELECT recipe_id FROM recipe_tags JOIN tags ... WHERE tags.slug IN (..)`
fn recipe_ids_with_tags(slugs: &[String]) -> SelectStatement {
    Query::select()
        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
        .from(recipe_tags::Entity)
        .inner_join(
            tags::Entity,
            Expr::col((tags::Entity, tags::Column::Id))
                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
        )
        .and_where(Expr::col((tags::Entity, tags::Column::Slug)).is_in(slugs.to_vec()))
        .to_owned()
}

async fn write_recipe_links<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    draft: &RecipeDraft,
) -> Result<(), FoodgramError> {
    if !draft.tag_ids.is_empty() {
        recipe_tags::Entity::insert_many(draft.tag_ids.iter().map(|tag_id| {
            recipe_tags::ActiveModel {
                recipe_id: Set(recipe_id),
                tag_id: Set(*tag_id),
            }
        }))
        .exec_without_returning(db)
        .await
        .context("insert recipe tags")?;
    }
    if !draft.ingredients.is_empty() {
        recipe_ingredients::Entity::insert_many(draft.ingredients.iter().map(|line| {
            recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                amount: Set(line.amount),
                ..Default::default()
            }
        }))
        .exec_without_returning(db)
        .await
        .context("insert recipe ingredients")?;
    }
    Ok(())
}

fn summary_from_model(model: recipes::Model) -> RecipeSummary {
    RecipeSummary {
        id: model.id,
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

// ── Favorites / shopping cart ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRelationRepository {
    pub db: DatabaseConnection,
    pub relation: RecipeRelation,
}

impl RecipeRelationRepository for DbRecipeRelationRepository {
    fn relation(&self) -> RecipeRelation {
        self.relation
    }

    async fn add(&self, user_id: i32, recipe_id: i32) -> Result<bool, FoodgramError> {
        let now = Utc::now();
        let inserted = match self.relation {
            RecipeRelation::Favorite => favorites::Entity::insert(favorites::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(recipe_id),
                created_at: Set(now),
            })
            .on_conflict(
                OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert favorite")?,
            RecipeRelation::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .context("insert shopping cart entry")?
            }
        };
        Ok(inserted > 0)
    }

    async fn remove(&self, user_id: i32, recipe_id: i32) -> Result<bool, FoodgramError> {
        let result = match self.relation {
            RecipeRelation::Favorite => favorites::Entity::delete_many()
                .filter(favorites::Column::UserId.eq(user_id))
                .filter(favorites::Column::RecipeId.eq(recipe_id))
                .exec(&self.db)
                .await
                .context("delete favorite")?,
            RecipeRelation::ShoppingCart => shopping_carts::Entity::delete_many()
                .filter(shopping_carts::Column::UserId.eq(user_id))
                .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
                .exec(&self.db)
                .await
                .context("delete shopping cart entry")?,
        };
        Ok(result.rows_affected > 0)
    }
}

// ── Shopping list ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingListRepository {
    pub db: DatabaseConnection,
}

impl ShoppingListRepository for DbShoppingListRepository {
    async fn items(&self, user_id: i32) -> Result<Vec<ShoppingListItem>, FoodgramError> {
        #[derive(Debug, FromQueryResult)]
        struct ItemRow {
            name: String,
            measurement_unit: String,
            amount: i64,
        }

        let rows = ItemRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT i.name, i.measurement_unit, SUM(ri.amount)::BIGINT AS amount
                FROM recipe_ingredients ri
                JOIN ingredients i ON i.id = ri.ingredient_id
                JOIN shopping_carts sc ON sc.recipe_id = ri.recipe_id
                WHERE sc.user_id = $1
                GROUP BY i.name, i.measurement_unit
                ORDER BY i.name, i.measurement_unit
            "#,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("aggregate shopping list")?;

        Ok(rows
            .into_iter()
            .map(|row| ShoppingListItem {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }

    async fn recipes(&self, user_id: i32) -> Result<Vec<CartRecipe>, FoodgramError> {
        #[derive(Debug, FromQueryResult)]
        struct CartRow {
            name: String,
            author: String,
        }

        let rows = CartRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT r.name, u.username AS author
                FROM shopping_carts sc
                JOIN recipes r ON r.id = sc.recipe_id
                JOIN users u ON u.id = r.author_id
                WHERE sc.user_id = $1
                ORDER BY r.name
            "#,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("list shopping cart recipes")?;

        Ok(rows
            .into_iter()
            .map(|row| CartRecipe {
                name: row.name,
                author: row.author,
            })
            .collect())
    }
}
