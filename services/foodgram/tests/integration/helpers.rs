use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use foodgram_api::domain::password::hash_password;
use foodgram_api::domain::repository::{
    ImageStore, IngredientRepository, RecipeRelationRepository, RecipeRepository,
    ShoppingListRepository, SubscriptionRepository, TagRepository, UserRepository,
};
use foodgram_api::domain::types::{
    CartRecipe, ImageUpload, Ingredient, IngredientAmount, MediaFolder, NewUser, Recipe,
    RecipeDraft, RecipeFilter, RecipeIngredient, RecipeRelation, RecipeSummary, RecipeView,
    ShoppingListItem, Tag, User,
};
use foodgram_api::error::FoodgramError;
use foodgram_domain::pagination::{Page, PageRequest};

pub const TEST_PASSWORD: &str = "s3cret-sauce";

// ── In-memory tables ─────────────────────────────────────────────────────────

pub struct StoredRecipe {
    pub id: i32,
    pub author_id: i32,
    pub draft: RecipeDraft,
    pub published_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    /// `(user_id, author_id)` in subscription order.
    pub subscriptions: Vec<(i32, i32)>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<StoredRecipe>,
    pub favorites: Vec<(i32, i32)>,
    pub carts: Vec<(i32, i32)>,
    /// Paths currently held by the image store.
    pub images: Vec<String>,
    pub next_id: i32,
    /// Make `update_avatar` fail.
    pub fail_user_writes: bool,
    /// Make `ImageStore::delete` fail.
    pub fail_image_deletes: bool,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn relation(&mut self, relation: RecipeRelation) -> &mut Vec<(i32, i32)> {
        match relation {
            RecipeRelation::Favorite => &mut self.favorites,
            RecipeRelation::ShoppingCart => &mut self.carts,
        }
    }

    fn view(&self, stored: &StoredRecipe, viewer: Option<i32>) -> RecipeView {
        let author = self
            .users
            .iter()
            .find(|u| u.id == stored.author_id)
            .cloned()
            .unwrap();
        let mut tags: Vec<Tag> = self
            .tags
            .iter()
            .filter(|t| stored.draft.tag_ids.contains(&t.id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        let ingredients = stored
            .draft
            .ingredients
            .iter()
            .map(|line| RecipeIngredient {
                ingredient: self
                    .ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .cloned()
                    .unwrap(),
                amount: line.amount,
            })
            .collect();
        let flag = |rows: &Vec<(i32, i32)>, target: i32| {
            viewer.is_some_and(|v| rows.contains(&(v, target)))
        };
        RecipeView {
            author_subscribed: flag(&self.subscriptions, stored.author_id),
            is_favorited: flag(&self.favorites, stored.id),
            is_in_shopping_cart: flag(&self.carts, stored.id),
            recipe: Recipe {
                id: stored.id,
                author,
                name: stored.draft.name.clone(),
                image: stored.draft.image.clone(),
                text: stored.draft.text.clone(),
                cooking_time: stored.draft.cooking_time,
                tags,
                ingredients,
                published_at: stored.published_at,
            },
        }
    }
}

/// Shared in-memory database implementing every repository port.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub tables: Arc<Mutex<Tables>>,
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let count = items.len() as u64;
    let page = page.clamped();
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    Page::new(items, count)
}

// ── Seeding ──────────────────────────────────────────────────────────────────

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relation(&self, relation: RecipeRelation) -> MemoryRelations {
        MemoryRelations {
            db: self.clone(),
            relation,
        }
    }

    pub fn seed_user(&self, username: &str) -> User {
        let mut t = self.tables.lock().unwrap();
        let user = User {
            id: t.next_id(),
            email: format!("{username}@example.org"),
            username: username.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "Cook".to_owned(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            avatar: None,
            created_at: Utc::now(),
        };
        t.users.push(user.clone());
        user
    }

    pub fn seed_tag(&self, name: &str, slug: &str) -> Tag {
        let mut t = self.tables.lock().unwrap();
        let tag = Tag {
            id: t.next_id(),
            name: name.to_owned(),
            slug: slug.to_owned(),
        };
        t.tags.push(tag.clone());
        tag
    }

    pub fn seed_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut t = self.tables.lock().unwrap();
        let ingredient = Ingredient {
            id: t.next_id(),
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        };
        t.ingredients.push(ingredient.clone());
        ingredient
    }

    /// Insert a recipe directly; later seeds are newer. Uses the first seeded
    /// ingredient, if any, with amount 1.
    pub fn seed_recipe(&self, author: &User, name: &str, tags: &[&Tag]) -> i32 {
        let lines: Vec<(i32, i32)> = self
            .tables
            .lock()
            .unwrap()
            .ingredients
            .iter()
            .take(1)
            .map(|i| (i.id, 1))
            .collect();
        self.seed_recipe_with(author, name, tags, &lines)
    }

    /// Insert a recipe with explicit `(ingredient id, amount)` lines.
    pub fn seed_recipe_with(
        &self,
        author: &User,
        name: &str,
        tags: &[&Tag],
        lines: &[(i32, i32)],
    ) -> i32 {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let image = format!("recipes/seed-{id}.png");
        t.images.push(image.clone());
        t.recipes.push(StoredRecipe {
            id,
            author_id: author.id,
            draft: RecipeDraft {
                name: name.to_owned(),
                image,
                text: "Mix and serve.".to_owned(),
                cooking_time: 10,
                tag_ids: tags.iter().map(|t| t.id).collect(),
                ingredients: lines
                    .iter()
                    .map(|&(ingredient_id, amount)| IngredientAmount {
                        ingredient_id,
                        amount,
                    })
                    .collect(),
            },
            published_at: Utc::now() + Duration::seconds(i64::from(id)),
        });
        id
    }

    pub fn add_to_cart(&self, user_id: i32, recipe_id: i32) {
        self.tables.lock().unwrap().carts.push((user_id, recipe_id));
    }

    pub fn fail_user_writes(&self) {
        self.tables.lock().unwrap().fail_user_writes = true;
    }

    pub fn fail_image_deletes(&self) {
        self.tables.lock().unwrap().fail_image_deletes = true;
    }

    pub fn subscribe(&self, user_id: i32, author_id: i32) {
        self.tables
            .lock()
            .unwrap()
            .subscriptions
            .push((user_id, author_id));
    }

    pub fn user(&self, id: i32) -> User {
        let t = self.tables.lock().unwrap();
        t.users.iter().find(|u| u.id == id).cloned().unwrap()
    }

    pub fn images(&self) -> Vec<String> {
        self.tables.lock().unwrap().images.clone()
    }

    pub fn recipe_count(&self) -> usize {
        self.tables.lock().unwrap().recipes.len()
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

impl UserRepository for MemoryDb {
    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError> {
        let users = self.tables.lock().unwrap().users.clone();
        Ok(paginate(users, page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn email_taken(&self, email: &str) -> Result<bool, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().any(|u| u.email == email))
    }

    async fn username_taken(&self, username: &str) -> Result<bool, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().any(|u| u.username == username))
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        let created = User {
            id: t.next_id(),
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password_hash: user.password_hash.clone(),
            avatar: None,
            created_at: Utc::now(),
        };
        t.users.push(created.clone());
        Ok(created)
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == id) {
            u.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn update_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        if t.fail_user_writes {
            return Err(anyhow::anyhow!("database unavailable").into());
        }
        if let Some(u) = t.users.iter_mut().find(|u| u.id == id) {
            u.avatar = avatar.map(str::to_owned);
        }
        Ok(())
    }
}

// ── Subscriptions ────────────────────────────────────────────────────────────

impl SubscriptionRepository for MemoryDb {
    async fn is_subscribed(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.subscriptions.contains(&(user_id, author_id)))
    }

    async fn subscribed_among(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> Result<Vec<i32>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.subscriptions
            .iter()
            .filter(|(u, a)| *u == user_id && author_ids.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }

    async fn add(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        if t.subscriptions.contains(&(user_id, author_id)) {
            return Ok(false);
        }
        t.subscriptions.push((user_id, author_id));
        Ok(true)
    }

    async fn remove(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.subscriptions.len();
        t.subscriptions.retain(|row| *row != (user_id, author_id));
        Ok(t.subscriptions.len() < before)
    }

    async fn list_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        let authors: Vec<User> = t
            .subscriptions
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, a)| t.users.iter().find(|u| u.id == *a).cloned())
            .collect();
        Ok(paginate(authors, page))
    }
}

// ── Tags / ingredients ───────────────────────────────────────────────────────

impl TagRepository for MemoryDb {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError> {
        let mut tags = self.tables.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.tags.iter().find(|tag| tag.id == id).cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.tags
            .iter()
            .map(|tag| tag.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

impl IngredientRepository for MemoryDb {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = t
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.ingredients
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

impl RecipeRepository for MemoryDb {
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        let mut matching: Vec<&StoredRecipe> = t
            .recipes
            .iter()
            .filter(|r| {
                filter.tags.is_empty()
                    || t.tags.iter().any(|tag| {
                        r.draft.tag_ids.contains(&tag.id) && filter.tags.contains(&tag.slug)
                    })
            })
            .filter(|r| filter.author.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| t.favorites.contains(&(u, r.id)))
            })
            .filter(|r| filter.in_cart_of.is_none_or(|u| t.carts.contains(&(u, r.id))))
            .collect();
        matching.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        let views = matching.into_iter().map(|r| t.view(r, viewer)).collect();
        Ok(paginate(views, page))
    }

    async fn find_by_id(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> Result<Option<RecipeView>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| t.view(r, viewer)))
    }

    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.recipes.iter().find(|r| r.id == id).map(|r| RecipeSummary {
            id: r.id,
            name: r.draft.name.clone(),
            image: r.draft.image.clone(),
            cooking_time: r.draft.cooking_time,
        }))
    }

    async fn find_owner(&self, id: i32) -> Result<Option<(i32, String)>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        Ok(t.recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| (r.author_id, r.draft.image.clone())))
    }

    async fn by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<(Vec<RecipeSummary>, u64), FoodgramError> {
        let t = self.tables.lock().unwrap();
        let mut own: Vec<&StoredRecipe> =
            t.recipes.iter().filter(|r| r.author_id == author_id).collect();
        own.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        let count = own.len() as u64;
        let take = limit.map_or(own.len(), |l| l as usize);
        let summaries = own
            .into_iter()
            .take(take)
            .map(|r| RecipeSummary {
                id: r.id,
                name: r.draft.name.clone(),
                image: r.draft.image.clone(),
                cooking_time: r.draft.cooking_time,
            })
            .collect();
        Ok((summaries, count))
    }

    async fn create(&self, author_id: i32, draft: &RecipeDraft) -> Result<i32, FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.recipes.push(StoredRecipe {
            id,
            author_id,
            draft: draft.clone(),
            published_at: Utc::now() + Duration::seconds(i64::from(id)),
        });
        Ok(id)
    }

    async fn update(&self, id: i32, draft: &RecipeDraft) -> Result<(), FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(r) = t.recipes.iter_mut().find(|r| r.id == id) {
            r.draft = draft.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        t.recipes.retain(|r| r.id != id);
        t.favorites.retain(|(_, r)| *r != id);
        t.carts.retain(|(_, r)| *r != id);
        Ok(())
    }
}

// ── Favorites / shopping cart ────────────────────────────────────────────────

pub struct MemoryRelations {
    pub db: MemoryDb,
    pub relation: RecipeRelation,
}

impl RecipeRelationRepository for MemoryRelations {
    fn relation(&self) -> RecipeRelation {
        self.relation
    }

    async fn add(&self, user_id: i32, recipe_id: i32) -> Result<bool, FoodgramError> {
        let mut t = self.db.tables.lock().unwrap();
        let rows = t.relation(self.relation);
        if rows.contains(&(user_id, recipe_id)) {
            return Ok(false);
        }
        rows.push((user_id, recipe_id));
        Ok(true)
    }

    async fn remove(&self, user_id: i32, recipe_id: i32) -> Result<bool, FoodgramError> {
        let mut t = self.db.tables.lock().unwrap();
        let rows = t.relation(self.relation);
        let before = rows.len();
        rows.retain(|row| *row != (user_id, recipe_id));
        Ok(rows.len() < before)
    }
}

// ── Shopping list ────────────────────────────────────────────────────────────

impl ShoppingListRepository for MemoryDb {
    async fn items(&self, user_id: i32) -> Result<Vec<ShoppingListItem>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        let mut sums: BTreeMap<(String, String), i64> = BTreeMap::new();
        let in_cart = t
            .recipes
            .iter()
            .filter(|r| t.carts.contains(&(user_id, r.id)));
        for recipe in in_cart {
            for line in &recipe.draft.ingredients {
                let ingredient = t
                    .ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .unwrap();
                *sums
                    .entry((ingredient.name.clone(), ingredient.measurement_unit.clone()))
                    .or_default() += i64::from(line.amount);
            }
        }
        Ok(sums
            .into_iter()
            .map(|((name, measurement_unit), amount)| ShoppingListItem {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }

    async fn recipes(&self, user_id: i32) -> Result<Vec<CartRecipe>, FoodgramError> {
        let t = self.tables.lock().unwrap();
        let mut found: Vec<CartRecipe> = t
            .recipes
            .iter()
            .filter(|r| t.carts.contains(&(user_id, r.id)))
            .map(|r| CartRecipe {
                name: r.draft.name.clone(),
                author: t
                    .users
                    .iter()
                    .find(|u| u.id == r.author_id)
                    .map(|u| u.username.clone())
                    .unwrap(),
            })
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

// ── Images ───────────────────────────────────────────────────────────────────

impl ImageStore for MemoryDb {
    async fn save(
        &self,
        folder: MediaFolder,
        image: &ImageUpload,
    ) -> Result<String, FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        let path = format!("{}/upload-{}.{}", folder.as_str(), t.next_id(), image.extension);
        t.images.push(path.clone());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> Result<(), FoodgramError> {
        let mut t = self.tables.lock().unwrap();
        if t.fail_image_deletes {
            return Err(anyhow::anyhow!("media volume is read-only").into());
        }
        t.images.retain(|p| p != path);
        Ok(())
    }
}
