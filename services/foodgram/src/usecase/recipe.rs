use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::image::parse_data_uri;
use crate::domain::repository::{
    ImageStore, IngredientRepository, RecipeRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    ImageUpload, IngredientAmount, MediaFolder, RecipeDraft, RecipeFilter, RecipeView,
};
use crate::domain::validation::{AMOUNT_MIN, COOKING_TIME_MIN, RECIPE_NAME_MAX_LEN, find_duplicates};
use crate::error::FoodgramError;
use crate::usecase::{discard_image, require_caller};

/// Recipe list query as sent by clients.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub tags: Vec<String>,
    pub author: Option<i32>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

pub struct RecipeInput {
    pub name: String,
    /// Base64 image data URI.
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Partial update. `tags` and `ingredients` must still be sent.
#[derive(Default)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmount>>,
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_fields(name: &str, text: &str, cooking_time: i32) -> Result<(), FoodgramError> {
    if name.trim().is_empty() {
        return Err(FoodgramError::invalid("name", "name must not be empty"));
    }
    if name.chars().count() > RECIPE_NAME_MAX_LEN {
        return Err(FoodgramError::invalid(
            "name",
            format!("name must be at most {RECIPE_NAME_MAX_LEN} characters"),
        ));
    }
    if text.trim().is_empty() {
        return Err(FoodgramError::invalid("text", "text must not be empty"));
    }
    if cooking_time < COOKING_TIME_MIN {
        return Err(FoodgramError::invalid(
            "cooking_time",
            format!("cooking time must be at least {COOKING_TIME_MIN}"),
        ));
    }
    Ok(())
}

fn parse_image(image: &str) -> Result<ImageUpload, FoodgramError> {
    parse_data_uri(image).ok_or_else(|| FoodgramError::invalid("image", "upload a valid base64 image"))
}

/// Tag and ingredient checks shared by create and update.
async fn check_links<T: TagRepository, G: IngredientRepository>(
    tags: &T,
    ingredients: &G,
    tag_ids: &[i32],
    lines: &[IngredientAmount],
) -> Result<(), FoodgramError> {
    if tag_ids.is_empty() {
        return Err(FoodgramError::invalid("tags", "at least one tag is required"));
    }
    let duplicates = find_duplicates(tag_ids);
    if !duplicates.is_empty() {
        return Err(FoodgramError::invalid(
            "tags",
            format!("duplicate tags: {}", join_ids(&duplicates)),
        ));
    }
    if lines.is_empty() {
        return Err(FoodgramError::invalid(
            "ingredients",
            "at least one ingredient is required",
        ));
    }
    let ingredient_ids: Vec<i32> = lines.iter().map(|l| l.ingredient_id).collect();
    let duplicates = find_duplicates(&ingredient_ids);
    if !duplicates.is_empty() {
        return Err(FoodgramError::invalid(
            "ingredients",
            format!("duplicate ingredients: {}", join_ids(&duplicates)),
        ));
    }
    if lines.iter().any(|l| l.amount < AMOUNT_MIN) {
        return Err(FoodgramError::invalid(
            "ingredients",
            format!("amount must be at least {AMOUNT_MIN}"),
        ));
    }

    let existing = tags.existing_ids(tag_ids).await?;
    let missing: Vec<i32> = tag_ids
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();
    if !missing.is_empty() {
        return Err(FoodgramError::invalid(
            "tags",
            format!("unknown tags: {}", join_ids(&missing)),
        ));
    }
    let existing = ingredients.existing_ids(&ingredient_ids).await?;
    let missing: Vec<i32> = ingredient_ids
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();
    if !missing.is_empty() {
        return Err(FoodgramError::invalid(
            "ingredients",
            format!("unknown ingredients: {}", join_ids(&missing)),
        ));
    }
    Ok(())
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        query: RecipeQuery,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, FoodgramError> {
        if viewer.is_none() && (query.is_favorited || query.is_in_shopping_cart) {
            return Ok(Page::empty());
        }
        let filter = RecipeFilter {
            tags: query.tags,
            author: query.author,
            favorited_by: viewer.filter(|_| query.is_favorited),
            in_cart_of: viewer.filter(|_| query.is_in_shopping_cart),
        };
        self.repo.list(&filter, viewer, page).await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(&self, viewer: Option<i32>, id: i32) -> Result<RecipeView, FoodgramError> {
        self.repo
            .find_by_id(id, viewer)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<U, R, T, G, I>
where
    U: UserRepository,
    R: RecipeRepository,
    T: TagRepository,
    G: IngredientRepository,
    I: ImageStore,
{
    pub users: U,
    pub recipes: R,
    pub tags: T,
    pub ingredients: G,
    pub images: I,
}

impl<U, R, T, G, I> CreateRecipeUseCase<U, R, T, G, I>
where
    U: UserRepository,
    R: RecipeRepository,
    T: TagRepository,
    G: IngredientRepository,
    I: ImageStore,
{
    pub async fn execute(
        &self,
        author_id: i32,
        input: RecipeInput,
    ) -> Result<RecipeView, FoodgramError> {
        require_caller(&self.users, author_id).await?;
        check_fields(&input.name, &input.text, input.cooking_time)?;
        check_links(&self.tags, &self.ingredients, &input.tags, &input.ingredients).await?;
        let upload = parse_image(&input.image)?;

        let image = self.images.save(MediaFolder::Recipes, &upload).await?;
        let draft = RecipeDraft {
            name: input.name.trim().to_owned(),
            image,
            text: input.text,
            cooking_time: input.cooking_time,
            tag_ids: input.tags,
            ingredients: input.ingredients,
        };
        let id = match self.recipes.create(author_id, &draft).await {
            Ok(id) => id,
            Err(e) => {
                discard_image(&self.images, &draft.image).await;
                return Err(e);
            }
        };
        tracing::info!(recipe_id = id, author_id, "recipe created");

        self.recipes
            .find_by_id(id, Some(author_id))
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R, T, G, I>
where
    R: RecipeRepository,
    T: TagRepository,
    G: IngredientRepository,
    I: ImageStore,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: G,
    pub images: I,
}

impl<R, T, G, I> UpdateRecipeUseCase<R, T, G, I>
where
    R: RecipeRepository,
    T: TagRepository,
    G: IngredientRepository,
    I: ImageStore,
{
    pub async fn execute(
        &self,
        user_id: i32,
        recipe_id: i32,
        patch: RecipePatch,
    ) -> Result<RecipeView, FoodgramError> {
        let current = self
            .recipes
            .find_by_id(recipe_id, Some(user_id))
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?
            .recipe;
        if current.author.id != user_id {
            return Err(FoodgramError::Forbidden);
        }

        let tag_ids = patch
            .tags
            .ok_or_else(|| FoodgramError::invalid("tags", "this field is required"))?;
        let lines = patch
            .ingredients
            .ok_or_else(|| FoodgramError::invalid("ingredients", "this field is required"))?;
        let name = patch.name.map_or(current.name, |n| n.trim().to_owned());
        let text = patch.text.unwrap_or(current.text);
        let cooking_time = patch.cooking_time.unwrap_or(current.cooking_time);
        check_fields(&name, &text, cooking_time)?;
        check_links(&self.tags, &self.ingredients, &tag_ids, &lines).await?;
        let upload = patch.image.as_deref().map(parse_image).transpose()?;

        let image = match &upload {
            Some(upload) => self.images.save(MediaFolder::Recipes, upload).await?,
            None => current.image.clone(),
        };
        let draft = RecipeDraft {
            name,
            image,
            text,
            cooking_time,
            tag_ids,
            ingredients: lines,
        };
        if let Err(e) = self.recipes.update(recipe_id, &draft).await {
            if upload.is_some() {
                discard_image(&self.images, &draft.image).await;
            }
            return Err(e);
        }
        if upload.is_some() {
            discard_image(&self.images, &current.image).await;
        }

        self.recipes
            .find_by_id(recipe_id, Some(user_id))
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, I: ImageStore> {
    pub recipes: R,
    pub images: I,
}

impl<R: RecipeRepository, I: ImageStore> DeleteRecipeUseCase<R, I> {
    pub async fn execute(&self, user_id: i32, recipe_id: i32) -> Result<(), FoodgramError> {
        let (author_id, image) = self
            .recipes
            .find_owner(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if author_id != user_id {
            return Err(FoodgramError::Forbidden);
        }
        self.recipes.delete(recipe_id).await?;
        discard_image(&self.images, &image).await;
        tracing::info!(recipe_id, user_id, "recipe deleted");
        Ok(())
    }
}
