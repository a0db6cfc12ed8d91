use foodgram_api::domain::types::{IngredientAmount, Tag};
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase, RecipeInput,
    RecipePatch, RecipeQuery, UpdateRecipeUseCase,
};
use foodgram_domain::pagination::PageRequest;
use foodgram_testing::image::png_data_uri;

use crate::helpers::MemoryDb;

type Create = CreateRecipeUseCase<MemoryDb, MemoryDb, MemoryDb, MemoryDb, MemoryDb>;
type Update = UpdateRecipeUseCase<MemoryDb, MemoryDb, MemoryDb, MemoryDb>;

fn create_uc(db: &MemoryDb) -> Create {
    CreateRecipeUseCase {
        users: db.clone(),
        recipes: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
        images: db.clone(),
    }
}

fn update_uc(db: &MemoryDb) -> Update {
    UpdateRecipeUseCase {
        recipes: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
        images: db.clone(),
    }
}

fn line(ingredient_id: i32, amount: i32) -> IngredientAmount {
    IngredientAmount {
        ingredient_id,
        amount,
    }
}

struct Kitchen {
    db: MemoryDb,
    breakfast: Tag,
    dinner: Tag,
    eggs: i32,
    milk: i32,
}

fn kitchen() -> Kitchen {
    let db = MemoryDb::new();
    let breakfast = db.seed_tag("Breakfast", "breakfast");
    let dinner = db.seed_tag("Dinner", "dinner");
    let eggs = db.seed_ingredient("eggs", "pcs").id;
    let milk = db.seed_ingredient("milk", "ml").id;
    Kitchen {
        db,
        breakfast,
        dinner,
        eggs,
        milk,
    }
}

fn omelette(k: &Kitchen) -> RecipeInput {
    RecipeInput {
        name: "Omelette".to_owned(),
        image: png_data_uri(),
        text: "Whisk and fry.".to_owned(),
        cooking_time: 10,
        tags: vec![k.breakfast.id],
        ingredients: vec![line(k.eggs, 3), line(k.milk, 50)],
    }
}

fn assert_field(result: Result<impl std::fmt::Debug, FoodgramError>, field: &str) -> String {
    match result {
        Err(e @ FoodgramError::Validation { .. }) => {
            assert_eq!(e.field(), Some(field));
            e.to_string()
        }
        other => panic!("expected validation error on {field}, got {other:?}"),
    }
}

// ── CreateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_with_tags_and_ingredients() {
    let k = kitchen();
    let author = k.db.seed_user("chef");

    let view = create_uc(&k.db)
        .execute(author.id, omelette(&k))
        .await
        .unwrap();

    let recipe = view.recipe;
    assert_eq!(recipe.name, "Omelette");
    assert_eq!(recipe.author.id, author.id);
    assert_eq!(recipe.tags, vec![k.breakfast.clone()]);
    let amounts: Vec<(&str, i32)> = recipe
        .ingredients
        .iter()
        .map(|l| (l.ingredient.name.as_str(), l.amount))
        .collect();
    assert_eq!(amounts, vec![("eggs", 3), ("milk", 50)]);
    assert!(recipe.image.starts_with("recipes/"));
    assert!(!view.is_favorited);
    assert!(!view.is_in_shopping_cart);
}

#[tokio::test]
async fn should_name_duplicate_tags() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let mut input = omelette(&k);
    input.tags = vec![k.breakfast.id, k.dinner.id, k.breakfast.id];

    let message = assert_field(create_uc(&k.db).execute(author.id, input).await, "tags");
    assert!(message.contains(&k.breakfast.id.to_string()));
}

#[tokio::test]
async fn should_name_duplicate_ingredients() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let mut input = omelette(&k);
    input.ingredients = vec![line(k.eggs, 1), line(k.eggs, 2)];

    let message = assert_field(
        create_uc(&k.db).execute(author.id, input).await,
        "ingredients",
    );
    assert!(message.contains(&k.eggs.to_string()));
}

#[tokio::test]
async fn should_reject_empty_tags_and_ingredients() {
    let k = kitchen();
    let author = k.db.seed_user("chef");

    let mut input = omelette(&k);
    input.tags.clear();
    assert_field(create_uc(&k.db).execute(author.id, input).await, "tags");

    let mut input = omelette(&k);
    input.ingredients.clear();
    assert_field(
        create_uc(&k.db).execute(author.id, input).await,
        "ingredients",
    );
}

#[tokio::test]
async fn should_reject_unknown_tag_and_ingredient() {
    let k = kitchen();
    let author = k.db.seed_user("chef");

    let mut input = omelette(&k);
    input.tags = vec![9999];
    assert_field(create_uc(&k.db).execute(author.id, input).await, "tags");

    let mut input = omelette(&k);
    input.ingredients = vec![line(9999, 1)];
    assert_field(
        create_uc(&k.db).execute(author.id, input).await,
        "ingredients",
    );
}

#[tokio::test]
async fn should_reject_non_positive_amount_and_cooking_time() {
    let k = kitchen();
    let author = k.db.seed_user("chef");

    let mut input = omelette(&k);
    input.ingredients = vec![line(k.eggs, 0)];
    assert_field(
        create_uc(&k.db).execute(author.id, input).await,
        "ingredients",
    );

    let mut input = omelette(&k);
    input.cooking_time = 0;
    assert_field(
        create_uc(&k.db).execute(author.id, input).await,
        "cooking_time",
    );
}

#[tokio::test]
async fn should_not_store_image_when_validation_fails() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let mut input = omelette(&k);
    input.tags.clear();

    let _ = create_uc(&k.db).execute(author.id, input).await;

    assert!(k.db.images().is_empty());
    assert_eq!(k.db.recipe_count(), 0);
}

#[tokio::test]
async fn should_treat_unknown_author_as_unauthorized() {
    let k = kitchen();

    let result = create_uc(&k.db).execute(4242, omelette(&k)).await;

    assert!(matches!(result, Err(FoodgramError::Unauthorized)));
    assert!(k.db.images().is_empty());
    assert_eq!(k.db.recipe_count(), 0);
}

// ── UpdateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_update_by_non_author() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let stranger = k.db.seed_user("stranger");
    let id = k.db.seed_recipe(&author, "Soup", &[&k.dinner]);

    let result = update_uc(&k.db)
        .execute(
            stranger.id,
            id,
            RecipePatch {
                tags: Some(vec![k.dinner.id]),
                ingredients: Some(vec![line(k.eggs, 1)]),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(FoodgramError::Forbidden)));
}

#[tokio::test]
async fn should_require_tags_and_ingredients_on_update() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let id = k.db.seed_recipe(&author, "Soup", &[&k.dinner]);

    let result = update_uc(&k.db)
        .execute(
            author.id,
            id,
            RecipePatch {
                name: Some("Better soup".to_owned()),
                ingredients: Some(vec![line(k.eggs, 1)]),
                ..Default::default()
            },
        )
        .await;
    assert_field(result, "tags");

    let result = update_uc(&k.db)
        .execute(
            author.id,
            id,
            RecipePatch {
                tags: Some(vec![k.dinner.id]),
                ..Default::default()
            },
        )
        .await;
    assert_field(result, "ingredients");
}

#[tokio::test]
async fn should_keep_omitted_fields_and_replace_links() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let id = k.db.seed_recipe(&author, "Soup", &[&k.dinner]);

    let view = update_uc(&k.db)
        .execute(
            author.id,
            id,
            RecipePatch {
                cooking_time: Some(45),
                tags: Some(vec![k.breakfast.id]),
                ingredients: Some(vec![line(k.milk, 200)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let recipe = view.recipe;
    assert_eq!(recipe.name, "Soup");
    assert_eq!(recipe.text, "Mix and serve.");
    assert_eq!(recipe.cooking_time, 45);
    assert_eq!(recipe.tags, vec![k.breakfast.clone()]);
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].ingredient.id, k.milk);
    assert_eq!(recipe.ingredients[0].amount, 200);
}

#[tokio::test]
async fn should_swap_image_on_update() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let id = k.db.seed_recipe(&author, "Soup", &[&k.dinner]);
    let old_image = k.db.images()[0].clone();

    let view = update_uc(&k.db)
        .execute(
            author.id,
            id,
            RecipePatch {
                image: Some(png_data_uri()),
                tags: Some(vec![k.dinner.id]),
                ingredients: Some(vec![line(k.eggs, 2)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(view.recipe.image, old_image);
    assert_eq!(k.db.images(), vec![view.recipe.image]);
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_recipe() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let result = update_uc(&k.db)
        .execute(author.id, 12345, RecipePatch::default())
        .await;
    assert!(matches!(result, Err(FoodgramError::RecipeNotFound)));
}

// ── DeleteRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_recipe_and_its_image() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let stranger = k.db.seed_user("stranger");
    let id = k.db.seed_recipe(&author, "Soup", &[]);
    let uc = DeleteRecipeUseCase {
        recipes: k.db.clone(),
        images: k.db.clone(),
    };

    let result = uc.execute(stranger.id, id).await;
    assert!(matches!(result, Err(FoodgramError::Forbidden)));

    uc.execute(author.id, id).await.unwrap();
    assert_eq!(k.db.recipe_count(), 0);
    assert!(k.db.images().is_empty());

    let result = GetRecipeUseCase {
        repo: k.db.clone(),
    }
    .execute(None, id)
    .await;
    assert!(matches!(result, Err(FoodgramError::RecipeNotFound)));
}

#[tokio::test]
async fn should_delete_recipe_even_if_image_removal_fails() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let id = k.db.seed_recipe(&author, "Soup", &[]);
    k.db.fail_image_deletes();

    DeleteRecipeUseCase {
        recipes: k.db.clone(),
        images: k.db.clone(),
    }
    .execute(author.id, id)
    .await
    .unwrap();

    assert_eq!(k.db.recipe_count(), 0);
    assert_eq!(k.db.images().len(), 1);
}

#[tokio::test]
async fn should_keep_update_when_old_image_removal_fails() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let id = k.db.seed_recipe(&author, "Soup", &[&k.dinner]);
    k.db.fail_image_deletes();

    let view = update_uc(&k.db)
        .execute(
            author.id,
            id,
            RecipePatch {
                image: Some(png_data_uri()),
                tags: Some(vec![k.dinner.id]),
                ingredients: Some(vec![line(k.eggs, 2)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(k.db.images().contains(&view.recipe.image));
    assert_eq!(k.db.images().len(), 2);
}

// ── ListRecipesUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_newest_first_filtered_by_any_tag() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    let lunch = k.db.seed_tag("Lunch", "lunch");
    k.db.seed_recipe(&author, "Porridge", &[&k.breakfast]);
    k.db.seed_recipe(&author, "Sandwich", &[&lunch]);
    k.db.seed_recipe(&author, "Steak", &[&k.dinner]);
    let uc = ListRecipesUseCase { repo: k.db.clone() };

    let page = uc
        .execute(
            None,
            RecipeQuery {
                tags: vec!["breakfast".to_owned(), "dinner".to_owned()],
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.count, 2);
    let names: Vec<&str> = page.items.iter().map(|v| v.recipe.name.as_str()).collect();
    assert_eq!(names, vec!["Steak", "Porridge"]);
}

#[tokio::test]
async fn should_return_empty_page_for_anonymous_flag_filters() {
    let k = kitchen();
    let author = k.db.seed_user("chef");
    k.db.seed_recipe(&author, "Porridge", &[&k.breakfast]);
    let uc = ListRecipesUseCase { repo: k.db.clone() };

    let page = uc
        .execute(
            None,
            RecipeQuery {
                is_favorited: true,
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.count, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn should_filter_by_author() {
    let k = kitchen();
    let alice = k.db.seed_user("alice");
    let bob = k.db.seed_user("bob");
    k.db.seed_recipe(&alice, "Pie", &[]);
    k.db.seed_recipe(&bob, "Cake", &[]);
    let uc = ListRecipesUseCase { repo: k.db.clone() };

    let page = uc
        .execute(
            None,
            RecipeQuery {
                author: Some(bob.id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].recipe.name, "Cake");
}
