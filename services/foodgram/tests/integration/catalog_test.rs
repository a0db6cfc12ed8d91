use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::ingredient::{GetIngredientUseCase, ListIngredientsUseCase};
use foodgram_api::usecase::tag::{GetTagUseCase, ListTagsUseCase};

use crate::helpers::MemoryDb;

#[tokio::test]
async fn should_list_tags_by_name() {
    let db = MemoryDb::new();
    db.seed_tag("Lunch", "lunch");
    db.seed_tag("Breakfast", "breakfast");

    let tags = ListTagsUseCase { repo: db.clone() }.execute().await.unwrap();

    let slugs: Vec<&str> = tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["breakfast", "lunch"]);
}

#[tokio::test]
async fn should_return_tag_not_found() {
    let result = GetTagUseCase {
        repo: MemoryDb::new(),
    }
    .execute(3)
    .await;
    assert!(matches!(result, Err(FoodgramError::TagNotFound)));
}

#[tokio::test]
async fn should_filter_ingredients_by_prefix_ignoring_case() {
    let db = MemoryDb::new();
    db.seed_ingredient("sugar", "g");
    db.seed_ingredient("salt", "g");
    db.seed_ingredient("Sunflower oil", "ml");
    let uc = ListIngredientsUseCase { repo: db.clone() };

    let found = uc.execute(Some("SU")).await.unwrap();
    let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Sunflower oil", "sugar"]);
}

#[tokio::test]
async fn should_treat_blank_name_as_no_filter() {
    let db = MemoryDb::new();
    db.seed_ingredient("sugar", "g");
    db.seed_ingredient("salt", "g");
    let uc = ListIngredientsUseCase { repo: db.clone() };

    assert_eq!(uc.execute(Some("  ")).await.unwrap().len(), 2);
    assert_eq!(uc.execute(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_get_ingredient_or_not_found() {
    let db = MemoryDb::new();
    let sugar = db.seed_ingredient("sugar", "g");
    let uc = GetIngredientUseCase { repo: db.clone() };

    assert_eq!(uc.execute(sugar.id).await.unwrap(), sugar);
    assert!(matches!(
        uc.execute(sugar.id + 100).await,
        Err(FoodgramError::IngredientNotFound)
    ));
}
