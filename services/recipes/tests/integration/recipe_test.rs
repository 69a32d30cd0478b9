use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::validation::{DraftIngredient, RawAmount, RecipeViolation};
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, ListRecipesInput, ListRecipesUseCase, RecipeInput,
    UpdateRecipeUseCase,
};

use crate::helpers::{MemoryMedia, MemoryRepo, PNG};

const BREAKFAST: i32 = 1;
const DINNER: i32 = 2;
const OATS: i32 = 10;
const MILK: i32 = 11;

fn seeded() -> (MemoryRepo, Uuid) {
    let repo = MemoryRepo::new();
    repo.add_tag(BREAKFAST, "breakfast");
    repo.add_tag(DINNER, "dinner");
    repo.add_ingredient(OATS, "oats", "g");
    repo.add_ingredient(MILK, "milk", "ml");
    let author = repo.add_user("author");
    (repo, author)
}

fn input(tags: &[i32], ingredients: &[(i32, i64)], image: Option<&str>) -> RecipeInput {
    RecipeInput {
        tags: tags.to_vec(),
        ingredients: ingredients
            .iter()
            .map(|&(id, amount)| DraftIngredient {
                id,
                amount: RawAmount::from(amount),
            })
            .collect(),
        image: image.map(str::to_owned),
        cooking_time: Some(10),
        name: "Porridge".into(),
        text: "Simmer the oats in milk.".into(),
    }
}

fn create_usecase(
    repo: &MemoryRepo,
    media: &MemoryMedia,
) -> CreateRecipeUseCase<MemoryRepo, MemoryRepo, MemoryRepo, MemoryRepo, MemoryMedia> {
    CreateRecipeUseCase {
        users: repo.clone(),
        tags: repo.clone(),
        ingredients: repo.clone(),
        recipes: repo.clone(),
        media: media.clone(),
    }
}

fn update_usecase(
    repo: &MemoryRepo,
    media: &MemoryMedia,
) -> UpdateRecipeUseCase<MemoryRepo, MemoryRepo, MemoryRepo, MemoryMedia> {
    UpdateRecipeUseCase {
        tags: repo.clone(),
        ingredients: repo.clone(),
        recipes: repo.clone(),
        media: media.clone(),
    }
}

#[tokio::test]
async fn should_replace_ingredient_set_on_update() {
    let (repo, author) = seeded();
    let media = MemoryMedia::default();
    let created = create_usecase(&repo, &media)
        .execute(author, input(&[BREAKFAST], &[(OATS, 1)], Some(PNG)))
        .await
        .unwrap();

    let updated = update_usecase(&repo, &media)
        .execute(author, created.id, input(&[DINNER], &[(MILK, 2)], None))
        .await
        .unwrap();

    let lines: Vec<(i32, i32)> = updated
        .ingredients
        .iter()
        .map(|l| (l.ingredient.id, l.amount))
        .collect();
    assert_eq!(lines, vec![(MILK, 2)]);
    let tags: Vec<i32> = updated.tags.iter().map(|t| t.id).collect();
    assert_eq!(tags, vec![DINNER]);
    assert_eq!(updated.image, created.image);
}

#[tokio::test]
async fn should_swap_image_and_discard_previous_file() {
    let (repo, author) = seeded();
    let media = MemoryMedia::default();
    let created = create_usecase(&repo, &media)
        .execute(author, input(&[BREAKFAST], &[(OATS, 1)], Some(PNG)))
        .await
        .unwrap();

    let updated = update_usecase(&repo, &media)
        .execute(author, created.id, input(&[BREAKFAST], &[(OATS, 1)], Some(PNG)))
        .await
        .unwrap();

    assert_ne!(updated.image, created.image);
    assert_eq!(*media.files_handle().lock().unwrap(), vec![updated.image]);
}

#[tokio::test]
async fn should_forbid_update_and_delete_by_non_author() {
    let (repo, author) = seeded();
    let intruder = repo.add_user("intruder");
    let media = MemoryMedia::default();
    let created = create_usecase(&repo, &media)
        .execute(author, input(&[BREAKFAST], &[(OATS, 1)], Some(PNG)))
        .await
        .unwrap();

    let updated = update_usecase(&repo, &media)
        .execute(intruder, created.id, input(&[DINNER], &[(MILK, 2)], None))
        .await;
    assert!(matches!(updated, Err(RecipesServiceError::Forbidden)));

    let deleted = DeleteRecipeUseCase {
        recipes: repo.clone(),
        media: media.clone(),
    }
    .execute(intruder, created.id)
    .await;
    assert!(matches!(deleted, Err(RecipesServiceError::Forbidden)));
    assert_eq!(repo.store_handle().lock().unwrap().recipes.len(), 1);
}

#[tokio::test]
async fn should_collect_every_violation_without_storing_anything() {
    let (repo, author) = seeded();
    let media = MemoryMedia::default();

    let result = create_usecase(&repo, &media)
        .execute(author, input(&[BREAKFAST, 99], &[(OATS, 0)], None))
        .await;

    let Err(RecipesServiceError::Validation(violations)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(
        violations,
        vec![
            RecipeViolation::InvalidAmount(OATS),
            RecipeViolation::MissingImage,
            RecipeViolation::UnknownTag(99),
        ]
    );
    assert!(repo.store_handle().lock().unwrap().recipes.is_empty());
    assert!(media.files_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_delete_recipe_with_its_image() {
    let (repo, author) = seeded();
    let media = MemoryMedia::default();
    let created = create_usecase(&repo, &media)
        .execute(author, input(&[BREAKFAST], &[(OATS, 1)], Some(PNG)))
        .await
        .unwrap();

    DeleteRecipeUseCase {
        recipes: repo.clone(),
        media: media.clone(),
    }
    .execute(author, created.id)
    .await
    .unwrap();

    assert!(repo.store_handle().lock().unwrap().recipes.is_empty());
    assert!(media.files_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_filter_list_by_tag_and_ignore_collection_flags_for_anonymous() {
    let (repo, author) = seeded();
    let breakfast = repo.add_recipe(author, &[BREAKFAST], &[(OATS, 50)]);
    repo.add_recipe(author, &[DINNER], &[(MILK, 200)]);
    let usecase = ListRecipesUseCase {
        recipes: repo.clone(),
    };

    let page = usecase
        .execute(
            None,
            ListRecipesInput {
                tags: vec!["breakfast".into()],
                is_favorited: true,
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    let ids: Vec<i32> = page.results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![breakfast]);
}

#[tokio::test]
async fn should_report_recipe_deleted_during_update_as_not_found() {
    let (repo, author) = seeded();
    let media = MemoryMedia::default();
    let created = create_usecase(&repo, &media)
        .execute(author, input(&[BREAKFAST], &[(OATS, 1)], Some(PNG)))
        .await
        .unwrap();
    repo.delete_concurrently(created.id);

    let result = update_usecase(&repo, &media)
        .execute(author, created.id, input(&[DINNER], &[(MILK, 2)], None))
        .await;

    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}
