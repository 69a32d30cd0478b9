use foodgram_recipes::domain::types::Collection;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::collection::{AddToCollectionUseCase, RemoveFromCollectionUseCase};

use crate::helpers::MemoryRepo;

fn add_usecase(repo: &MemoryRepo) -> AddToCollectionUseCase<MemoryRepo, MemoryRepo, MemoryRepo> {
    AddToCollectionUseCase {
        users: repo.clone(),
        recipes: repo.clone(),
        collections: repo.clone(),
    }
}

fn remove_usecase(repo: &MemoryRepo) -> RemoveFromCollectionUseCase<MemoryRepo, MemoryRepo> {
    RemoveFromCollectionUseCase {
        recipes: repo.clone(),
        collections: repo.clone(),
    }
}

#[tokio::test]
async fn should_store_one_favorite_when_added_twice() {
    let repo = MemoryRepo::new();
    let author = repo.add_user("author");
    let reader = repo.add_user("reader");
    let recipe_id = repo.add_recipe(author, &[], &[]);
    let usecase = add_usecase(&repo);

    let added = usecase
        .execute(Collection::Favorites, reader, recipe_id)
        .await
        .unwrap();
    assert_eq!(added.id, recipe_id);

    let second = usecase.execute(Collection::Favorites, reader, recipe_id).await;
    assert!(matches!(
        second,
        Err(RecipesServiceError::FavoriteAlreadyExists)
    ));
    assert_eq!(
        repo.store_handle().lock().unwrap().favorites,
        vec![(reader, recipe_id)]
    );
}

#[tokio::test]
async fn should_report_missing_favorite_and_leave_store_unchanged() {
    let repo = MemoryRepo::new();
    let author = repo.add_user("author");
    let reader = repo.add_user("reader");
    let recipe_id = repo.add_recipe(author, &[], &[]);
    add_usecase(&repo)
        .execute(Collection::ShoppingCart, reader, recipe_id)
        .await
        .unwrap();

    let result = remove_usecase(&repo)
        .execute(Collection::Favorites, reader, recipe_id)
        .await;

    assert!(matches!(result, Err(RecipesServiceError::FavoriteNotFound)));
    let store = repo.store_handle();
    let store = store.lock().unwrap();
    assert!(store.favorites.is_empty());
    assert_eq!(store.carts, vec![(reader, recipe_id)]);
}

#[tokio::test]
async fn should_add_and_remove_cart_item() {
    let repo = MemoryRepo::new();
    let author = repo.add_user("author");
    let reader = repo.add_user("reader");
    let recipe_id = repo.add_recipe(author, &[], &[]);

    add_usecase(&repo)
        .execute(Collection::ShoppingCart, reader, recipe_id)
        .await
        .unwrap();
    let again = add_usecase(&repo)
        .execute(Collection::ShoppingCart, reader, recipe_id)
        .await;
    assert!(matches!(again, Err(RecipesServiceError::CartItemAlreadyExists)));

    remove_usecase(&repo)
        .execute(Collection::ShoppingCart, reader, recipe_id)
        .await
        .unwrap();
    let twice = remove_usecase(&repo)
        .execute(Collection::ShoppingCart, reader, recipe_id)
        .await;
    assert!(matches!(twice, Err(RecipesServiceError::CartItemNotFound)));
    assert!(repo.store_handle().lock().unwrap().carts.is_empty());
}

#[tokio::test]
async fn should_reject_unknown_recipe() {
    let repo = MemoryRepo::new();
    let reader = repo.add_user("reader");

    let added = add_usecase(&repo)
        .execute(Collection::Favorites, reader, 404)
        .await;
    assert!(matches!(added, Err(RecipesServiceError::RecipeNotFound)));

    let removed = remove_usecase(&repo)
        .execute(Collection::Favorites, reader, 404)
        .await;
    assert!(matches!(removed, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_keep_users_collections_apart() {
    let repo = MemoryRepo::new();
    let author = repo.add_user("author");
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let recipe_id = repo.add_recipe(author, &[], &[]);

    add_usecase(&repo)
        .execute(Collection::Favorites, alice, recipe_id)
        .await
        .unwrap();
    add_usecase(&repo)
        .execute(Collection::Favorites, bob, recipe_id)
        .await
        .unwrap();

    assert_eq!(repo.store_handle().lock().unwrap().favorites.len(), 2);
}

#[tokio::test]
async fn should_report_recipe_deleted_before_cart_insert_as_not_found() {
    let repo = MemoryRepo::new();
    let author = repo.add_user("author");
    let reader = repo.add_user("reader");
    let recipe_id = repo.add_recipe(author, &[], &[]);
    repo.delete_concurrently(recipe_id);

    let result = add_usecase(&repo)
        .execute(Collection::ShoppingCart, reader, recipe_id)
        .await;

    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
    assert!(repo.store_handle().lock().unwrap().carts.is_empty());
}
