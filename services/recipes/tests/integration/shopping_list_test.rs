use foodgram_recipes::domain::shopping_list::{ShoppingListItem, render_text};
use foodgram_recipes::domain::types::Collection;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::collection::AddToCollectionUseCase;
use foodgram_recipes::usecase::shopping_list::DownloadShoppingListUseCase;
use uuid::Uuid;

use crate::helpers::MemoryRepo;

const FLOUR: i32 = 1;
const EGG: i32 = 2;

fn seeded() -> (MemoryRepo, i32, i32) {
    let repo = MemoryRepo::new();
    repo.add_ingredient(FLOUR, "flour", "g");
    repo.add_ingredient(EGG, "egg", "pcs");
    let author = repo.add_user("baker");
    let pancakes = repo.add_recipe(author, &[], &[(FLOUR, 200), (EGG, 1)]);
    let bread = repo.add_recipe(author, &[], &[(FLOUR, 300), (EGG, 2)]);
    (repo, pancakes, bread)
}

async fn put_in_cart(repo: &MemoryRepo, user_id: Uuid, recipe_ids: &[i32]) {
    let usecase = AddToCollectionUseCase {
        users: repo.clone(),
        recipes: repo.clone(),
        collections: repo.clone(),
    };
    for &recipe_id in recipe_ids {
        usecase
            .execute(Collection::ShoppingCart, user_id, recipe_id)
            .await
            .unwrap();
    }
}

fn item(name: &str, unit: &str, total_amount: i64) -> ShoppingListItem {
    ShoppingListItem {
        name: name.into(),
        measurement_unit: unit.into(),
        total_amount,
    }
}

#[tokio::test]
async fn should_sum_amounts_across_cart_recipes() {
    let (repo, pancakes, bread) = seeded();
    let shopper = repo.add_user("shopper");
    put_in_cart(&repo, shopper, &[pancakes, bread]).await;

    let usecase = DownloadShoppingListUseCase {
        collections: repo.clone(),
    };
    let items = usecase.execute(shopper).await.unwrap();

    assert_eq!(items, vec![item("egg", "pcs", 3), item("flour", "g", 500)]);
    assert_eq!(
        render_text(&items),
        "Shopping list:\n\negg (pcs) - 3\nflour (g) - 500\n"
    );
}

#[tokio::test]
async fn should_not_depend_on_cart_insertion_order() {
    let (repo, pancakes, bread) = seeded();
    let first = repo.add_user("first");
    let second = repo.add_user("second");
    put_in_cart(&repo, first, &[pancakes, bread]).await;
    put_in_cart(&repo, second, &[bread, pancakes]).await;

    let usecase = DownloadShoppingListUseCase {
        collections: repo.clone(),
    };
    assert_eq!(
        usecase.execute(first).await.unwrap(),
        usecase.execute(second).await.unwrap()
    );
}

#[tokio::test]
async fn should_reject_download_of_empty_cart() {
    let (repo, _, _) = seeded();
    let shopper = repo.add_user("shopper");

    let usecase = DownloadShoppingListUseCase {
        collections: repo.clone(),
    };
    let result = usecase.execute(shopper).await;

    assert!(matches!(result, Err(RecipesServiceError::CartEmpty)));
}
