use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::short_link::{GetShortLinkUseCase, ResolveShortLinkUseCase};

use crate::helpers::MemoryRepo;

#[tokio::test]
async fn should_return_same_code_on_repeated_requests() {
    let repo = MemoryRepo::new();
    let author = repo.add_user("author");
    let recipe_id = repo.add_recipe(author, &[], &[]);
    let usecase = GetShortLinkUseCase {
        recipes: repo.clone(),
    };

    let first = usecase.execute(recipe_id).await.unwrap();
    let second = usecase.execute(recipe_id).await.unwrap();

    assert_eq!(first, second);
    let store = repo.store_handle();
    let store = store.lock().unwrap();
    assert_eq!(store.recipes[0].short_code.as_deref(), Some(first.as_str()));
}

#[tokio::test]
async fn should_resolve_code_back_to_recipe() {
    let repo = MemoryRepo::new();
    let author = repo.add_user("author");
    repo.add_recipe(author, &[], &[]);
    let recipe_id = repo.add_recipe(author, &[], &[]);
    let code = GetShortLinkUseCase {
        recipes: repo.clone(),
    }
    .execute(recipe_id)
    .await
    .unwrap();

    let resolve = ResolveShortLinkUseCase {
        recipes: repo.clone(),
    };
    assert_eq!(resolve.execute(&code).await.unwrap(), recipe_id);
    assert_eq!(resolve.execute(&code).await.unwrap(), recipe_id);
}

#[tokio::test]
async fn should_report_unknown_code() {
    let repo = MemoryRepo::new();
    let resolve = ResolveShortLinkUseCase {
        recipes: repo.clone(),
    };

    let result = resolve.execute("zzz").await;

    assert!(matches!(result, Err(RecipesServiceError::ShortLinkNotFound)));
}

#[tokio::test]
async fn should_not_issue_code_for_missing_recipe() {
    let repo = MemoryRepo::new();
    let usecase = GetShortLinkUseCase {
        recipes: repo.clone(),
    };

    let result = usecase.execute(7).await;

    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}
