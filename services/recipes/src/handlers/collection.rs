use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::shopping_list::{SHOPPING_LIST_FILENAME, render_text};
use crate::domain::types::{Collection, RecipeSummary};
use crate::error::RecipesServiceError;
use crate::handlers::views::RecipeMinifiedView;
use crate::state::AppState;
use crate::usecase::collection::{AddToCollectionUseCase, RemoveFromCollectionUseCase};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

async fn add(
    collection: Collection,
    identity: IdentityHeaders,
    state: AppState,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeMinifiedView>), RecipesServiceError> {
    let usecase = AddToCollectionUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    let recipe = usecase
        .execute(collection, identity.user_id, recipe_id)
        .await?;
    let view = RecipeMinifiedView::new(&state, RecipeSummary::from(&recipe));
    Ok((StatusCode::CREATED, Json(view)))
}

async fn remove(
    collection: Collection,
    identity: IdentityHeaders,
    state: AppState,
    recipe_id: i32,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveFromCollectionUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    usecase
        .execute(collection, identity.user_id, recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST|DELETE /recipes/{id}/favorite ───────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeMinifiedView>), RecipesServiceError> {
    add(Collection::Favorites, identity, state, recipe_id).await
}

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(Collection::Favorites, identity, state, recipe_id).await
}

// ── POST|DELETE /recipes/{id}/shopping_cart ──────────────────────────────────

pub async fn add_to_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeMinifiedView>), RecipesServiceError> {
    add(Collection::ShoppingCart, identity, state, recipe_id).await
}

pub async fn remove_from_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(Collection::ShoppingCart, identity, state, recipe_id).await
}

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let usecase = DownloadShoppingListUseCase {
        collections: state.collection_repo(),
    };
    let items = usecase.execute(identity.user_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        render_text(&items),
    ))
}
