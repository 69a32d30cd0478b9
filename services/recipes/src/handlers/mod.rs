pub mod collection;
pub mod ingredient;
pub mod recipe;
pub mod short_link;
pub mod subscription;
pub mod tag;
pub mod user;
pub mod views;

use uuid::Uuid;

use crate::domain::types::{Recipe, User};
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::annotate::{AnnotateRecipesUseCase, AnnotateUsersUseCase};
use views::{RecipeView, UserView};

async fn user_views(
    state: &AppState,
    viewer: Option<Uuid>,
    users: Vec<User>,
) -> Result<Vec<UserView>, RecipesServiceError> {
    let usecase = AnnotateUsersUseCase {
        follows: state.follow_repo(),
    };
    let annotated = usecase.execute(viewer, users).await?;
    Ok(annotated
        .into_iter()
        .map(|user| UserView::new(state, user))
        .collect())
}

async fn user_view(
    state: &AppState,
    viewer: Option<Uuid>,
    user: User,
) -> Result<UserView, RecipesServiceError> {
    user_views(state, viewer, vec![user])
        .await?
        .pop()
        .ok_or(RecipesServiceError::UserNotFound)
}

async fn recipe_views(
    state: &AppState,
    viewer: Option<Uuid>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeView>, RecipesServiceError> {
    let usecase = AnnotateRecipesUseCase {
        users: state.user_repo(),
        collections: state.collection_repo(),
        follows: state.follow_repo(),
    };
    let annotated = usecase.execute(viewer, recipes).await?;
    Ok(annotated
        .into_iter()
        .map(|recipe| RecipeView::new(state, recipe))
        .collect())
}

async fn recipe_view(
    state: &AppState,
    viewer: Option<Uuid>,
    recipe: Recipe,
) -> Result<RecipeView, RecipesServiceError> {
    recipe_views(state, viewer, vec![recipe])
        .await?
        .pop()
        .ok_or(RecipesServiceError::RecipeNotFound)
}
