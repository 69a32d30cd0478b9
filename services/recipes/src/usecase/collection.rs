//! Favorites and shopping cart share one add/remove state machine per (user, recipe).

use uuid::Uuid;

use crate::domain::repository::{CollectionRepository, RecipeRepository, UserRepository};
use crate::domain::types::{Collection, Recipe};
use crate::error::RecipesServiceError;

fn already_exists(collection: Collection) -> RecipesServiceError {
    match collection {
        Collection::Favorites => RecipesServiceError::FavoriteAlreadyExists,
        Collection::ShoppingCart => RecipesServiceError::CartItemAlreadyExists,
    }
}

fn not_present(collection: Collection) -> RecipesServiceError {
    match collection {
        Collection::Favorites => RecipesServiceError::FavoriteNotFound,
        Collection::ShoppingCart => RecipesServiceError::CartItemNotFound,
    }
}

// ── AddToCollection ──────────────────────────────────────────────────────────

pub struct AddToCollectionUseCase<U, R, C>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CollectionRepository,
{
    pub users: U,
    pub recipes: R,
    pub collections: C,
}

impl<U, R, C> AddToCollectionUseCase<U, R, C>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CollectionRepository,
{
    /// Add the recipe and return it. A second add reports "already exists" and stores nothing.
    pub async fn execute(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<Recipe, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if !self.collections.add(collection, user_id, recipe_id).await? {
            return Err(already_exists(collection));
        }
        tracing::debug!(?collection, %user_id, recipe_id, "recipe added");
        Ok(recipe)
    }
}

// ── RemoveFromCollection ─────────────────────────────────────────────────────

pub struct RemoveFromCollectionUseCase<R: RecipeRepository, C: CollectionRepository> {
    pub recipes: R,
    pub collections: C,
}

impl<R: RecipeRepository, C: CollectionRepository> RemoveFromCollectionUseCase<R, C> {
    pub async fn execute(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.collections.remove(collection, user_id, recipe_id).await? {
            return Err(not_present(collection));
        }
        tracing::debug!(?collection, %user_id, recipe_id, "recipe removed");
        Ok(())
    }
}
