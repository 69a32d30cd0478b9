#![allow(async_fn_in_trait)]

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    CartLine, Collection, DecodedImage, Ingredient, NewRecipe, Recipe, RecipeChanges,
    RecipeFilter, RecipeSummary, Tag, User,
};
use crate::error::RecipesServiceError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError>;

    /// Users ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError>;

    /// Fails with `UserAlreadyExists` when the id, email or username is taken.
    async fn create(&self, user: &User) -> Result<(), RecipesServiceError>;

    async fn set_avatar(
        &self,
        id: Uuid,
        avatar: Option<&str>,
    ) -> Result<(), RecipesServiceError>;
}

/// Repository for the tag dictionary.
pub trait TagRepository: Send + Sync {
    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError>;

    /// Insert a tag unless its slug exists. Returns `true` if a row was inserted.
    async fn insert_if_absent(&self, name: &str, slug: &str) -> Result<bool, RecipesServiceError>;
}

/// Repository for the ingredient dictionary.
pub trait IngredientRepository: Send + Sync {
    /// Ingredients whose name starts with `name_prefix` (case-insensitive), ordered by name.
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError>;

    /// Insert unless the (name, unit) pair exists. Returns `true` if a row was inserted.
    async fn insert_if_absent(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<bool, RecipesServiceError>;
}

/// Repository for recipes and their tag/ingredient sets.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    /// Recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError>;

    /// Each author's recipes, newest first, truncated to `limit` per author if given.
    /// Authors without recipes are absent.
    async fn list_summaries_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: Option<u64>,
    ) -> Result<HashMap<Uuid, Vec<RecipeSummary>>, RecipesServiceError>;

    /// Number of recipes per author. Authors without recipes are absent.
    async fn count_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, RecipesServiceError>;

    /// Insert the recipe with its tag and ingredient sets in one transaction.
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipesServiceError>;

    /// Overwrite the recipe's columns and replace both sets in one transaction.
    async fn update(
        &self,
        id: i32,
        changes: &RecipeChanges,
    ) -> Result<Recipe, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    async fn find_id_by_short_code(&self, code: &str) -> Result<Option<i32>, RecipesServiceError>;

    async fn set_short_code(&self, id: i32, code: &str) -> Result<(), RecipesServiceError>;
}

/// Repository for the favorites and shopping-cart sets.
pub trait CollectionRepository: Send + Sync {
    /// Returns `true` if the pair was inserted, `false` if it was already present.
    async fn add(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Subset of `recipe_ids` present in the user's collection.
    async fn contains_among(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;

    /// Every ingredient row of every recipe in the user's cart.
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError>;
}

/// Repository for author subscriptions.
pub trait FollowRepository: Send + Sync {
    /// Returns `true` if the follow was inserted, `false` if it already existed.
    async fn add(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, follower_id: Uuid, author_id: Uuid)
    -> Result<bool, RecipesServiceError>;

    /// Subset of `author_ids` the follower is subscribed to.
    async fn following_among(
        &self,
        follower_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError>;

    /// Followed users ordered by username.
    async fn list_following(
        &self,
        follower_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError>;
}

/// Storage for uploaded images.
pub trait MediaStorage: Send + Sync {
    /// Store the image under `folder` and return its media path.
    async fn save(&self, folder: &str, image: &DecodedImage)
    -> Result<String, RecipesServiceError>;

    /// Remove a stored file. Missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), RecipesServiceError>;
}
