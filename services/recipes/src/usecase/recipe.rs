use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::image::decode_data_uri;
use crate::domain::repository::{
    IngredientRepository, MediaStorage, RecipeRepository, TagRepository, UserRepository,
};
use crate::domain::types::{NewRecipe, Recipe, RecipeChanges, RecipeFilter};
use crate::domain::validation::{
    DraftIngredient, RecipeDraft, RecipeViolation, ValidRecipe, validate_recipe,
};
use crate::error::RecipesServiceError;
use crate::usecase::user::discard_media;

pub const RECIPE_IMAGE_FOLDER: &str = "recipes";

/// Recipe content as submitted for create or update.
#[derive(Debug, Clone, Default)]
pub struct RecipeInput {
    pub tags: Vec<i32>,
    pub ingredients: Vec<DraftIngredient>,
    /// Data URI. On update, `None` keeps the current image.
    pub image: Option<String>,
    pub cooking_time: Option<i64>,
    pub name: String,
    pub text: String,
}

impl RecipeInput {
    fn draft(&self, has_image: bool) -> RecipeDraft {
        RecipeDraft {
            tags: self.tags.clone(),
            ingredients: self.ingredients.clone(),
            has_image,
            cooking_time: self.cooking_time,
            name: self.name.clone(),
            text: self.text.clone(),
        }
    }

    fn new_image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.trim().is_empty())
    }
}

/// Run the local checks, then confirm every referenced tag and ingredient exists.
async fn validate_with_references<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    draft: &RecipeDraft,
) -> Result<ValidRecipe, RecipesServiceError> {
    let local = validate_recipe(draft);
    let mut violations = local.as_ref().err().cloned().unwrap_or_default();

    let tag_ids = unique(draft.tags.iter().copied());
    if !tag_ids.is_empty() {
        let known: HashSet<i32> = tags
            .find_by_ids(&tag_ids)
            .await?
            .iter()
            .map(|t| t.id)
            .collect();
        violations.extend(
            tag_ids
                .iter()
                .filter(|id| !known.contains(id))
                .map(|&id| RecipeViolation::UnknownTag(id)),
        );
    }

    let ingredient_ids = unique(draft.ingredients.iter().map(|i| i.id));
    if !ingredient_ids.is_empty() {
        let known: HashSet<i32> = ingredients
            .find_by_ids(&ingredient_ids)
            .await?
            .iter()
            .map(|i| i.id)
            .collect();
        violations.extend(
            ingredient_ids
                .iter()
                .filter(|id| !known.contains(id))
                .map(|&id| RecipeViolation::UnknownIngredient(id)),
        );
    }

    match local {
        Ok(valid) if violations.is_empty() => Ok(valid),
        _ => Err(RecipesServiceError::Validation(violations)),
    }
}

fn unique(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<U, T, I, R, M>
where
    U: UserRepository,
    T: TagRepository,
    I: IngredientRepository,
    R: RecipeRepository,
    M: MediaStorage,
{
    pub users: U,
    pub tags: T,
    pub ingredients: I,
    pub recipes: R,
    pub media: M,
}

impl<U, T, I, R, M> CreateRecipeUseCase<U, T, I, R, M>
where
    U: UserRepository,
    T: TagRepository,
    I: IngredientRepository,
    R: RecipeRepository,
    M: MediaStorage,
{
    pub async fn execute(
        &self,
        author_id: Uuid,
        input: RecipeInput,
    ) -> Result<Recipe, RecipesServiceError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }

        let new_image = input.new_image();
        let draft = input.draft(new_image.is_some());
        let valid = validate_with_references(&self.tags, &self.ingredients, &draft).await?;

        let image = decode_data_uri(new_image.ok_or(RecipesServiceError::InvalidImage)?)?;
        let image_path = self.media.save(RECIPE_IMAGE_FOLDER, &image).await?;

        let new_recipe = NewRecipe {
            author_id,
            name: input.name.trim().to_owned(),
            text: input.text,
            image: image_path.clone(),
            cooking_time: valid.cooking_time,
            tag_ids: valid.tag_ids,
            ingredients: valid.ingredients,
            published_at: Utc::now(),
        };
        match self.recipes.create(&new_recipe).await {
            Ok(recipe) => {
                tracing::info!(recipe_id = recipe.id, %author_id, "recipe created");
                Ok(recipe)
            }
            Err(e) => {
                discard_media(&self.media, &image_path).await;
                Err(e)
            }
        }
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<T, I, R, M>
where
    T: TagRepository,
    I: IngredientRepository,
    R: RecipeRepository,
    M: MediaStorage,
{
    pub tags: T,
    pub ingredients: I,
    pub recipes: R,
    pub media: M,
}

impl<T, I, R, M> UpdateRecipeUseCase<T, I, R, M>
where
    T: TagRepository,
    I: IngredientRepository,
    R: RecipeRepository,
    M: MediaStorage,
{
    /// Replace the recipe's content; tag and ingredient sets are overwritten, not merged.
    pub async fn execute(
        &self,
        user_id: Uuid,
        recipe_id: i32,
        input: RecipeInput,
    ) -> Result<Recipe, RecipesServiceError> {
        let current = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if current.author_id != user_id {
            return Err(RecipesServiceError::Forbidden);
        }

        let new_image = input.new_image();
        // An explicitly blank image clears it, which the draft then reports as missing.
        let has_image = match input.image {
            Some(_) => new_image.is_some(),
            None => !current.image.is_empty(),
        };
        let draft = input.draft(has_image);
        let valid = validate_with_references(&self.tags, &self.ingredients, &draft).await?;

        let saved_image = match new_image {
            Some(uri) => {
                let image = decode_data_uri(uri)?;
                Some(self.media.save(RECIPE_IMAGE_FOLDER, &image).await?)
            }
            None => None,
        };

        let changes = RecipeChanges {
            name: input.name.trim().to_owned(),
            text: input.text,
            image: saved_image.clone().unwrap_or_else(|| current.image.clone()),
            cooking_time: valid.cooking_time,
            tag_ids: valid.tag_ids,
            ingredients: valid.ingredients,
        };
        let updated = match self.recipes.update(recipe_id, &changes).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(path) = &saved_image {
                    discard_media(&self.media, path).await;
                }
                return Err(e);
            }
        };
        if saved_image.is_some() {
            discard_media(&self.media, &current.image).await;
        }
        tracing::info!(recipe_id, %user_id, "recipe updated");
        Ok(updated)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, M: MediaStorage> {
    pub recipes: R,
    pub media: M,
}

impl<R: RecipeRepository, M: MediaStorage> DeleteRecipeUseCase<R, M> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if recipe.author_id != user_id {
            return Err(RecipesServiceError::Forbidden);
        }
        if !self.recipes.delete(recipe_id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        discard_media(&self.media, &recipe.image).await;
        tracing::info!(recipe_id, %user_id, "recipe deleted");
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(&self, recipe_id: i32) -> Result<Recipe, RecipesServiceError> {
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ListRecipesInput {
    pub author: Option<Uuid>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    /// Collection filters only narrow the list for authenticated viewers.
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        input: ListRecipesInput,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let filter = RecipeFilter {
            author_id: input.author,
            tag_slugs: input.tags,
            favorited_by: viewer.filter(|_| input.is_favorited),
            in_cart_of: viewer.filter(|_| input.is_in_shopping_cart),
        };
        self.recipes.list(&filter, page.clamped()).await
    }
}
