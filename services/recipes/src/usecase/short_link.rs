use crate::domain::repository::RecipeRepository;
use crate::domain::short_link::encode_short_code;
use crate::error::RecipesServiceError;

// ── GetShortLink ─────────────────────────────────────────────────────────────

pub struct GetShortLinkUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> GetShortLinkUseCase<R> {
    /// The recipe's short code, assigned on first request and stable afterwards.
    pub async fn execute(&self, recipe_id: i32) -> Result<String, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if let Some(code) = recipe.short_code {
            return Ok(code);
        }
        let code = encode_short_code(recipe.id);
        self.recipes.set_short_code(recipe.id, &code).await?;
        tracing::debug!(recipe_id, code = %code, "short code assigned");
        Ok(code)
    }
}

// ── ResolveShortLink ─────────────────────────────────────────────────────────

pub struct ResolveShortLinkUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ResolveShortLinkUseCase<R> {
    pub async fn execute(&self, code: &str) -> Result<i32, RecipesServiceError> {
        self.recipes
            .find_id_by_short_code(code)
            .await?
            .ok_or(RecipesServiceError::ShortLinkNotFound)
    }
}
