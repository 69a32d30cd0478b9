use serde::Deserialize;

use crate::domain::repository::IngredientRepository;
use crate::domain::types::Ingredient;
use crate::error::RecipesServiceError;
use crate::usecase::ImportReport;

// ── SearchIngredients ────────────────────────────────────────────────────────

pub struct SearchIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> SearchIngredientsUseCase<R> {
    /// An empty or blank prefix lists every ingredient.
    pub async fn execute(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name_prefix.map(str::trim).filter(|p| !p.is_empty());
        self.repo.search(prefix).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

// ── ImportIngredients ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub measurement_unit: String,
}

pub struct ImportIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ImportIngredientsUseCase<R> {
    /// Get-or-create every (name, unit) pair.
    pub async fn execute(
        &self,
        records: &[IngredientRecord],
    ) -> Result<ImportReport, RecipesServiceError> {
        let mut report = ImportReport::default();
        for record in records {
            let name = record.name.trim();
            let unit = record.measurement_unit.trim();
            if name.is_empty() || unit.is_empty() {
                return Err(RecipesServiceError::MissingData);
            }
            if self.repo.insert_if_absent(name, unit).await? {
                report.added += 1;
            } else {
                report.existing += 1;
            }
        }
        tracing::info!(
            added = report.added,
            existing = report.existing,
            "ingredients imported"
        );
        Ok(report)
    }
}
