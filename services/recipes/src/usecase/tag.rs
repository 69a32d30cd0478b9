use serde::Deserialize;

use crate::domain::repository::TagRepository;
use crate::domain::types::Tag;
use crate::error::RecipesServiceError;
use crate::usecase::ImportReport;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

// ── ImportTags ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub slug: String,
}

pub struct ImportTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ImportTagsUseCase<R> {
    /// Insert tags keyed by slug; existing slugs are left untouched.
    pub async fn execute(&self, records: &[TagRecord]) -> Result<ImportReport, RecipesServiceError> {
        let mut report = ImportReport::default();
        for record in records {
            let name = record.name.trim();
            let slug = record.slug.trim();
            if name.is_empty() || slug.is_empty() {
                return Err(RecipesServiceError::MissingData);
            }
            if self.repo.insert_if_absent(name, slug).await? {
                report.added += 1;
            } else {
                report.existing += 1;
            }
        }
        Ok(report)
    }
}
