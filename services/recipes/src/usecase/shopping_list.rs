use uuid::Uuid;

use crate::domain::repository::CollectionRepository;
use crate::domain::shopping_list::{ShoppingListItem, aggregate};
use crate::error::RecipesServiceError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<C: CollectionRepository> {
    pub collections: C,
}

impl<C: CollectionRepository> DownloadShoppingListUseCase<C> {
    /// Aggregated cart contents; an empty cart is reported as `CartEmpty`.
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ShoppingListItem>, RecipesServiceError> {
        let lines = self.collections.cart_lines(user_id).await?;
        let items = aggregate(lines);
        if items.is_empty() {
            return Err(RecipesServiceError::CartEmpty);
        }
        tracing::debug!(%user_id, items = items.len(), "shopping list built");
        Ok(items)
    }
}
