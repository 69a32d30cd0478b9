//! Viewer-relative flags (`is_subscribed`, `is_favorited`, `is_in_shopping_cart`),
//! computed with one batched query per flag instead of one per row.

use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use uuid::Uuid;

use crate::domain::repository::{CollectionRepository, FollowRepository, UserRepository};
use crate::domain::types::{Collection, Recipe, User};
use crate::error::RecipesServiceError;

#[derive(Debug, Clone)]
pub struct AnnotatedUser {
    pub user: User,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone)]
pub struct AnnotatedRecipe {
    pub recipe: Recipe,
    pub author: AnnotatedUser,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

async fn subscribed_among<F: FollowRepository>(
    follows: &F,
    viewer: Option<Uuid>,
    author_ids: &[Uuid],
) -> Result<HashSet<Uuid>, RecipesServiceError> {
    match viewer {
        Some(viewer) if !author_ids.is_empty() => {
            follows.following_among(viewer, author_ids).await
        }
        _ => Ok(HashSet::new()),
    }
}

// ── AnnotateUsers ────────────────────────────────────────────────────────────

pub struct AnnotateUsersUseCase<F: FollowRepository> {
    pub follows: F,
}

impl<F: FollowRepository> AnnotateUsersUseCase<F> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        users: Vec<User>,
    ) -> Result<Vec<AnnotatedUser>, RecipesServiceError> {
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let subscribed = subscribed_among(&self.follows, viewer, &ids).await?;
        Ok(users
            .into_iter()
            .map(|user| AnnotatedUser {
                is_subscribed: subscribed.contains(&user.id),
                user,
            })
            .collect())
    }
}

// ── AnnotateRecipes ──────────────────────────────────────────────────────────

pub struct AnnotateRecipesUseCase<U, C, F>
where
    U: UserRepository,
    C: CollectionRepository,
    F: FollowRepository,
{
    pub users: U,
    pub collections: C,
    pub follows: F,
}

impl<U, C, F> AnnotateRecipesUseCase<U, C, F>
where
    U: UserRepository,
    C: CollectionRepository,
    F: FollowRepository,
{
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<AnnotatedRecipe>, RecipesServiceError> {
        let mut author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();

        let authors: HashMap<Uuid, User> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let subscribed = subscribed_among(&self.follows, viewer, &author_ids).await?;
        let (favorited, in_cart) = match viewer {
            Some(viewer) if !recipe_ids.is_empty() => (
                self.collections
                    .contains_among(Collection::Favorites, viewer, &recipe_ids)
                    .await?,
                self.collections
                    .contains_among(Collection::ShoppingCart, viewer, &recipe_ids)
                    .await?,
            ),
            _ => (HashSet::new(), HashSet::new()),
        };

        recipes
            .into_iter()
            .map(|recipe| -> Result<AnnotatedRecipe, RecipesServiceError> {
                let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                    anyhow!("author {} of recipe {} missing", recipe.author_id, recipe.id)
                })?;
                Ok(AnnotatedRecipe {
                    author: AnnotatedUser {
                        is_subscribed: subscribed.contains(&author.id),
                        user: author,
                    },
                    is_favorited: favorited.contains(&recipe.id),
                    is_in_shopping_cart: in_cart.contains(&recipe.id),
                    recipe,
                })
            })
            .collect()
    }
}
