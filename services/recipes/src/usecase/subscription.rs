use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{RecipeSummary, User};
use crate::error::RecipesServiceError;

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct SubscriptionCard {
    pub user: User,
    pub recipes_count: u64,
    pub recipes: Vec<RecipeSummary>,
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> SubscribeUseCase<U, F> {
    /// Follow `author_id` and return the author.
    pub async fn execute(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<User, RecipesServiceError> {
        if follower_id == author_id {
            return Err(RecipesServiceError::SelfFollow);
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if self.users.find_by_id(follower_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if !self.follows.add(follower_id, author_id).await? {
            return Err(RecipesServiceError::AlreadySubscribed);
        }
        tracing::info!(%follower_id, %author_id, "subscribed");
        Ok(author)
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> UnsubscribeUseCase<U, F> {
    pub async fn execute(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), RecipesServiceError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if !self.follows.remove(follower_id, author_id).await? {
            return Err(RecipesServiceError::NotSubscribed);
        }
        tracing::info!(%follower_id, %author_id, "unsubscribed");
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository> {
    pub follows: F,
}

impl<F: FollowRepository> ListSubscriptionsUseCase<F> {
    pub async fn execute(
        &self,
        follower_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError> {
        self.follows.list_following(follower_id, page.clamped()).await
    }
}

// ── BuildSubscriptionCards ───────────────────────────────────────────────────

pub struct BuildSubscriptionCardsUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> BuildSubscriptionCardsUseCase<R> {
    /// Attach recipe counts and up to `recipes_limit` newest recipes to each author.
    pub async fn execute(
        &self,
        authors: Vec<User>,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<SubscriptionCard>, RecipesServiceError> {
        let ids: Vec<Uuid> = authors.iter().map(|u| u.id).collect();
        let counts = self.recipes.count_by_authors(&ids).await?;
        let mut previews = self
            .recipes
            .list_summaries_by_authors(&ids, recipes_limit)
            .await?;

        Ok(authors
            .into_iter()
            .map(|user| SubscriptionCard {
                recipes_count: counts.get(&user.id).copied().unwrap_or(0),
                recipes: previews.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect())
    }
}
