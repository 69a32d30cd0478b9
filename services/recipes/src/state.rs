use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCollectionRepository, DbFollowRepository, DbIngredientRepository, DbRecipeRepository,
    DbTagRepository, DbUserRepository,
};
use crate::infra::media::LocalMediaStorage;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: LocalMediaStorage,
    /// URL prefix media paths are served under, without trailing slash.
    pub media_url: String,
    /// Externally reachable base URL, used to build short links.
    pub public_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn collection_repo(&self) -> DbCollectionRepository {
        DbCollectionRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn media_storage(&self) -> LocalMediaStorage {
        self.media.clone()
    }

    /// Public URL of a stored media path.
    pub fn media_link(&self, path: &str) -> String {
        format!("{}/{}", self.media_url, path)
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
