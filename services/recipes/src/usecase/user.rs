use chrono::Utc;
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::image::decode_data_uri;
use crate::domain::repository::{MediaStorage, UserRepository};
use crate::domain::types::{User, validate_email, validate_person_name, validate_username};
use crate::error::RecipesServiceError;

pub const AVATAR_FOLDER: &str = "users";

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateUserInput,
    ) -> Result<User, RecipesServiceError> {
        if !validate_email(&input.email) {
            return Err(RecipesServiceError::InvalidEmail);
        }
        if !validate_username(&input.username) {
            return Err(RecipesServiceError::InvalidUsername);
        }
        if !validate_person_name(&input.first_name) || !validate_person_name(&input.last_name) {
            return Err(RecipesServiceError::InvalidName);
        }
        let user = User {
            id: user_id,
            email: input.email,
            username: input.username,
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            avatar: None,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, RecipesServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError> {
        self.repo.list(page.clamped()).await
    }
}

// ── UpdateAvatar ─────────────────────────────────────────────────────────────

pub struct UpdateAvatarUseCase<R: UserRepository, M: MediaStorage> {
    pub repo: R,
    pub media: M,
}

impl<R: UserRepository, M: MediaStorage> UpdateAvatarUseCase<R, M> {
    /// Store the new avatar and return its media path. The previous file is removed.
    pub async fn execute(
        &self,
        user_id: Uuid,
        avatar: Option<&str>,
    ) -> Result<String, RecipesServiceError> {
        let avatar = avatar
            .filter(|a| !a.trim().is_empty())
            .ok_or(RecipesServiceError::MissingData)?;
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let image = decode_data_uri(avatar)?;

        let path = self.media.save(AVATAR_FOLDER, &image).await?;
        if let Err(e) = self.repo.set_avatar(user_id, Some(&path)).await {
            discard_media(&self.media, &path).await;
            return Err(e);
        }
        if let Some(old) = user.avatar {
            discard_media(&self.media, &old).await;
        }
        tracing::info!(%user_id, "avatar updated");
        Ok(path)
    }
}

// ── DeleteAvatar ─────────────────────────────────────────────────────────────

pub struct DeleteAvatarUseCase<R: UserRepository, M: MediaStorage> {
    pub repo: R,
    pub media: M,
}

impl<R: UserRepository, M: MediaStorage> DeleteAvatarUseCase<R, M> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let old = user.avatar.ok_or(RecipesServiceError::AvatarNotFound)?;
        self.repo.set_avatar(user_id, None).await?;
        discard_media(&self.media, &old).await;
        tracing::info!(%user_id, "avatar removed");
        Ok(())
    }
}

/// Best-effort removal of a stored file once nothing references it.
pub(crate) async fn discard_media<M: MediaStorage>(media: &M, path: &str) {
    if let Err(e) = media.delete(path).await {
        tracing::warn!(error = %e, path, "failed to delete media file");
    }
}
