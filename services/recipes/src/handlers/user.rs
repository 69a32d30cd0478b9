use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_auth_types::identity::{IdentityHeaders, MaybeIdentity};
use foodgram_domain::pagination::Page;

use crate::error::RecipesServiceError;
use crate::handlers::views::{PageQuery, UserView};
use crate::handlers::{user_view, user_views};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteAvatarUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateAvatarUseCase,
};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), RecipesServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            CreateUserInput {
                email: body.email,
                username: body.username,
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await?;
    let view = user_view(&state, Some(identity.user_id), user).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<UserView>>, RecipesServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let page = usecase.execute(query.request()).await?;
    let results = user_views(&state, viewer.user_id(), page.results).await?;
    Ok(Json(Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results,
    }))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserView>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(user_id).await?;
    Ok(Json(user_view(&state, viewer.user_id(), user).await?))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserView>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user_view(&state, Some(identity.user_id), user).await?))
}

// ── PUT /users/me/avatar ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AvatarRequest {
    pub avatar: Option<String>,
}

#[derive(Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

pub async fn update_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<AvatarRequest>,
) -> Result<Json<AvatarResponse>, RecipesServiceError> {
    let usecase = UpdateAvatarUseCase {
        repo: state.user_repo(),
        media: state.media_storage(),
    };
    let path = usecase
        .execute(identity.user_id, body.avatar.as_deref())
        .await?;
    Ok(Json(AvatarResponse {
        avatar: state.media_link(&path),
    }))
}

// ── DELETE /users/me/avatar ──────────────────────────────────────────────────

pub async fn delete_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteAvatarUseCase {
        repo: state.user_repo(),
        media: state.media_storage(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
