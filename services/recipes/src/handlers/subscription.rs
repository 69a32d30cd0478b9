use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::error::RecipesServiceError;
use crate::handlers::views::SubscriptionView;
use crate::state::AppState;
use crate::usecase::subscription::{
    BuildSubscriptionCardsUseCase, ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u64>,
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<Json<Page<SubscriptionView>>, RecipesServiceError> {
    let usecase = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
    };
    let page = usecase
        .execute(identity.user_id, PageRequest::new(query.page, query.limit))
        .await?;

    let cards = BuildSubscriptionCardsUseCase {
        recipes: state.recipe_repo(),
    }
    .execute(page.results, query.recipes_limit)
    .await?;

    Ok(Json(Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results: cards
            .into_iter()
            .map(|card| SubscriptionView::new(&state, card))
            .collect(),
    }))
}

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<(StatusCode, Json<SubscriptionView>), RecipesServiceError> {
    let usecase = SubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let author = usecase.execute(identity.user_id, author_id).await?;

    let card = BuildSubscriptionCardsUseCase {
        recipes: state.recipe_repo(),
    }
    .execute(vec![author], query.recipes_limit)
    .await?
    .pop()
    .ok_or(RecipesServiceError::UserNotFound)?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionView::new(&state, card)),
    ))
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = UnsubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
