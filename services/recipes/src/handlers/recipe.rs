use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use foodgram_auth_types::identity::{IdentityHeaders, MaybeIdentity};
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::validation::{DraftIngredient, RawAmount};
use crate::error::RecipesServiceError;
use crate::handlers::views::RecipeView;
use crate::handlers::{recipe_view, recipe_views};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesInput,
    ListRecipesUseCase, RecipeInput, UpdateRecipeUseCase,
};

// ── Request body ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecipeIngredientRequest {
    pub id: i32,
    pub amount: RawAmount,
}

/// Shared by create and update. Missing fields surface as validation errors.
#[derive(Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientRequest>,
    pub image: Option<String>,
    pub cooking_time: Option<RawAmount>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
}

impl From<RecipeRequest> for RecipeInput {
    fn from(body: RecipeRequest) -> Self {
        Self {
            tags: body.tags,
            ingredients: body
                .ingredients
                .into_iter()
                .map(|i| DraftIngredient {
                    id: i.id,
                    amount: i.amount,
                })
                .collect(),
            image: body.image,
            cooking_time: body.cooking_time.as_ref().and_then(RawAmount::coerce),
            name: body.name,
            text: body.text,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

/// `GET /recipes` filters. `tags` repeats (`tags=lunch&tags=dinner`), so the
/// query is read pair by pair instead of through a flat struct.
#[derive(Debug, Default, PartialEq)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<Uuid>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeListQuery {
    pub fn parse(raw: &str) -> Result<Self, RecipesServiceError> {
        let mut query = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match &*key {
                "page" => query.page = Some(parse_number(&value)?),
                "limit" => query.limit = Some(parse_number(&value)?),
                "author" => {
                    query.author =
                        Some(value.parse().map_err(|_| RecipesServiceError::MissingData)?)
                }
                "tags" if !value.is_empty() => query.tags.push(value.into_owned()),
                "is_favorited" => query.is_favorited = parse_flag(&value)?,
                "is_in_shopping_cart" => query.is_in_shopping_cart = parse_flag(&value)?,
                _ => {}
            }
        }
        Ok(query)
    }
}

fn parse_number(value: &str) -> Result<u32, RecipesServiceError> {
    value.parse().map_err(|_| RecipesServiceError::MissingData)
}

fn parse_flag(value: &str) -> Result<bool, RecipesServiceError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(RecipesServiceError::MissingData),
    }
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<RecipeView>>, RecipesServiceError> {
    let query = raw_query
        .as_deref()
        .map(RecipeListQuery::parse)
        .transpose()?
        .unwrap_or_default();

    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(
            viewer.user_id(),
            ListRecipesInput {
                author: query.author,
                tags: query.tags,
                is_favorited: query.is_favorited,
                is_in_shopping_cart: query.is_in_shopping_cart,
            },
            PageRequest::new(query.page, query.limit),
        )
        .await?;
    let results = recipe_views(&state, viewer.user_id(), page.results).await?;
    Ok(Json(Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results,
    }))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<RecipeView>, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe = usecase.execute(recipe_id).await?;
    Ok(Json(recipe_view(&state, viewer.user_id(), recipe).await?))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeView>), RecipesServiceError> {
    let usecase = CreateRecipeUseCase {
        users: state.user_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        recipes: state.recipe_repo(),
        media: state.media_storage(),
    };
    let recipe = usecase.execute(identity.user_id, body.into()).await?;
    let view = recipe_view(&state, Some(identity.user_id), recipe).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

// ── PUT|PATCH /recipes/{id} ──────────────────────────────────────────────────

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(body): Json<RecipeRequest>,
) -> Result<Json<RecipeView>, RecipesServiceError> {
    let usecase = UpdateRecipeUseCase {
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        recipes: state.recipe_repo(),
        media: state.media_storage(),
    };
    let recipe = usecase
        .execute(identity.user_id, recipe_id, body.into())
        .await?;
    Ok(Json(
        recipe_view(&state, Some(identity.user_id), recipe).await?,
    ))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        media: state.media_storage(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
