use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::error::RecipesServiceError;
use crate::handlers::views::IngredientView;
use crate::state::AppState;
use crate::usecase::ingredient::{GetIngredientUseCase, SearchIngredientsUseCase};

// ── GET /ingredients ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientSearchQuery {
    pub name: Option<String>,
}

pub async fn search_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientSearchQuery>,
) -> Result<Json<Vec<IngredientView>>, RecipesServiceError> {
    let usecase = SearchIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = usecase.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients.into_iter().map(IngredientView::from).collect(),
    ))
}

// ── GET /ingredients/{id} ────────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientView>, RecipesServiceError> {
    let usecase = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}
