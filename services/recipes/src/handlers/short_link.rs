use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;

use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::short_link::{GetShortLinkUseCase, ResolveShortLinkUseCase};

// ── GET /recipes/{id}/get-link ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

pub async fn get_short_link(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<ShortLinkResponse>, RecipesServiceError> {
    let usecase = GetShortLinkUseCase {
        recipes: state.recipe_repo(),
    };
    let code = usecase.execute(recipe_id).await?;
    Ok(Json(ShortLinkResponse {
        short_link: format!("{}/r/{code}/", state.public_url),
    }))
}

// ── GET /r/{code}/ ───────────────────────────────────────────────────────────

pub async fn resolve_short_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let usecase = ResolveShortLinkUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe_id = usecase.execute(&code).await?;
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, format!("/recipes/{recipe_id}/"))],
    ))
}
