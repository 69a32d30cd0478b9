use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::validation::RecipeViolation;

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("invalid recipe")]
    Validation(Vec<RecipeViolation>),
    #[error("invalid image")]
    InvalidImage,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid name")]
    InvalidName,
    #[error("missing data")]
    MissingData,
    #[error("recipe is already in favorites")]
    FavoriteAlreadyExists,
    #[error("recipe is already in the shopping cart")]
    CartItemAlreadyExists,
    #[error("already subscribed to this user")]
    AlreadySubscribed,
    #[error("cannot subscribe to yourself")]
    SelfFollow,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("recipe is not in the shopping cart")]
    CartItemNotFound,
    #[error("not subscribed to this user")]
    NotSubscribed,
    #[error("shopping cart is empty")]
    CartEmpty,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("short link not found")]
    ShortLinkNotFound,
    #[error("avatar not found")]
    AvatarNotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidName => "INVALID_NAME",
            Self::MissingData => "MISSING_DATA",
            Self::FavoriteAlreadyExists => "FAVORITE_ALREADY_EXISTS",
            Self::CartItemAlreadyExists => "CART_ITEM_ALREADY_EXISTS",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::SelfFollow => "SELF_FOLLOW",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::CartEmpty => "CART_EMPTY",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::ShortLinkNotFound => "SHORT_LINK_NOT_FOUND",
            Self::AvatarNotFound => "AVATAR_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidImage
            | Self::InvalidUsername
            | Self::InvalidEmail
            | Self::InvalidName
            | Self::MissingData
            | Self::FavoriteAlreadyExists
            | Self::CartItemAlreadyExists
            | Self::AlreadySubscribed
            | Self::SelfFollow
            | Self::UserAlreadyExists
            | Self::FavoriteNotFound
            | Self::CartItemNotFound
            | Self::NotSubscribed
            | Self::CartEmpty => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound
            | Self::UserNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::ShortLinkNotFound
            | Self::AvatarNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors; TraceLayer already records their status.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(ref violations) = self {
            body["errors"] = violations
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "field": v.field(),
                        "kind": v.kind(),
                        "message": v.to_string(),
                    })
                })
                .collect();
        }
        (status, axum::Json(body)).into_response()
    }
}
