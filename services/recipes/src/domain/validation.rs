//! Recipe payload invariants.
//!
//! Checks run in a fixed order (tags, ingredients, amounts, image, cooking time,
//! name, text) and every violation is collected, so one response can tell the
//! client everything that is wrong with its payload.

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::types::IngredientAmount;

pub const MIN_COOKING_TIME: i64 = 1;
pub const MAX_COOKING_TIME: i64 = 32_000;
pub const MAX_RECIPE_NAME_LEN: usize = 256;

/// Ingredient amount as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(i64),
    Text(String),
}

impl RawAmount {
    /// Integer value after string coercion, or `None` if the text is not an integer.
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for RawAmount {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

#[derive(Debug, Clone)]
pub struct DraftIngredient {
    pub id: i32,
    pub amount: RawAmount,
}

/// Candidate recipe content before any storage lookups.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub tags: Vec<i32>,
    pub ingredients: Vec<DraftIngredient>,
    pub has_image: bool,
    pub cooking_time: Option<i64>,
    pub name: String,
    pub text: String,
}

/// Draft content that passed every local check, with amounts coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecipe {
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeViolation {
    #[error("at least one tag is required")]
    EmptyTags,
    #[error("tag {0} is listed more than once")]
    DuplicateTag(i32),
    #[error("at least one ingredient is required")]
    EmptyIngredients,
    #[error("ingredient {0} is listed more than once")]
    DuplicateIngredient(i32),
    #[error("amount of ingredient {0} must be an integer of at least 1")]
    InvalidAmount(i32),
    #[error("an image is required")]
    MissingImage,
    #[error("cooking time must be between 1 and 32000 minutes")]
    InvalidCookingTime,
    #[error("name must be 1 to 256 characters")]
    InvalidName,
    #[error("text is required")]
    EmptyText,
    #[error("tag {0} does not exist")]
    UnknownTag(i32),
    #[error("ingredient {0} does not exist")]
    UnknownIngredient(i32),
}

impl RecipeViolation {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTags | Self::DuplicateTag(_) | Self::UnknownTag(_) => "tags",
            Self::EmptyIngredients
            | Self::DuplicateIngredient(_)
            | Self::InvalidAmount(_)
            | Self::UnknownIngredient(_) => "ingredients",
            Self::MissingImage => "image",
            Self::InvalidCookingTime => "cooking_time",
            Self::InvalidName => "name",
            Self::EmptyText => "text",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyTags => "EMPTY_TAGS",
            Self::DuplicateTag(_) => "DUPLICATE_TAG",
            Self::EmptyIngredients => "EMPTY_INGREDIENTS",
            Self::DuplicateIngredient(_) => "DUPLICATE_INGREDIENT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::MissingImage => "MISSING_IMAGE",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::InvalidName => "INVALID_NAME",
            Self::EmptyText => "EMPTY_TEXT",
            Self::UnknownTag(_) => "UNKNOWN_TAG",
            Self::UnknownIngredient(_) => "UNKNOWN_INGREDIENT",
        }
    }
}

fn check_tags(tags: &[i32], out: &mut Vec<RecipeViolation>) {
    if tags.is_empty() {
        out.push(RecipeViolation::EmptyTags);
        return;
    }
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for &tag in tags {
        if !seen.insert(tag) && reported.insert(tag) {
            out.push(RecipeViolation::DuplicateTag(tag));
        }
    }
}

fn check_ingredients(
    ingredients: &[DraftIngredient],
    out: &mut Vec<RecipeViolation>,
) -> Vec<IngredientAmount> {
    if ingredients.is_empty() {
        out.push(RecipeViolation::EmptyIngredients);
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for ingredient in ingredients {
        if !seen.insert(ingredient.id) && reported.insert(ingredient.id) {
            out.push(RecipeViolation::DuplicateIngredient(ingredient.id));
        }
    }

    let mut coerced = Vec::with_capacity(ingredients.len());
    for ingredient in ingredients {
        match ingredient
            .amount
            .coerce()
            .filter(|n| *n >= 1)
            .and_then(|n| i32::try_from(n).ok())
        {
            Some(amount) => coerced.push(IngredientAmount {
                ingredient_id: ingredient.id,
                amount,
            }),
            None => out.push(RecipeViolation::InvalidAmount(ingredient.id)),
        }
    }
    coerced
}

/// Validate a draft, collecting every violation in check order.
pub fn validate_recipe(draft: &RecipeDraft) -> Result<ValidRecipe, Vec<RecipeViolation>> {
    let mut violations = Vec::new();

    check_tags(&draft.tags, &mut violations);
    let ingredients = check_ingredients(&draft.ingredients, &mut violations);

    if !draft.has_image {
        violations.push(RecipeViolation::MissingImage);
    }

    let cooking_time = draft
        .cooking_time
        .filter(|t| (MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(t));
    if cooking_time.is_none() {
        violations.push(RecipeViolation::InvalidCookingTime);
    }

    let name_len = draft.name.trim().chars().count();
    if name_len == 0 || name_len > MAX_RECIPE_NAME_LEN {
        violations.push(RecipeViolation::InvalidName);
    }
    if draft.text.trim().is_empty() {
        violations.push(RecipeViolation::EmptyText);
    }

    match cooking_time {
        Some(cooking_time) if violations.is_empty() => Ok(ValidRecipe {
            tag_ids: draft.tags.clone(),
            ingredients,
            // Range-checked above.
            cooking_time: cooking_time as i32,
        }),
        _ => Err(violations),
    }
}
