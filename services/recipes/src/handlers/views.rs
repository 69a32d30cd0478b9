//! JSON shapes shared by several endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{Ingredient, RecipeSummary, Tag};
use crate::state::AppState;
use crate::usecase::annotate::{AnnotatedRecipe, AnnotatedUser};
use crate::usecase::subscription::SubscriptionCard;

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl UserView {
    pub fn new(state: &AppState, annotated: AnnotatedUser) -> Self {
        let user = annotated.user;
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed: annotated.is_subscribed,
            avatar: user.avatar.map(|path| state.media_link(&path)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipeMinifiedView>,
    pub recipes_count: u64,
}

impl SubscriptionView {
    /// Cards are always for authors the viewer follows.
    pub fn new(state: &AppState, card: SubscriptionCard) -> Self {
        Self {
            user: UserView::new(
                state,
                AnnotatedUser {
                    user: card.user,
                    is_subscribed: true,
                },
            ),
            recipes: card
                .recipes
                .into_iter()
                .map(|r| RecipeMinifiedView::new(state, r))
                .collect(),
            recipes_count: card.recipes_count,
        }
    }
}

// ── Dictionaries ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TagView {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientView {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecipeIngredientView {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub id: i32,
    pub tags: Vec<TagView>,
    pub author: UserView,
    pub ingredients: Vec<RecipeIngredientView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeView {
    pub fn new(state: &AppState, annotated: AnnotatedRecipe) -> Self {
        let recipe = annotated.recipe;
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagView::from).collect(),
            author: UserView::new(state, annotated.author),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(|line| RecipeIngredientView {
                    id: line.ingredient.id,
                    name: line.ingredient.name,
                    measurement_unit: line.ingredient.measurement_unit,
                    amount: line.amount,
                })
                .collect(),
            is_favorited: annotated.is_favorited,
            is_in_shopping_cart: annotated.is_in_shopping_cart,
            name: recipe.name,
            image: state.media_link(&recipe.image),
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeMinifiedView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl RecipeMinifiedView {
    pub fn new(state: &AppState, summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            image: state.media_link(&summary.image),
            cooking_time: summary.cooking_time,
        }
    }
}
