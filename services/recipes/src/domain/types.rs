use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User profile; the id is issued by the auth gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Media path of the uploaded avatar, relative to the media root.
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Recipe with its tag and ingredient sets hydrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    /// Media path of the recipe image, relative to the media root.
    pub image: String,
    pub cooking_time: i32,
    pub short_code: Option<String>,
    pub published_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Recipe columns without tag and ingredient sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Reference to an ingredient with a validated amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Content stored when a recipe is created.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
    pub published_at: DateTime<Utc>,
}

/// Full replacement of a recipe's mutable content.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Per-user recipe sets with identical toggle semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Favorites,
    ShoppingCart,
}

/// Recipe list filters. `tag_slugs` matches recipes carrying any of the slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
}

/// One ingredient row of one recipe in a user's cart, before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Image payload decoded from a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub extension: String,
}

pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_PERSON_NAME_LEN: usize = 150;
pub const MAX_EMAIL_LEN: usize = 254;

/// Usernames: 1–150 chars of letters, digits and `.@+-_`; `me` is reserved.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return false;
    }
    if username == "me" {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
}

pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && email.len() <= MAX_EMAIL_LEN
        && !email.chars().any(char::is_whitespace)
}

pub fn validate_person_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    len > 0 && len <= MAX_PERSON_NAME_LEN
}
