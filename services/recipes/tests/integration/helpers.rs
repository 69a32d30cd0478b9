use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest, paginate};
use foodgram_recipes::domain::repository::{
    CollectionRepository, FollowRepository, IngredientRepository, MediaStorage, RecipeRepository,
    TagRepository, UserRepository,
};
use foodgram_recipes::domain::types::{
    CartLine, Collection, DecodedImage, Ingredient, IngredientAmount, NewRecipe, Recipe,
    RecipeChanges, RecipeFilter, RecipeIngredient, RecipeSummary, Tag, User,
};
use foodgram_recipes::error::RecipesServiceError;

pub const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

// ── Store ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    pub favorites: Vec<(Uuid, i32)>,
    pub carts: Vec<(Uuid, i32)>,
    pub follows: Vec<(Uuid, Uuid)>,
    /// Recipes deleted by another request that reads issued earlier still return.
    pub detached: Vec<Recipe>,
    /// Number of recipe-preview queries issued.
    pub summary_queries: u32,
    next_recipe_id: i32,
}

impl Store {
    fn collection(&mut self, collection: Collection) -> &mut Vec<(Uuid, i32)> {
        match collection {
            Collection::Favorites => &mut self.favorites,
            Collection::ShoppingCart => &mut self.carts,
        }
    }

    fn hydrate_tags(&self, ids: &[i32]) -> Vec<Tag> {
        self.tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect()
    }

    fn hydrate_ingredients(&self, amounts: &[IngredientAmount]) -> Vec<RecipeIngredient> {
        amounts
            .iter()
            .filter_map(|a| {
                self.ingredients
                    .iter()
                    .find(|i| i.id == a.ingredient_id)
                    .map(|ingredient| RecipeIngredient {
                        ingredient: ingredient.clone(),
                        amount: a.amount,
                    })
            })
            .collect()
    }
}

/// In-memory implementation of every repository trait over one shared store.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    pub store: Arc<Mutex<Store>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the store for post-execution inspection.
    pub fn store_handle(&self) -> Arc<Mutex<Store>> {
        Arc::clone(&self.store)
    }

    pub fn add_user(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.store.lock().unwrap().users.push(User {
            id,
            email: format!("{username}@example.com"),
            username: username.into(),
            first_name: "Test".into(),
            last_name: "Cook".into(),
            avatar: None,
            created_at: Utc::now(),
        });
        id
    }

    pub fn add_tag(&self, id: i32, slug: &str) {
        self.store.lock().unwrap().tags.push(Tag {
            id,
            name: slug.to_uppercase(),
            slug: slug.into(),
        });
    }

    pub fn add_ingredient(&self, id: i32, name: &str, unit: &str) {
        self.store.lock().unwrap().ingredients.push(Ingredient {
            id,
            name: name.into(),
            measurement_unit: unit.into(),
        });
    }

    /// Store a recipe directly, bypassing validation.
    pub fn add_recipe(&self, author_id: Uuid, tag_ids: &[i32], amounts: &[(i32, i32)]) -> i32 {
        let ingredients: Vec<IngredientAmount> = amounts
            .iter()
            .map(|&(ingredient_id, amount)| IngredientAmount {
                ingredient_id,
                amount,
            })
            .collect();
        let mut store = self.store.lock().unwrap();
        store.next_recipe_id += 1;
        let id = store.next_recipe_id;
        let recipe = Recipe {
            id,
            author_id,
            name: format!("Recipe {id}"),
            text: "Mix and bake.".into(),
            image: format!("recipes/{id}.png"),
            cooking_time: 30,
            short_code: None,
            published_at: Utc::now() + Duration::seconds(i64::from(id)),
            tags: store.hydrate_tags(tag_ids),
            ingredients: store.hydrate_ingredients(&ingredients),
        };
        store.recipes.push(recipe);
        id
    }

    /// Delete `recipe_id` between a use case's lookup and its write.
    pub fn delete_concurrently(&self, recipe_id: i32) {
        let mut store = self.store.lock().unwrap();
        let (gone, kept): (Vec<Recipe>, Vec<Recipe>) =
            store.recipes.drain(..).partition(|r| r.id == recipe_id);
        store.recipes = kept;
        store.detached.extend(gone);
        store.favorites.retain(|&(_, r)| r != recipe_id);
        store.carts.retain(|&(_, r)| r != recipe_id);
    }
}

// ── UserRepository ───────────────────────────────────────────────────────────

impl UserRepository for MemoryRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError> {
        let mut users = self.store.lock().unwrap().users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(users, page))
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        if store
            .users
            .iter()
            .any(|u| u.id == user.id || u.email == user.email || u.username == user.username)
        {
            return Err(RecipesServiceError::UserAlreadyExists);
        }
        store.users.push(user.clone());
        Ok(())
    }

    async fn set_avatar(&self, id: Uuid, avatar: Option<&str>) -> Result<(), RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        if let Some(user) = store.users.iter_mut().find(|u| u.id == id) {
            user.avatar = avatar.map(str::to_owned);
        }
        Ok(())
    }
}

// ── TagRepository ────────────────────────────────────────────────────────────

impl TagRepository for MemoryRepo {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let mut tags = self.store.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        Ok(self.store.lock().unwrap().hydrate_tags(ids))
    }

    async fn insert_if_absent(&self, name: &str, slug: &str) -> Result<bool, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        if store.tags.iter().any(|t| t.slug == slug) {
            return Ok(false);
        }
        let id = store.tags.len() as i32 + 1;
        store.tags.push(Tag {
            id,
            name: name.into(),
            slug: slug.into(),
        });
        Ok(true)
    }
}

// ── IngredientRepository ─────────────────────────────────────────────────────

impl IngredientRepository for MemoryRepo {
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = store
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn insert_if_absent(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<bool, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        if store
            .ingredients
            .iter()
            .any(|i| i.name == name && i.measurement_unit == measurement_unit)
        {
            return Ok(false);
        }
        let id = store.ingredients.len() as i32 + 1;
        store.ingredients.push(Ingredient {
            id,
            name: name.into(),
            measurement_unit: measurement_unit.into(),
        });
        Ok(true)
    }
}

// ── RecipeRepository ─────────────────────────────────────────────────────────

impl RecipeRepository for MemoryRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .recipes
            .iter()
            .chain(&store.detached)
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        let mut recipes: Vec<Recipe> = store
            .recipes
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || r.tags.iter().any(|t| filter.tag_slugs.contains(&t.slug))
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| store.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                filter
                    .in_cart_of
                    .is_none_or(|u| store.carts.contains(&(u, r.id)))
            })
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        Ok(paginate(recipes, page))
    }

    async fn list_summaries_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: Option<u64>,
    ) -> Result<HashMap<Uuid, Vec<RecipeSummary>>, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        store.summary_queries += 1;
        let mut own: Vec<&Recipe> = store
            .recipes
            .iter()
            .filter(|r| author_ids.contains(&r.author_id))
            .collect();
        own.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        let limit = limit.map_or(usize::MAX, |l| l as usize);
        let mut by_author: HashMap<Uuid, Vec<RecipeSummary>> = HashMap::new();
        for recipe in own {
            let summaries = by_author.entry(recipe.author_id).or_default();
            if summaries.len() < limit {
                summaries.push(RecipeSummary::from(recipe));
            }
        }
        Ok(by_author)
    }

    async fn count_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        let mut counts = HashMap::new();
        for recipe in store.recipes.iter().filter(|r| author_ids.contains(&r.author_id)) {
            *counts.entry(recipe.author_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        store.next_recipe_id += 1;
        let created = Recipe {
            id: store.next_recipe_id,
            author_id: recipe.author_id,
            name: recipe.name.clone(),
            text: recipe.text.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
            short_code: None,
            published_at: recipe.published_at,
            tags: store.hydrate_tags(&recipe.tag_ids),
            ingredients: store.hydrate_ingredients(&recipe.ingredients),
        };
        store.recipes.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        changes: &RecipeChanges,
    ) -> Result<Recipe, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        let tags = store.hydrate_tags(&changes.tag_ids);
        let ingredients = store.hydrate_ingredients(&changes.ingredients);
        let recipe = store
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        recipe.name = changes.name.clone();
        recipe.text = changes.text.clone();
        recipe.image = changes.image.clone();
        recipe.cooking_time = changes.cooking_time;
        recipe.tags = tags;
        recipe.ingredients = ingredients;
        Ok(recipe.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        let before = store.recipes.len();
        store.recipes.retain(|r| r.id != id);
        let deleted = store.recipes.len() < before;
        if deleted {
            store.favorites.retain(|&(_, r)| r != id);
            store.carts.retain(|&(_, r)| r != id);
        }
        Ok(deleted)
    }

    async fn find_id_by_short_code(&self, code: &str) -> Result<Option<i32>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .recipes
            .iter()
            .find(|r| r.short_code.as_deref() == Some(code))
            .map(|r| r.id))
    }

    async fn set_short_code(&self, id: i32, code: &str) -> Result<(), RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        if let Some(recipe) = store.recipes.iter_mut().find(|r| r.id == id) {
            recipe.short_code = Some(code.to_owned());
        }
        Ok(())
    }
}

// ── CollectionRepository ─────────────────────────────────────────────────────

impl CollectionRepository for MemoryRepo {
    async fn add(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        if !store.recipes.iter().any(|r| r.id == recipe_id) {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        let rows = store.collection(collection);
        if rows.contains(&(user_id, recipe_id)) {
            return Ok(false);
        }
        rows.push((user_id, recipe_id));
        Ok(true)
    }

    async fn remove(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        let rows = store.collection(collection);
        let before = rows.len();
        rows.retain(|&pair| pair != (user_id, recipe_id));
        Ok(rows.len() < before)
    }

    async fn contains_among(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        Ok(store
            .collection(collection)
            .iter()
            .filter(|(u, r)| *u == user_id && recipe_ids.contains(r))
            .map(|&(_, r)| r)
            .collect())
    }

    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .carts
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, id)| store.recipes.iter().find(|r| r.id == *id))
            .flat_map(|r| r.ingredients.iter())
            .map(|line| CartLine {
                name: line.ingredient.name.clone(),
                measurement_unit: line.ingredient.measurement_unit.clone(),
                amount: line.amount,
            })
            .collect())
    }
}

// ── FollowRepository ─────────────────────────────────────────────────────────

impl FollowRepository for MemoryRepo {
    async fn add(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        if store.follows.contains(&(follower_id, author_id)) {
            return Ok(false);
        }
        store.follows.push((follower_id, author_id));
        Ok(true)
    }

    async fn remove(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let mut store = self.store.lock().unwrap();
        let before = store.follows.len();
        store.follows.retain(|&pair| pair != (follower_id, author_id));
        Ok(store.follows.len() < before)
    }

    async fn following_among(
        &self,
        follower_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .follows
            .iter()
            .filter(|(f, a)| *f == follower_id && author_ids.contains(a))
            .map(|&(_, a)| a)
            .collect())
    }

    async fn list_following(
        &self,
        follower_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError> {
        let store = self.store.lock().unwrap();
        let mut users: Vec<User> = store
            .follows
            .iter()
            .filter(|(f, _)| *f == follower_id)
            .filter_map(|(_, a)| store.users.iter().find(|u| u.id == *a).cloned())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(users, page))
    }
}

// ── MemoryMedia ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryMedia {
    pub files: Arc<Mutex<Vec<String>>>,
}

impl MemoryMedia {
    pub fn files_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.files)
    }
}

impl MediaStorage for MemoryMedia {
    async fn save(
        &self,
        folder: &str,
        image: &DecodedImage,
    ) -> Result<String, RecipesServiceError> {
        let mut files = self.files.lock().unwrap();
        let path = format!("{folder}/{}.{}", Uuid::new_v4(), image.extension);
        files.push(path.clone());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> Result<(), RecipesServiceError> {
        self.files.lock().unwrap().retain(|p| p != path);
        Ok(())
    }
}
