use std::collections::{HashMap, HashSet};

use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict, Query, SelectStatement},
};
use uuid::Uuid;

use foodgram_core::sea_ext::{is_foreign_key_violation, is_unique_violation, lower_starts_with};
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_recipes_schema::{
    favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    tags, users,
};

use crate::domain::repository::{
    CollectionRepository, FollowRepository, IngredientRepository, RecipeRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{
    CartLine, Collection, Ingredient, IngredientAmount, NewRecipe, Recipe, RecipeChanges,
    RecipeFilter, RecipeIngredient, RecipeSummary, Tag, User,
};
use crate::domain::validation::RecipeViolation;
use crate::error::RecipesServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError> {
        let query = users::Entity::find().order_by_asc(users::Column::Username);
        let (models, count) = fetch_page(query, &self.db, page)
            .await
            .context("list users")?;
        Ok(Page::new(
            models.into_iter().map(user_from_model).collect(),
            count,
            page,
        ))
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            avatar: Set(user.avatar.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(RecipesServiceError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn set_avatar(
        &self,
        id: Uuid,
        avatar: Option<&str>,
    ) -> Result<(), RecipesServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::Avatar, Expr::value(avatar.map(str::to_owned)))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set user avatar")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

/// Run a count and a page fetch for `query` with page-number semantics.
async fn fetch_page<E>(
    query: sea_orm::Select<E>,
    db: &DatabaseConnection,
    page: PageRequest,
) -> Result<(Vec<E::Model>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    let PageRequest { page, limit } = page.clamped();
    let paginator = query.paginate(db, u64::from(limit));
    let count = paginator.num_items().await?;
    let models = paginator.fetch_page(u64::from(page - 1)).await?;
    Ok((models, count))
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn insert_if_absent(&self, name: &str, slug: &str) -> Result<bool, RecipesServiceError> {
        let inserted = tags::Entity::insert(tags::ActiveModel {
            name: Set(name.to_owned()),
            slug: Set(slug.to_owned()),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(tags::Column::Slug).do_nothing().to_owned())
        .exec_without_returning(&self.db)
        .await
        .context("insert tag")?;
        Ok(inserted > 0)
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(lower_starts_with(ingredients::Column::Name, prefix));
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::MeasurementUnit)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn insert_if_absent(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<bool, RecipesServiceError> {
        let inserted = ingredients::Entity::insert(ingredients::ActiveModel {
            name: Set(name.to_owned()),
            measurement_unit: Set(measurement_unit.to_owned()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                ingredients::Column::Name,
                ingredients::Column::MeasurementUnit,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert ingredient")?;
        Ok(inserted > 0)
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl DbRecipeRepository {
    /// Attach tag and ingredient sets with one query each, keeping the input order.
    async fn hydrate(
        &self,
        models: Vec<recipes::Model>,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        if models.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let tag_rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(tags::Entity)
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("load recipe tags")?;
        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (link, tag) in tag_rows {
            if let Some(tag) = tag {
                tags_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }

        let ingredient_rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("load recipe ingredients")?;
        let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        for (link, ingredient) in ingredient_rows {
            if let Some(ingredient) = ingredient {
                ingredients_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(RecipeIngredient {
                        ingredient: ingredient_from_model(ingredient),
                        amount: link.amount,
                    });
            }
        }

        Ok(models
            .into_iter()
            .map(|model| Recipe {
                tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
                ingredients: ingredients_by_recipe.remove(&model.id).unwrap_or_default(),
                id: model.id,
                author_id: model.author_id,
                name: model.name,
                text: model.text,
                image: model.image,
                cooking_time: model.cooking_time,
                short_code: model.short_code,
                published_at: model.published_at,
            })
            .collect())
    }

    async fn require(&self, id: i32) -> Result<Recipe, RecipesServiceError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("recipe {id} vanished after write").into())
    }

    /// Tags and ingredients from a failed write that no longer exist.
    async fn dangling_references(
        &self,
        tag_ids: &[i32],
        amounts: &[IngredientAmount],
    ) -> Result<Vec<RecipeViolation>, RecipesServiceError> {
        let known_tags: HashSet<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(tag_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("recheck recipe tags")?
            .into_iter()
            .collect();
        let known_ingredients: HashSet<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(amounts.iter().map(|a| a.ingredient_id)))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("recheck recipe ingredients")?
            .into_iter()
            .collect();

        let mut violations: Vec<RecipeViolation> = tag_ids
            .iter()
            .filter(|&&id| !known_tags.contains(&id))
            .map(|&id| RecipeViolation::UnknownTag(id))
            .collect();
        violations.extend(
            amounts
                .iter()
                .filter(|a| !known_ingredients.contains(&a.ingredient_id))
                .map(|a| RecipeViolation::UnknownIngredient(a.ingredient_id)),
        );
        Ok(violations)
    }

    /// Turn a foreign-key failure on a recipe write into the domain error it stands for.
    async fn reference_error(
        &self,
        tag_ids: &[i32],
        amounts: &[IngredientAmount],
        parent_gone: RecipesServiceError,
    ) -> RecipesServiceError {
        match self.dangling_references(tag_ids, amounts).await {
            Ok(violations) if violations.is_empty() => parent_gone,
            Ok(violations) => RecipesServiceError::Validation(violations),
            Err(e) => e,
        }
    }
}

fn transaction_db_err(err: &TransactionError<DbErr>) -> &DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(recipes::Column::Id.in_subquery(recipes_with_any_tag(
                &filter.tag_slugs,
            )));
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(recipes::Column::Id.in_subquery(
                Query::select()
                    .column(favorites::Column::RecipeId)
                    .from(favorites::Entity)
                    .and_where(Expr::col(favorites::Column::UserId).eq(user_id))
                    .to_owned(),
            ));
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(recipes::Column::Id.in_subquery(
                Query::select()
                    .column(shopping_carts::Column::RecipeId)
                    .from(shopping_carts::Entity)
                    .and_where(Expr::col(shopping_carts::Column::UserId).eq(user_id))
                    .to_owned(),
            ));
        }
        let query = query
            .order_by_desc(recipes::Column::PublishedAt)
            .order_by_desc(recipes::Column::Id);

        let (models, count) = fetch_page(query, &self.db, page)
            .await
            .context("list recipes")?;
        Ok(Page::new(self.hydrate(models).await?, count, page))
    }

    async fn list_summaries_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: Option<u64>,
    ) -> Result<HashMap<Uuid, Vec<RecipeSummary>>, RecipesServiceError> {
        if author_ids.is_empty() || limit == Some(0) {
            return Ok(HashMap::new());
        }
        // One query for the whole page of authors; the per-author cut happens here.
        let models = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.is_in(author_ids.iter().copied()))
            .order_by_asc(recipes::Column::AuthorId)
            .order_by_desc(recipes::Column::PublishedAt)
            .order_by_desc(recipes::Column::Id)
            .all(&self.db)
            .await
            .context("list recipes by authors")?;

        let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        let mut by_author: HashMap<Uuid, Vec<RecipeSummary>> = HashMap::new();
        for m in models {
            let summaries = by_author.entry(m.author_id).or_default();
            if summaries.len() < limit {
                summaries.push(RecipeSummary {
                    id: m.id,
                    name: m.name,
                    image: m.image,
                    cooking_time: m.cooking_time,
                });
            }
        }
        Ok(by_author)
    }

    async fn count_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, RecipesServiceError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(Debug, FromQueryResult)]
        struct AuthorCount {
            author_id: Uuid,
            recipes_count: i64,
        }

        let rows = recipes::Entity::find()
            .select_only()
            .column(recipes::Column::AuthorId)
            .column_as(Expr::col(recipes::Column::Id).count(), "recipes_count")
            .filter(recipes::Column::AuthorId.is_in(author_ids.iter().copied()))
            .group_by(recipes::Column::AuthorId)
            .into_model::<AuthorCount>()
            .all(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(rows
            .into_iter()
            .map(|row| (row.author_id, row.recipes_count.max(0) as u64))
            .collect())
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipesServiceError> {
        let result = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        author_id: Set(recipe.author_id),
                        name: Set(recipe.name),
                        text: Set(recipe.text),
                        image: Set(recipe.image),
                        cooking_time: Set(recipe.cooking_time),
                        short_code: Set(None),
                        published_at: Set(recipe.published_at),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    replace_sets(txn, model.id, &recipe.tag_ids, &recipe.ingredients).await?;
                    Ok(model.id)
                })
            })
            .await;
        let id = match result {
            Ok(id) => id,
            Err(e) if is_foreign_key_violation(transaction_db_err(&e)) => {
                return Err(self
                    .reference_error(
                        &recipe.tag_ids,
                        &recipe.ingredients,
                        RecipesServiceError::UserNotFound,
                    )
                    .await);
            }
            Err(e) => return Err(anyhow::Error::new(e).context("create recipe").into()),
        };
        self.require(id).await
    }

    async fn update(
        &self,
        id: i32,
        changes: &RecipeChanges,
    ) -> Result<Recipe, RecipesServiceError> {
        let result = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let result = recipes::Entity::update_many()
                        .col_expr(recipes::Column::Name, Expr::value(changes.name))
                        .col_expr(recipes::Column::Text, Expr::value(changes.text))
                        .col_expr(recipes::Column::Image, Expr::value(changes.image))
                        .col_expr(
                            recipes::Column::CookingTime,
                            Expr::value(changes.cooking_time),
                        )
                        .filter(recipes::Column::Id.eq(id))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    replace_sets(txn, id, &changes.tag_ids, &changes.ingredients).await?;
                    Ok(true)
                })
            })
            .await;
        let found = match result {
            Ok(found) => found,
            Err(e) if is_foreign_key_violation(transaction_db_err(&e)) => {
                return Err(self
                    .reference_error(
                        &changes.tag_ids,
                        &changes.ingredients,
                        RecipesServiceError::RecipeNotFound,
                    )
                    .await);
            }
            Err(e) => return Err(anyhow::Error::new(e).context("update recipe").into()),
        };
        if !found {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        self.require(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn find_id_by_short_code(&self, code: &str) -> Result<Option<i32>, RecipesServiceError> {
        let model = recipes::Entity::find()
            .filter(recipes::Column::ShortCode.eq(code))
            .one(&self.db)
            .await
            .context("find recipe by short code")?;
        Ok(model.map(|m| m.id))
    }

    async fn set_short_code(&self, id: i32, code: &str) -> Result<(), RecipesServiceError> {
        recipes::Entity::update_many()
            .col_expr(
                recipes::Column::ShortCode,
                Expr::value(Some(code.to_owned())),
            )
            .filter(recipes::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set recipe short code")?;
        Ok(())
    }
}

/// Recipe ids carrying at least one of `slugs`.
fn recipes_with_any_tag(slugs: &[String]) -> SelectStatement {
    Query::select()
        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
        .from(recipe_tags::Entity)
        .inner_join(
            tags::Entity,
            Expr::col((tags::Entity, tags::Column::Id))
                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
        )
        .and_where(Expr::col((tags::Entity, tags::Column::Slug)).is_in(slugs.iter().cloned()))
        .to_owned()
}

/// Overwrite a recipe's tag and ingredient sets.
async fn replace_sets(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    tag_ids: &[i32],
    amounts: &[IngredientAmount],
) -> Result<(), DbErr> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(txn)
        .await?;
    recipe_ingredients::Entity::delete_many()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .exec(txn)
        .await?;

    if !tag_ids.is_empty() {
        recipe_tags::Entity::insert_many(tag_ids.iter().map(|&tag_id| recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag_id),
        }))
        .exec_without_returning(txn)
        .await?;
    }
    if !amounts.is_empty() {
        recipe_ingredients::Entity::insert_many(amounts.iter().map(|a| {
            recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(a.ingredient_id),
                amount: Set(a.amount),
            }
        }))
        .exec_without_returning(txn)
        .await?;
    }
    Ok(())
}

// ── Collection repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCollectionRepository {
    pub db: DatabaseConnection,
}

impl CollectionRepository for DbCollectionRepository {
    async fn add(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let now = Utc::now();
        let inserted = match collection {
            Collection::Favorites => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        };
        match inserted {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(RecipesServiceError::RecipeNotFound),
            Err(e) => Err(anyhow::Error::new(e)
                .context("add recipe to collection")
                .into()),
        }
    }

    async fn remove(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let result = match collection {
            Collection::Favorites => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .context("remove recipe from collection")?;
        Ok(result.rows_affected > 0)
    }

    async fn contains_among(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = recipe_ids.iter().copied();
        let found: Vec<i32> = match collection {
            Collection::Favorites => favorites::Entity::find()
                .filter(favorites::Column::UserId.eq(user_id))
                .filter(favorites::Column::RecipeId.is_in(ids))
                .all(&self.db)
                .await
                .map(|rows| rows.into_iter().map(|r| r.recipe_id).collect::<Vec<_>>()),
            Collection::ShoppingCart => shopping_carts::Entity::find()
                .filter(shopping_carts::Column::UserId.eq(user_id))
                .filter(shopping_carts::Column::RecipeId.is_in(ids))
                .all(&self.db)
                .await
                .map(|rows| rows.into_iter().map(|r| r.recipe_id).collect::<Vec<_>>()),
        }
        .context("check collection membership")?;
        Ok(found.into_iter().collect())
    }

    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct CartRow {
            name: String,
            measurement_unit: String,
            amount: i32,
        }

        let rows = recipe_ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Name)
            .column(ingredients::Column::MeasurementUnit)
            .column(recipe_ingredients::Column::Amount)
            .join(
                JoinType::InnerJoin,
                recipe_ingredients::Relation::Ingredient.def(),
            )
            .filter(
                recipe_ingredients::Column::RecipeId.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(Expr::col(shopping_carts::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            )
            .into_model::<CartRow>()
            .all(&self.db)
            .await
            .context("load shopping cart lines")?;
        Ok(rows
            .into_iter()
            .map(|row| CartLine {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn add(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let inserted = follows::Entity::insert(follows::ActiveModel {
            follower_id: Set(follower_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::FollowerId, follows::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("add follow")?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .context("remove follow")?;
        Ok(result.rows_affected > 0)
    }

    async fn following_among(
        &self,
        follower_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        if author_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::AuthorId.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("check follows")?;
        Ok(rows.into_iter().map(|r| r.author_id).collect())
    }

    async fn list_following(
        &self,
        follower_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError> {
        let query = users::Entity::find()
            .filter(
                users::Column::Id.in_subquery(
                    Query::select()
                        .column(follows::Column::AuthorId)
                        .from(follows::Entity)
                        .and_where(Expr::col(follows::Column::FollowerId).eq(follower_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(users::Column::Username);
        let (models, count) = fetch_page(query, &self.db, page)
            .await
            .context("list followed users")?;
        Ok(Page::new(
            models.into_iter().map(user_from_model).collect(),
            count,
            page,
        ))
    }
}
