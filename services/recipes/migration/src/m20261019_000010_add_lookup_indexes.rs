use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::AuthorId)
                    .name("idx_recipes_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::PublishedAt)
                    .name("idx_recipes_published_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(RecipeIngredients::Table)
                    .col(RecipeIngredients::IngredientId)
                    .name("idx_recipe_ingredients_ingredient_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Follows::Table)
                    .col(Follows::AuthorId)
                    .name("idx_follows_author_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_follows_author_id",
            "idx_recipe_ingredients_ingredient_id",
            "idx_recipes_published_at",
            "idx_recipes_author_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    AuthorId,
    PublishedAt,
}

#[derive(Iden)]
enum RecipeIngredients {
    Table,
    IngredientId,
}

#[derive(Iden)]
enum Follows {
    Table,
    AuthorId,
}
