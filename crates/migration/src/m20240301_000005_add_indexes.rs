use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Recipe: lookups by category
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_category")
                    .table(Recipe::Table)
                    .col(Recipe::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Recipe: lookups by author
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_author")
                    .table(Recipe::Table)
                    .col(Recipe::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_recipe_category").table(Recipe::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recipe_author").table(Recipe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Recipe { Table, CategoryId, AuthorId }
