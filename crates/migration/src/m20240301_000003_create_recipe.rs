//! Create `recipe` table with FKs to `category` and `app_user`.
//!
//! Referenced categories and authors cannot be deleted while recipes point at them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(pk_auto(Recipe::Id))
                    .col(string_len(Recipe::Name, 255).not_null())
                    .col(text(Recipe::Description).not_null())
                    .col(text(Recipe::Ingredients).not_null())
                    .col(integer(Recipe::CategoryId).not_null())
                    .col(integer(Recipe::AuthorId).not_null())
                    .col(timestamp_with_time_zone(Recipe::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Recipe::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_category")
                            .from(Recipe::Table, Recipe::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_author")
                            .from(Recipe::Table, Recipe::AuthorId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Recipe::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Recipe { Table, Id, Name, Description, Ingredients, CategoryId, AuthorId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum AppUser { Table, Id }
