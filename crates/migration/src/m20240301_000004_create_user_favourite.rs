//! Create `user_favourite` join table.
//!
//! One row per (user, recipe) membership; the serial id keeps favouriting order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserFavourite::Table)
                    .if_not_exists()
                    .col(pk_auto(UserFavourite::Id))
                    .col(integer(UserFavourite::UserId).not_null())
                    .col(integer(UserFavourite::RecipeId).not_null())
                    .col(timestamp_with_time_zone(UserFavourite::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favourite_user")
                            .from(UserFavourite::Table, UserFavourite::UserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favourite_recipe")
                            .from(UserFavourite::Table, UserFavourite::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Membership semantics: a recipe appears at most once per user
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_favourite_user_recipe")
                    .table(UserFavourite::Table)
                    .col(UserFavourite::UserId)
                    .col(UserFavourite::RecipeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserFavourite::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserFavourite { Table, Id, UserId, RecipeId, CreatedAt }

#[derive(DeriveIden)]
enum AppUser { Table, Id }

#[derive(DeriveIden)]
enum Recipe { Table, Id }
