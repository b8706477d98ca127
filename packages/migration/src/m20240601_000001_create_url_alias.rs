use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UrlAlias {
    Table,
    Id,
    Url,
    Alias,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The inline UNIQUE gets the Postgres name `url_alias_alias_key`,
        // which the backend matches on to report duplicate aliases.
        manager
            .create_table(
                Table::create()
                    .table(UrlAlias::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UrlAlias::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UrlAlias::Url).text().not_null())
                    .col(
                        ColumnDef::new(UrlAlias::Alias)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UrlAlias::Table).if_exists().to_owned())
            .await
    }
}
