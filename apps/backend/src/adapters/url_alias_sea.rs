//! SeaORM adapter for the `url_alias` table.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DeleteResult, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::url_alias;

// Adapter functions return DbErr; the repo layer maps to DomainError.

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    url: &str,
    alias: &str,
) -> Result<Uuid, sea_orm::DbErr> {
    let id = Uuid::new_v4();
    let row = url_alias::ActiveModel {
        id: Set(id),
        url: Set(url.to_string()),
        alias: Set(alias.to_string()),
    };

    url_alias::Entity::insert(row)
        .exec_without_returning(conn)
        .await?;
    Ok(id)
}

pub async fn find_by_alias<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    alias: &str,
) -> Result<Option<url_alias::Model>, sea_orm::DbErr> {
    url_alias::Entity::find()
        .filter(url_alias::Column::Alias.eq(alias))
        .one(conn)
        .await
}

pub async fn delete_by_alias<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    alias: &str,
) -> Result<DeleteResult, sea_orm::DbErr> {
    url_alias::Entity::delete_many()
        .filter(url_alias::Column::Alias.eq(alias))
        .exec(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<url_alias::Model>, sea_orm::DbErr> {
    url_alias::Entity::find()
        .order_by_asc(url_alias::Column::Alias)
        .all(conn)
        .await
}
