use actix_web::{web, HttpResponse};
use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::delete_book,
    utils::{get_pooled_connection, DbPool}
};

use super::BookRouteError;

// Books that appear in past orders can't be removed
#[tracing::instrument(
    "Deleting book from catalog",
    skip(pool, _admin)
)]
pub async fn delete_book_by_id(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _admin: IsAdmin
) -> Result<HttpResponse, BookRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    delete_book(conn, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
