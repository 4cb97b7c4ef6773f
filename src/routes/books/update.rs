use actix_web::{web, HttpResponse};
use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::update_book,
    domain::Category,
    models::BookChangeset,
    utils::{get_pooled_connection, DbPool}
};

use super::{non_empty, valid_price, BookRouteError};

// Same rules as a new book, applied to the fields present
fn validate(changes: BookChangeset) -> Result<BookChangeset, BookRouteError> {
    if changes.is_empty() {
        return Err(BookRouteError::ValidationError("no fields to update".to_string()))
    }

    Ok(BookChangeset{
        title: changes.title.map(|t| non_empty("title", t)).transpose()?,
        author: changes.author.map(|a| non_empty("author", a)).transpose()?,
        price_cents: changes.price_cents.map(valid_price).transpose()?,
        category: changes.category
            .map(|c| Category::parse(c).map(|c| c.inner()))
            .transpose()
            .map_err(BookRouteError::ValidationError)?,
        description: changes.description.map(|d| d.trim().to_string()),
        ..changes
    })
}

#[tracing::instrument(
    "Updating book in catalog",
    skip(pool, _admin)
)]
pub async fn update_book_by_id(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    json: web::Json<BookChangeset>,
    _admin: IsAdmin
) -> Result<HttpResponse, BookRouteError> {
    let changes = validate(json.into_inner())?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let book = update_book(conn, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(book))
}
