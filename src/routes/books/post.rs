use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::insert_book,
    domain::Category,
    models::Book,
    utils::{get_pooled_connection, DbPool}
};

use super::{non_empty, valid_price, BookRouteError};

#[derive(Deserialize, Debug)]
pub struct NewBookJson{
    pub title: String,
    pub author: String,
    pub price_cents: i64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_trending: bool
}

impl TryFrom<NewBookJson> for Book {
    type Error = BookRouteError;

    fn try_from(json: NewBookJson) -> Result<Self, Self::Error> {
        Ok(Book{
            book_id: Uuid::new_v4(),
            title: non_empty("title", json.title)?,
            author: non_empty("author", json.author)?,
            price_cents: valid_price(json.price_cents)?,
            category: Category::parse(json.category)
                .map_err(BookRouteError::ValidationError)?
                .inner(),
            description: json.description.trim().to_string(),
            image_url: json.image_url.filter(|url| !url.trim().is_empty()),
            is_featured: json.is_featured,
            is_trending: json.is_trending,
            created_at: Utc::now()
        })
    }
}

#[tracing::instrument(
    "Adding book to catalog",
    skip(pool, _admin)
)]
pub async fn post_book(
    pool: web::Data<DbPool>,
    json: web::Json<NewBookJson>,
    _admin: IsAdmin
) -> Result<HttpResponse, BookRouteError> {
    let book = Book::try_from(json.into_inner())?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let book = insert_book(conn, book).await?;

    Ok(HttpResponse::Created().json(book))
}
