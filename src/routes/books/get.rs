use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    configuration::CatalogSettings,
    db_interaction::{get_book, list_books, list_categories, list_flagged_books, BookFilter, BookFlag},
    domain::{CategoryFilter, Page, PriceSort, SearchTerm},
    utils::{get_pooled_connection, DbPool}
};

use super::BookRouteError;

#[derive(Deserialize, Debug)]
pub struct GetBooksQuery{
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub sort: PriceSort,
    pub page: Option<i64>,
    pub limit: Option<i64>
}

#[derive(Deserialize, Debug)]
pub struct FlaggedBooksQuery{
    pub limit: Option<i64>
}

#[tracing::instrument(
    "Get catalog listing",
    skip(pool, catalog)
)]
pub async fn get_books(
    pool: web::Data<DbPool>,
    catalog: web::Data<CatalogSettings>,
    query: web::Query<GetBooksQuery>
) -> Result<HttpResponse, BookRouteError> {
    let query = query.into_inner();

    let filter = BookFilter{
        search: query.search
            .map(SearchTerm::parse)
            .transpose()
            .map_err(BookRouteError::ValidationError)?
            .flatten(),
        category: CategoryFilter::parse(query.category)
            .map_err(BookRouteError::ValidationError)?,
        sort: query.sort,
        page: Page::new(query.page, query.limit, &catalog)
            .map_err(BookRouteError::ValidationError)?
    };

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let books = list_books(conn, filter).await?;

    Ok(HttpResponse::Ok().json(books))
}

async fn get_flagged_books(
    pool: &DbPool,
    catalog: &CatalogSettings,
    flag: BookFlag,
    limit: Option<i64>
) -> Result<HttpResponse, BookRouteError> {
    let page = Page::new(None, limit, catalog)
        .map_err(BookRouteError::ValidationError)?;

    let conn = get_pooled_connection(pool)
        .await
        .context("Failed to get connection from pool")?;

    let books = list_flagged_books(conn, flag, page.limit).await?;

    Ok(HttpResponse::Ok().json(books))
}

#[tracing::instrument(
    "Get featured books",
    skip(pool, catalog)
)]
pub async fn get_featured_books(
    pool: web::Data<DbPool>,
    catalog: web::Data<CatalogSettings>,
    query: web::Query<FlaggedBooksQuery>
) -> Result<HttpResponse, BookRouteError> {
    get_flagged_books(&pool, &catalog, BookFlag::Featured, query.limit).await
}

#[tracing::instrument(
    "Get trending books",
    skip(pool, catalog)
)]
pub async fn get_trending_books(
    pool: web::Data<DbPool>,
    catalog: web::Data<CatalogSettings>,
    query: web::Query<FlaggedBooksQuery>
) -> Result<HttpResponse, BookRouteError> {
    get_flagged_books(&pool, &catalog, BookFlag::Trending, query.limit).await
}

#[tracing::instrument(
    "Get book by id",
    skip(pool)
)]
pub async fn get_book_by_id(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, BookRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let book = get_book(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(book))
}

#[tracing::instrument(
    "Get list of categories",
    skip(pool)
)]
pub async fn get_categories(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, BookRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    Ok(HttpResponse::Ok().json(list_categories(conn).await?))
}
