use std::{error::Error, fmt::Debug};

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{CategoryFilter, Page, PriceSort, SearchTerm},
    models::{Book, BookChangeset},
    schema::books,
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

// Catalog listing criteria, already validated
#[derive(Debug, Clone)]
pub struct BookFilter{
    pub search: Option<SearchTerm>,
    pub category: CategoryFilter,
    pub sort: PriceSort,
    pub page: Page
}

#[derive(Debug, Clone, Copy)]
pub enum BookFlag{
    Featured,
    Trending
}

#[derive(Error)]
pub enum BookQueryError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] DieselError),
    #[error("book_id: {0} doesn't exist")]
    NoBookError(Uuid),
    #[error("book_id: {0} is part of existing orders")]
    BookInOrdersError(Uuid)
}

impl Debug for BookQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Getting filtered books from db",
    skip(conn)
)]
pub async fn list_books(
    mut conn: DbConnection,
    filter: BookFilter
) -> Result<Vec<Book>, BookQueryError>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = books::table.into_boxed();

        if let Some(term) = &filter.search {
            let pattern = term.ilike_pattern();
            query = query.filter(
                books::title.ilike(pattern.clone())
                    .or(books::author.ilike(pattern))
            );
        }

        if let CategoryFilter::Only(category) = &filter.category {
            query = query.filter(books::category.eq(category.inner()));
        }

        query = match filter.sort {
            PriceSort::Asc => query.order(books::price_cents.asc()).then_order_by(books::title.asc()),
            PriceSort::Desc => query.order(books::price_cents.desc()).then_order_by(books::title.asc()),
            PriceSort::None => query.order(books::created_at.desc()).then_order_by(books::book_id.asc())
        };

        query
            .limit(filter.page.limit)
            .offset(filter.page.offset)
            .select(Book::as_select())
            .load::<Book>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting flagged books from db",
    skip(conn)
)]
pub async fn list_flagged_books(
    mut conn: DbConnection,
    flag: BookFlag,
    limit: i64
) -> Result<Vec<Book>, BookQueryError>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = books::table.into_boxed();

        query = match flag {
            BookFlag::Featured => query.filter(books::is_featured.eq(true)),
            BookFlag::Trending => query.filter(books::is_trending.eq(true))
        };

        query
            .order(books::created_at.desc())
            .limit(limit)
            .select(Book::as_select())
            .load::<Book>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting distinct categories from db",
    skip_all
)]
pub async fn list_categories(
    mut conn: DbConnection
) -> Result<Vec<String>, BookQueryError>{
    let res = spawn_blocking_with_tracing(move || {
        books::table
            .select(books::category)
            .distinct()
            .order(books::category.asc())
            .load::<String>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting book by id",
    skip(conn)
)]
pub async fn get_book(
    mut conn: DbConnection,
    book_id: Uuid
) -> Result<Book, BookQueryError>{
    let res = spawn_blocking_with_tracing(move || {
        books::table
            .find(book_id)
            .select(Book::as_select())
            .first::<Book>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or(BookQueryError::NoBookError(book_id))
}

#[tracing::instrument(
    "Inserting a book into db",
    skip_all,
    fields(book_id = %book.book_id)
)]
pub async fn insert_book(
    mut conn: DbConnection,
    book: Book
) -> Result<Book, BookQueryError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(books::table)
            .values(&book)
            .returning(Book::as_returning())
            .get_result::<Book>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating a book in db",
    skip(conn)
)]
pub async fn update_book(
    mut conn: DbConnection,
    book_id: Uuid,
    changes: BookChangeset
) -> Result<Book, BookQueryError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::update(books::table.find(book_id))
            .set(&changes)
            .returning(Book::as_returning())
            .get_result::<Book>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or(BookQueryError::NoBookError(book_id))
}

#[tracing::instrument(
    "Deleting a book from db",
    skip(conn)
)]
pub async fn delete_book(
    mut conn: DbConnection,
    book_id: Uuid
) -> Result<(), BookQueryError>{
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(books::table.find(book_id))
            .execute(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    BookQueryError::BookInOrdersError(book_id)
                },
                e => BookQueryError::QueryError(e)
            })
    })
    .await??;

    if affected_rows == 0 {
        return Err(BookQueryError::NoBookError(book_id))
    }

    Ok(())
}

pub(crate) fn book_exists(conn: &mut PgConnection, book_id: Uuid) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(books::table.find(book_id)))
        .get_result::<bool>(conn)
}
