use std::{error::Error, fmt::Debug};

use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::upsert::excluded;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{AmountOutOfRange, Money, Quantity},
    models::{Book, CartItem},
    schema::{books, cart_items},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

use super::books::book_exists;

// One cart row together with the book it refers to
#[derive(Serialize, Deserialize, Debug)]
pub struct CartLine{
    pub cart_item_id: Uuid,
    pub quantity: i32,
    pub line_total: Money,
    pub book: Book
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CartView{
    pub items: Vec<CartLine>,
    pub item_count: i64,
    pub total: Money
}

impl CartView {
    pub fn from_rows(rows: Vec<(CartItem, Book)>) -> Result<Self, AmountOutOfRange> {
        let items = rows.into_iter()
            .map(|(item, book)| -> Result<CartLine, AmountOutOfRange> {
                Ok(CartLine{
                    cart_item_id: item.cart_item_id,
                    quantity: item.quantity,
                    line_total: Money::from_cents(book.price_cents).try_mul(item.quantity)?,
                    book
                })
            })
            .collect::<Result<Vec<CartLine>, AmountOutOfRange>>()?;

        let item_count = items.iter().map(|line| i64::from(line.quantity)).sum();
        let total = Money::try_sum(items.iter().map(|line| line.line_total))?;

        Ok(CartView{ items, item_count, total })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Error)]
pub enum CartError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] DieselError),
    #[error("book_id: {0} doesn't exist")]
    NoBookError(Uuid),
    #[error("cart item: {0} doesn't exist")]
    NoCartItemError(Uuid),
    #[error("Cart total is out of range")]
    TotalError(#[from] AmountOutOfRange)
}

impl Debug for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Oldest lines first so the cart keeps the order books were added in
fn load_cart_rows(
    conn: &mut PgConnection,
    user_id: Uuid
) -> QueryResult<Vec<(CartItem, Book)>> {
    cart_items::table
        .inner_join(books::table)
        .filter(cart_items::user_id.eq(user_id))
        .order((cart_items::created_at.asc(), cart_items::cart_item_id.asc()))
        .select((CartItem::as_select(), Book::as_select()))
        .load::<(CartItem, Book)>(conn)
}

diesel::define_sql_function!(fn least(a: diesel::sql_types::Integer, b: diesel::sql_types::Integer) -> diesel::sql_types::Integer);

// Inserts the line, or adds to the quantity of the line already holding the book.
// A single statement, so concurrent adds of the same book both land.
pub(crate) fn upsert_cart_line(
    conn: &mut PgConnection,
    user_id: Uuid,
    book_id: Uuid,
    quantity: Quantity
) -> QueryResult<CartItem> {
    let item = CartItem{
        cart_item_id: Uuid::new_v4(),
        user_id,
        book_id,
        quantity: quantity.inner(),
        created_at: Utc::now()
    };

    diesel::insert_into(cart_items::table)
        .values(&item)
        .on_conflict((cart_items::user_id, cart_items::book_id))
        .do_update()
        .set(cart_items::quantity.eq(least(cart_items::quantity + excluded(cart_items::quantity), Quantity::MAX)))
        .returning(CartItem::as_returning())
        .get_result::<CartItem>(conn)
}

#[tracing::instrument(
    "Getting cart of user",
    skip(conn)
)]
pub async fn get_cart(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<CartView, CartError>{
    let rows = spawn_blocking_with_tracing(move || {
        load_cart_rows(&mut conn, user_id)
    })
    .await??;

    Ok(CartView::from_rows(rows)?)
}

// Adding a book that is already in the cart increases its quantity
#[tracing::instrument(
    "Adding book to cart",
    skip(conn)
)]
pub async fn add_to_cart(
    mut conn: DbConnection,
    user_id: Uuid,
    book_id: Uuid,
    quantity: Quantity
) -> Result<CartItem, CartError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<CartItem, CartError, _>(|conn| {
            if !book_exists(conn, book_id)? {
                return Err(CartError::NoBookError(book_id))
            }

            Ok(upsert_cart_line(conn, user_id, book_id, quantity)?)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Setting quantity of cart item",
    skip(conn)
)]
pub async fn update_cart_item(
    mut conn: DbConnection,
    user_id: Uuid,
    cart_item_id: Uuid,
    quantity: Quantity
) -> Result<CartItem, CartError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::update(cart_items::table)
            .filter(cart_items::cart_item_id.eq(cart_item_id))
            .filter(cart_items::user_id.eq(user_id))
            .set(cart_items::quantity.eq(quantity.inner()))
            .returning(CartItem::as_returning())
            .get_result::<CartItem>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or(CartError::NoCartItemError(cart_item_id))
}

// Only the owner's row is removed, someone else's id behaves as missing
#[tracing::instrument(
    "Removing item from cart",
    skip(conn)
)]
pub async fn remove_from_cart(
    mut conn: DbConnection,
    user_id: Uuid,
    cart_item_id: Uuid
) -> Result<(), CartError>{
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(cart_items::table)
            .filter(cart_items::cart_item_id.eq(cart_item_id))
            .filter(cart_items::user_id.eq(user_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(CartError::NoCartItemError(cart_item_id))
    }

    Ok(())
}
