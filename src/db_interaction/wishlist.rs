use std::{error::Error, fmt::Debug};

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::Quantity,
    models::{Book, CartItem, WishlistItem},
    schema::{books, wishlist_items},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

use super::{books::book_exists, cart::upsert_cart_line};

#[derive(Serialize, Deserialize, Debug)]
pub struct WishlistLine{
    pub wishlist_item_id: Uuid,
    pub added_at: DateTime<Utc>,
    pub book: Book
}

#[derive(Error)]
pub enum WishlistError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] DieselError),
    #[error("book_id: {0} doesn't exist")]
    NoBookError(Uuid),
    #[error("wishlist item: {0} doesn't exist")]
    NoWishlistItemError(Uuid)
}

impl Debug for WishlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Getting wishlist of user",
    skip(conn)
)]
pub async fn get_wishlist(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<Vec<WishlistLine>, WishlistError>{
    let rows = spawn_blocking_with_tracing(move || {
        wishlist_items::table
            .inner_join(books::table)
            .filter(wishlist_items::user_id.eq(user_id))
            .order((wishlist_items::created_at.desc(), wishlist_items::wishlist_item_id.asc()))
            .select((WishlistItem::as_select(), Book::as_select()))
            .load::<(WishlistItem, Book)>(&mut conn)
    })
    .await??;

    Ok(rows.into_iter()
        .map(|(item, book)| WishlistLine{
            wishlist_item_id: item.wishlist_item_id,
            added_at: item.created_at,
            book
        })
        .collect())
}

// Saving a book twice keeps the first row and returns it
#[tracing::instrument(
    "Adding book to wishlist",
    skip(conn)
)]
pub async fn add_to_wishlist(
    mut conn: DbConnection,
    user_id: Uuid,
    book_id: Uuid
) -> Result<WishlistItem, WishlistError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<WishlistItem, WishlistError, _>(|conn| {
            if !book_exists(conn, book_id)? {
                return Err(WishlistError::NoBookError(book_id))
            }

            let item = WishlistItem{
                wishlist_item_id: Uuid::new_v4(),
                user_id,
                book_id,
                created_at: Utc::now()
            };

            diesel::insert_into(wishlist_items::table)
                .values(&item)
                .on_conflict((wishlist_items::user_id, wishlist_items::book_id))
                .do_nothing()
                .execute(conn)?;

            let stored = wishlist_items::table
                .filter(wishlist_items::user_id.eq(user_id))
                .filter(wishlist_items::book_id.eq(book_id))
                .select(WishlistItem::as_select())
                .first::<WishlistItem>(conn)?;

            Ok(stored)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Removing item from wishlist",
    skip(conn)
)]
pub async fn remove_from_wishlist(
    mut conn: DbConnection,
    user_id: Uuid,
    wishlist_item_id: Uuid
) -> Result<(), WishlistError>{
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(wishlist_items::table)
            .filter(wishlist_items::wishlist_item_id.eq(wishlist_item_id))
            .filter(wishlist_items::user_id.eq(user_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(WishlistError::NoWishlistItemError(wishlist_item_id))
    }

    Ok(())
}

// Removes the wishlist row and puts its book in the cart, or neither
#[tracing::instrument(
    "Moving wishlist item to cart",
    skip(conn)
)]
pub async fn move_to_cart(
    mut conn: DbConnection,
    user_id: Uuid,
    wishlist_item_id: Uuid
) -> Result<CartItem, WishlistError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<CartItem, WishlistError, _>(|conn| {
            let removed = diesel::delete(wishlist_items::table)
                .filter(wishlist_items::wishlist_item_id.eq(wishlist_item_id))
                .filter(wishlist_items::user_id.eq(user_id))
                .returning(WishlistItem::as_returning())
                .get_result::<WishlistItem>(conn)
                .optional()?
                .ok_or(WishlistError::NoWishlistItemError(wishlist_item_id))?;

            Ok(upsert_cart_line(conn, user_id, removed.book_id, Quantity::one())?)
        })
    })
    .await??;

    Ok(res)
}
