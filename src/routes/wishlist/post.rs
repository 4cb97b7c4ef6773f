use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    db_interaction::add_to_wishlist,
    utils::{get_pooled_connection, DbPool}
};

use super::WishlistRouteError;

#[derive(Deserialize, Debug)]
pub struct AddToWishlistJson{
    pub book_id: Uuid
}

#[tracing::instrument(
    "Adding book to wishlist",
    skip(pool, uid)
)]
pub async fn post_wishlist_item(
    pool: web::Data<DbPool>,
    json: web::Json<AddToWishlistJson>,
    uid: IsUser
) -> Result<HttpResponse, WishlistRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let item = add_to_wishlist(conn, uid.0, json.book_id).await?;

    Ok(HttpResponse::Ok().json(item))
}
