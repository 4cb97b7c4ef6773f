use actix_web::{web, HttpResponse};
use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    db_interaction::move_to_cart,
    utils::{get_pooled_connection, DbPool}
};

use super::WishlistRouteError;

#[tracing::instrument(
    "Moving wishlist item to cart",
    skip(pool, uid)
)]
pub async fn move_wishlist_item_to_cart(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    uid: IsUser
) -> Result<HttpResponse, WishlistRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let cart_item = move_to_cart(conn, uid.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(cart_item))
}
