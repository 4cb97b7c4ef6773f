use actix_web::{web, HttpResponse};
use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    db_interaction::remove_from_wishlist,
    utils::{get_pooled_connection, DbPool}
};

use super::WishlistRouteError;

#[tracing::instrument(
    "Removing item from wishlist",
    skip(pool, uid)
)]
pub async fn delete_wishlist_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    uid: IsUser
) -> Result<HttpResponse, WishlistRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    remove_from_wishlist(conn, uid.0, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
