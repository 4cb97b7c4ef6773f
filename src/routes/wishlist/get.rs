use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{
    auth::extractors::IsUser,
    db_interaction::get_wishlist,
    utils::{get_pooled_connection, DbPool}
};

use super::WishlistRouteError;

#[tracing::instrument(
    "Get wishlist of logged in user",
    skip(pool, uid)
)]
pub async fn get_user_wishlist(
    pool: web::Data<DbPool>,
    uid: IsUser
) -> Result<HttpResponse, WishlistRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    Ok(HttpResponse::Ok().json(get_wishlist(conn, uid.0).await?))
}
