use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{
    auth::extractors::IsUser,
    db_interaction::get_cart,
    utils::{get_pooled_connection, DbPool}
};

use super::CartRouteError;

// An empty cart is answered with no lines and a zero total
#[tracing::instrument(
    "Get cart of logged in user",
    skip(pool, uid)
)]
pub async fn get_user_cart(
    pool: web::Data<DbPool>,
    uid: IsUser
) -> Result<HttpResponse, CartRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let cart = get_cart(conn, uid.0).await?;

    Ok(HttpResponse::Ok().json(cart))
}
