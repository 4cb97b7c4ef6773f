use actix_web::{web, HttpResponse};
use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    db_interaction::remove_from_cart,
    utils::{get_pooled_connection, DbPool}
};

use super::CartRouteError;

#[tracing::instrument(
    "Removing item from cart",
    skip(pool, uid)
)]
pub async fn delete_cart_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    uid: IsUser
) -> Result<HttpResponse, CartRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    remove_from_cart(conn, uid.0, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
