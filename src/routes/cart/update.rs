use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    db_interaction::update_cart_item,
    domain::Quantity,
    utils::{get_pooled_connection, DbPool}
};

use super::CartRouteError;

#[derive(Deserialize, Debug)]
pub struct UpdateCartItemJson{
    pub quantity: i32
}

#[tracing::instrument(
    "Updating quantity of cart item",
    skip(pool, uid)
)]
pub async fn update_cart_item_by_id(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    json: web::Json<UpdateCartItemJson>,
    uid: IsUser
) -> Result<HttpResponse, CartRouteError> {
    let quantity = Quantity::parse(json.quantity)
        .map_err(CartRouteError::ValidationError)?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let item = update_cart_item(conn, uid.0, path.into_inner(), quantity).await?;

    Ok(HttpResponse::Ok().json(item))
}
