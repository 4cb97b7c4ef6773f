use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    db_interaction::add_to_cart,
    domain::Quantity,
    utils::{get_pooled_connection, DbPool}
};

use super::CartRouteError;

#[derive(Deserialize, Debug)]
pub struct AddToCartJson{
    pub book_id: Uuid,
    pub quantity: Option<i32>
}

#[tracing::instrument(
    "Adding book to cart",
    skip(pool, uid)
)]
pub async fn post_cart_item(
    pool: web::Data<DbPool>,
    json: web::Json<AddToCartJson>,
    uid: IsUser
) -> Result<HttpResponse, CartRouteError> {
    let quantity = match json.quantity {
        Some(q) => Quantity::parse(q).map_err(CartRouteError::ValidationError)?,
        None => Quantity::one()
    };

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let item = add_to_cart(conn, uid.0, json.book_id, quantity).await?;

    Ok(HttpResponse::Ok().json(item))
}
