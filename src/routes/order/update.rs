use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::update_order_status,
    domain::OrderStatus,
    utils::{get_pooled_connection, DbPool}
};

use super::OrderRouteError;

#[derive(Deserialize, Debug)]
pub struct UpdateOrderStatusJson{
    pub status: OrderStatus
}

#[tracing::instrument(
    "Updating order status",
    skip(pool, _admin)
)]
pub async fn update_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    json: web::Json<UpdateOrderStatusJson>,
    _admin: IsAdmin
) -> Result<HttpResponse, OrderRouteError>{
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let order = update_order_status(conn, json.status, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(order))
}
