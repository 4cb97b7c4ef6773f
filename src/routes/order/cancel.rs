use actix_web::{web, HttpResponse};
use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    db_interaction::cancel_order,
    utils::{get_pooled_connection, DbPool}
};

use super::OrderRouteError;

#[tracing::instrument(
    "Cancelling order",
    skip(pool, uid)
)]
pub async fn cancel_order_by_id(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    uid: IsUser
) -> Result<HttpResponse, OrderRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let order = cancel_order(conn, path.into_inner(), uid.0).await?;

    Ok(HttpResponse::Ok().json(order))
}
