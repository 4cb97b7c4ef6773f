use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{
    auth::extractors::IsUser,
    db_interaction::checkout,
    utils::{get_pooled_connection, DbPool}
};

use super::OrderRouteError;

// Payment is simulated, placing the order is all checkout does
#[tracing::instrument(
    "Checking out cart",
    skip(pool, uid),
    fields(user_id = %uid.0)
)]
pub async fn post_checkout(
    pool: web::Data<DbPool>,
    uid: IsUser
) -> Result<HttpResponse, OrderRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let order = checkout(conn, uid.0).await?;

    Ok(HttpResponse::Created().json(order))
}
