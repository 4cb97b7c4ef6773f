use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::get_store_stats,
    routes::BookRouteError,
    utils::{get_pooled_connection, DbPool}
};

#[tracing::instrument(
    "Getting store stats",
    skip(pool, _admin)
)]
pub async fn get_stats(
    pool: web::Data<DbPool>,
    _admin: IsAdmin
) -> Result<HttpResponse, BookRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let stats = get_store_stats(conn).await?;

    Ok(HttpResponse::Ok().json(stats))
}
