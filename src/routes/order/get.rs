use actix_web::{web, HttpResponse};
use anyhow::Context;
use uuid::Uuid;

use crate::{
    auth::extractors::IsUser,
    configuration::CatalogSettings,
    db_interaction::{get_order_by_id, get_order_with_items},
    domain::Page,
    utils::{get_pooled_connection, DbPool, PageQuery}
};

use super::OrderRouteError;

#[tracing::instrument(
    "Getting list of orders",
    skip(pool, catalog, uid)
)]
pub async fn get_order(
    pool: web::Data<DbPool>,
    catalog: web::Data<CatalogSettings>,
    query: web::Query<PageQuery>,
    uid: IsUser
) -> Result<HttpResponse, OrderRouteError> {
    let page = Page::new(query.page, query.limit, &catalog)
        .map_err(OrderRouteError::ValidationError)?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let orders = get_order_with_items(conn, page, uid.0, uid.1).await?;

    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Getting order by id",
    skip(pool, uid)
)]
pub async fn get_single_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    uid: IsUser
) -> Result<HttpResponse, OrderRouteError> {
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let order = get_order_by_id(conn, path.into_inner(), uid.0, uid.1).await?;

    Ok(HttpResponse::Ok().json(order))
}
