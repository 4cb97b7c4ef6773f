use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    schema::{books, orders, users},
    telemetry::spawn_blocking_with_tracing,
    utils::DbConnection
};

use super::books::BookQueryError;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct StoreStats{
    pub total_books: i64,
    pub total_orders: i64,
    pub total_users: i64
}

#[tracing::instrument(
    "Counting store totals",
    skip(conn)
)]
pub async fn get_store_stats(
    mut conn: DbConnection
) -> Result<StoreStats, BookQueryError> {
    let res = spawn_blocking_with_tracing(move || -> QueryResult<StoreStats> {
        Ok(StoreStats{
            total_books: books::table.count().get_result(&mut conn)?,
            total_orders: orders::table.count().get_result(&mut conn)?,
            total_users: users::table.count().get_result(&mut conn)?
        })
    })
    .await??;

    Ok(res)
}
