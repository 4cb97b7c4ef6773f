use std::{collections::HashMap, error::Error, fmt::Debug};

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{AmountOutOfRange, Money, OrderDraft, OrderDraftError, OrderStatus, Page},
    models::{Book, CartItem, Order, OrderItem},
    schema::{books, cart_items, order_items, orders},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

// Struct to represent order item within OrderWithItems
#[derive(Serialize, Deserialize, Debug)]
pub struct OrderLine {
    pub order_item_id: Uuid,
    pub quantity: i32,
    pub price: Money,
    pub line_total: Money,
    pub book: Book,
}

// Struct to represent an order (with associated items)
#[derive(Serialize, Deserialize, Debug)]
pub struct OrderWithItems {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub total: Money,
    pub items: Vec<OrderLine>,
}

impl OrderWithItems {
    fn assemble(order: Order, lines: Vec<(OrderItem, Book)>) -> Result<Self, AmountOutOfRange> {
        let items = lines.into_iter()
            .map(|(item, book)| -> Result<OrderLine, AmountOutOfRange> {
                let price = Money::from_cents(item.price_cents);
                Ok(OrderLine {
                    order_item_id: item.order_item_id,
                    quantity: item.quantity,
                    price,
                    line_total: price.try_mul(item.quantity)?,
                    book
                })
            })
            .collect::<Result<Vec<OrderLine>, AmountOutOfRange>>()?;

        Ok(OrderWithItems {
            order_id: order.order_id,
            user_id: order.user_id,
            created_at: order.created_at,
            status: order.status,
            total: Money::from_cents(order.total_cents),
            items
        })
    }
}

#[derive(Error)]
pub enum OrderError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] DieselError),
    #[error(transparent)]
    DraftError(#[from] OrderDraftError),
    #[error("Order amount is out of range")]
    AmountError(#[from] AmountOutOfRange),
    #[error("order_id: {0} doesn't exist")]
    NoOrderIdError(Uuid),
    #[error("order_id: {0} is {1} and can no longer be cancelled")]
    NotCancellableError(Uuid, String)
}

impl Debug for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

/// Turns the user's cart into an order.
///
/// The order row, its items (with the book prices of this moment) and the
/// clearing of the cart commit together or not at all. Cart rows are locked
/// first, so a concurrent checkout of the same cart waits and then finds it
/// empty. Only the locked lines are ordered and removed; a line added while
/// the checkout runs stays in the cart.
#[tracing::instrument(
    "Checking out cart into a new order",
    skip(conn)
)]
pub async fn checkout(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<OrderWithItems, OrderError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let locked_ids = cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .select(cart_items::cart_item_id)
                .for_update()
                .load::<Uuid>(conn)?;

            let rows = cart_items::table
                .inner_join(books::table)
                .filter(cart_items::cart_item_id.eq_any(&locked_ids))
                .order((cart_items::created_at.asc(), cart_items::cart_item_id.asc()))
                .select((CartItem::as_select(), Book::as_select()))
                .load::<(CartItem, Book)>(conn)?;
            let draft = OrderDraft::from_cart(user_id, &rows, Utc::now())?;

            diesel::insert_into(orders::table)
                .values(&draft.order)
                .execute(conn)?;

            diesel::insert_into(order_items::table)
                .values(&draft.items)
                .execute(conn)?;

            let cleared = diesel::delete(cart_items::table)
                .filter(cart_items::cart_item_id.eq_any(&locked_ids))
                .execute(conn)?;
            tracing::info!(order_id = %draft.order.order_id, cleared, "Order placed and cart cleared");

            let lines = draft.items.into_iter()
                .zip(rows.into_iter().map(|(_, book)| book))
                .collect();

            Ok(OrderWithItems::assemble(draft.order, lines)?)
        })
    })
    .await??;

    Ok(res)
}

fn load_lines_for_orders(
    conn: &mut PgConnection,
    order_ids: Vec<Uuid>
) -> QueryResult<HashMap<Uuid, Vec<(OrderItem, Book)>>> {
    let lines = order_items::table
        .inner_join(books::table)
        .filter(order_items::order_id.eq_any(order_ids))
        .order((books::title.asc(), order_items::order_item_id.asc()))
        .select((OrderItem::as_select(), Book::as_select()))
        .load::<(OrderItem, Book)>(conn)?;

    let mut grouped: HashMap<Uuid, Vec<(OrderItem, Book)>> = HashMap::new();
    for (item, book) in lines {
        grouped.entry(item.order_id).or_default().push((item, book));
    }

    Ok(grouped)
}

/// Newest orders first. Admins see every user's orders.
#[tracing::instrument(
    "Getting order along with associated order_items",
    skip(conn)
)]
pub async fn get_order_with_items(
    mut conn: DbConnection,
    page: Page,
    user_id: Uuid,
    is_admin: bool
) -> Result<Vec<OrderWithItems>, OrderError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Vec<OrderWithItems>, OrderError, _>(|conn| {
            let mut query = orders::table.into_boxed();

            if !is_admin {
                query = query.filter(orders::user_id.eq(user_id));
            }

            let found = query
                .order(orders::created_at.desc())
                .then_order_by(orders::order_id.asc())
                .limit(page.limit)
                .offset(page.offset)
                .select(Order::as_select())
                .load::<Order>(conn)?;

            let order_ids = found.iter().map(|order| order.order_id).collect();
            let mut lines = load_lines_for_orders(conn, order_ids)?;

            let assembled = found.into_iter()
                .map(|order| {
                    let items = lines.remove(&order.order_id).unwrap_or_default();
                    OrderWithItems::assemble(order, items)
                })
                .collect::<Result<Vec<OrderWithItems>, AmountOutOfRange>>()?;

            Ok(assembled)
        })
    })
    .await??;

    Ok(res)
}

// Someone else's order is reported as missing unless the caller is admin
#[tracing::instrument(
    "Getting single order with items",
    skip(conn)
)]
pub async fn get_order_by_id(
    mut conn: DbConnection,
    order_id: Uuid,
    user_id: Uuid,
    is_admin: bool
) -> Result<OrderWithItems, OrderError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let mut query = orders::table
                .filter(orders::order_id.eq(order_id))
                .into_boxed();

            if !is_admin {
                query = query.filter(orders::user_id.eq(user_id));
            }

            let order = query
                .select(Order::as_select())
                .first::<Order>(conn)
                .optional()?
                .ok_or(OrderError::NoOrderIdError(order_id))?;

            let items = load_lines_for_orders(conn, vec![order_id])?
                .remove(&order_id)
                .unwrap_or_default();

            Ok(OrderWithItems::assemble(order, items)?)
        })
    })
    .await??;

    Ok(res)
}

// Function to perform update order status operation
#[tracing::instrument(
    "Updating order status",
    skip(conn)
)]
pub async fn update_order_status(
    mut conn: DbConnection,
    status: OrderStatus,
    order_id: Uuid
) -> Result<Order, OrderError> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::update(orders::table)
            .filter(orders::order_id.eq(order_id))
            .set(orders::status.eq(status.as_str()))
            .returning(Order::as_returning())
            .get_result::<Order>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or(OrderError::NoOrderIdError(order_id))
}

// Owners may cancel an order while it is still pending
#[tracing::instrument(
    "Cancelling order",
    skip(conn)
)]
pub async fn cancel_order(
    mut conn: DbConnection,
    order_id: Uuid,
    user_id: Uuid
) -> Result<Order, OrderError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Order, OrderError, _>(|conn| {
            let order = orders::table
                .filter(orders::order_id.eq(order_id))
                .filter(orders::user_id.eq(user_id))
                .select(Order::as_select())
                .for_update()
                .first::<Order>(conn)
                .optional()?
                .ok_or(OrderError::NoOrderIdError(order_id))?;

            if order.status != OrderStatus::Pending.as_str() {
                return Err(OrderError::NotCancellableError(order_id, order.status))
            }

            let cancelled = diesel::update(orders::table.find(order_id))
                .set(orders::status.eq(OrderStatus::Cancelled.as_str()))
                .returning(Order::as_returning())
                .get_result::<Order>(conn)?;

            Ok(cancelled)
        })
    })
    .await??;

    Ok(res)
}
