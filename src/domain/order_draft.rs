use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Book, CartItem, Order, OrderItem};

use super::{AmountOutOfRange, Money, OrderStatus};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OrderDraftError {
    #[error("cart is empty")]
    EmptyCart,
    #[error(transparent)]
    TotalOutOfRange(#[from] AmountOutOfRange)
}

/// The rows a checkout writes: one order and one item per cart line, each
/// item carrying the book price at the time of purchase.
#[derive(Debug)]
pub struct OrderDraft {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn from_cart(
        user_id: Uuid,
        lines: &[(CartItem, Book)],
        placed_at: DateTime<Utc>
    ) -> Result<OrderDraft, OrderDraftError> {
        if lines.is_empty() {
            return Err(OrderDraftError::EmptyCart);
        }

        let order_id = Uuid::new_v4();
        let items: Vec<OrderItem> = lines.iter()
            .map(|(cart_item, book)| OrderItem {
                order_item_id: Uuid::new_v4(),
                order_id,
                book_id: book.book_id,
                quantity: cart_item.quantity,
                price_cents: book.price_cents
            })
            .collect();

        let line_totals = items.iter()
            .map(|item| Money::from_cents(item.price_cents).try_mul(item.quantity))
            .collect::<Result<Vec<Money>, AmountOutOfRange>>()?;
        let total = Money::try_sum(line_totals)?;

        let order = Order {
            order_id,
            user_id,
            total_cents: total.cents(),
            status: OrderStatus::Pending.as_str().to_string(),
            created_at: placed_at
        };

        Ok(OrderDraft { order, items })
    }
}
