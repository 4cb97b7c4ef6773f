mod category;
mod money;
mod order_draft;
mod order_status;
mod pagination;
mod password_pair;
mod price;
mod price_sort;
mod quantity;
mod search_term;
mod user_email;

pub use category::{Category, CategoryFilter};
pub use money::{AmountOutOfRange, Money};
pub use order_draft::{OrderDraft, OrderDraftError};
pub use order_status::OrderStatus;
pub use pagination::Page;
pub use password_pair::PasswordPair;
pub use price::Price;
pub use price_sort::PriceSort;
pub use quantity::Quantity;
pub use search_term::SearchTerm;
pub use user_email::UserEmail;
