mod admin;
mod books;
mod cart;
mod orders;
mod user;
mod wishlist;

pub use admin::{get_store_stats, StoreStats};
pub use books::{
    delete_book, get_book, insert_book, list_books, list_categories, list_flagged_books,
    update_book, BookFilter, BookFlag, BookQueryError
};
pub use cart::{
    add_to_cart, get_cart, remove_from_cart, update_cart_item, CartError, CartLine, CartView
};
pub use orders::{
    cancel_order, checkout, get_order_by_id, get_order_with_items, update_order_status,
    OrderError, OrderLine, OrderWithItems
};
pub use user::{
    get_user_from_email, get_user_profile_info, insert_user_into_database, UserInsertError,
    UserProfileInfo, UserQueryError
};
pub use wishlist::{
    add_to_wishlist, get_wishlist, move_to_cart, remove_from_wishlist, WishlistError, WishlistLine
};
