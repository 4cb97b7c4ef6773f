mod admin;
mod authentication;
mod books;
mod cart;
mod health_check;
mod not_found;
mod order;
mod profile;
mod wishlist;

pub use admin::*;
pub use authentication::*;
pub use books::*;
pub use cart::*;
pub use health_check::*;
pub use not_found::*;
pub use order::*;
pub use profile::*;
pub use wishlist::*;
