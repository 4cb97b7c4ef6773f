mod delete;
mod get;
mod move_to_cart;
mod post;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{db_interaction::WishlistError, utils::{error_fmt_chain, json_error_response}};

pub use delete::*;
pub use get::*;
pub use move_to_cart::*;
pub use post::*;

#[derive(Error)]
pub enum WishlistRouteError{
    #[error(transparent)]
    QueryError(#[from] WishlistError),
    #[error("Failed due to internal error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for WishlistRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for WishlistRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            WishlistRouteError::QueryError(WishlistError::NoBookError(_))
            | WishlistRouteError::QueryError(WishlistError::NoWishlistItemError(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error_response(self)
    }
}
