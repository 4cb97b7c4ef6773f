mod delete;
mod get;
mod post;
mod update;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{db_interaction::CartError, utils::{error_fmt_chain, json_error_response}};

pub use delete::*;
pub use get::*;
pub use post::*;
pub use update::*;

#[derive(Error)]
pub enum CartRouteError{
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    QueryError(#[from] CartError),
    #[error("Failed due to internal error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for CartRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for CartRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            CartRouteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CartRouteError::QueryError(CartError::NoBookError(_))
            | CartRouteError::QueryError(CartError::NoCartItemError(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error_response(self)
    }
}
