mod delete;
mod get;
mod post;
mod update;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{db_interaction::BookQueryError, domain::Price, utils::{error_fmt_chain, json_error_response}};

pub use delete::*;
pub use get::*;
pub use post::*;
pub use update::*;

#[derive(Error)]
pub enum BookRouteError{
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    QueryError(#[from] BookQueryError),
    #[error("Failed due to internal error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for BookRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for BookRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookRouteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            BookRouteError::QueryError(BookQueryError::NoBookError(_)) => StatusCode::NOT_FOUND,
            BookRouteError::QueryError(BookQueryError::BookInOrdersError(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error_response(self)
    }
}

// Trimmed value, or an error naming the empty field
fn non_empty(field: &str, value: String) -> Result<String, BookRouteError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookRouteError::ValidationError(format!("{} can't be empty", field)))
    }
    Ok(value.to_string())
}

fn valid_price(price_cents: i64) -> Result<i64, BookRouteError> {
    Price::parse(price_cents)
        .map(|price| price.cents())
        .map_err(BookRouteError::ValidationError)
}
