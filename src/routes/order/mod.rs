mod cancel;
mod get;
mod post;
mod update;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{db_interaction::OrderError, domain::OrderDraftError, utils::{error_fmt_chain, json_error_response}};

pub use cancel::*;
pub use get::*;
pub use post::*;
pub use update::*;

#[derive(Error)]
pub enum OrderRouteError{
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    QueryError(#[from] OrderError),
    #[error("Failed due to internal error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for OrderRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for OrderRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            OrderRouteError::ValidationError(_)
            | OrderRouteError::QueryError(OrderError::DraftError(OrderDraftError::EmptyCart)) => StatusCode::BAD_REQUEST,
            OrderRouteError::QueryError(OrderError::NoOrderIdError(_)) => StatusCode::NOT_FOUND,
            OrderRouteError::QueryError(OrderError::NotCancellableError(..)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error_response(self)
    }
}
