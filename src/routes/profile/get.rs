use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use thiserror::Error;

use crate::{
    auth::extractors::IsUser,
    db_interaction::{get_user_profile_info, UserQueryError},
    utils::{error_fmt_chain, get_pooled_connection, json_error_response, DbPool}
};

#[derive(Error)]
pub enum GetProfileError {
    #[error(transparent)]
    QueryError(#[from] UserQueryError),
    #[error("Unexpected Error Occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for GetProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for GetProfileError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetProfileError::QueryError(UserQueryError::NoUserError(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error_response(self)
    }
}

#[tracing::instrument(
    "Get profile data of logged in user",
    skip(pool, uid)
)]
pub async fn get_profile(
    pool: web::Data<DbPool>,
    uid: IsUser
) -> Result<HttpResponse, GetProfileError>{
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let user_profile_info = get_user_profile_info(conn, uid.0).await?;

    Ok(HttpResponse::Ok().json(user_profile_info))
}
