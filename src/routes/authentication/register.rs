use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db_interaction::{insert_user_into_database, UserInsertError},
    domain::{PasswordPair, UserEmail},
    utils::{error_fmt_chain, get_pooled_connection, json_error_response, DbPool}
};

#[derive(Deserialize, Debug)]
pub struct RegistrationForm{
    email: String,
    password: SecretString,
    confirm_password: SecretString
}

#[derive(Error)]
pub enum RegisterError{
    #[error("{0}")]
    ValidationError(String),
    #[error("user already exists")]
    UserAlreadyExists(#[source] UserInsertError),
    #[error("unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for RegisterError{
    fn status_code(&self) -> StatusCode {
        match self {
            RegisterError::ValidationError(_) => StatusCode::BAD_REQUEST,
            RegisterError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            RegisterError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error_response(self)
    }
}

#[tracing::instrument(
    "User registration started",
    skip(pool, form),
    fields(email = %form.email)
)]
pub async fn register(
    form: web::Form<RegistrationForm>,
    pool: web::Data<DbPool>
) -> Result<HttpResponse, RegisterError> {
    let form = form.into_inner();

    let email = UserEmail::parse(form.email)
        .map_err(RegisterError::ValidationError)?;
    let password = PasswordPair::parse(form.password, form.confirm_password)
        .map_err(RegisterError::ValidationError)?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let user_id = insert_user_into_database(conn, email, password.into_secret())
        .await
        .map_err(|e| match e {
            UserInsertError::EmailNotUnique(_) => RegisterError::UserAlreadyExists(e),
            _ => RegisterError::UnexpectedError(anyhow::Error::new(e))
        })?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "user_id": user_id })))
}
