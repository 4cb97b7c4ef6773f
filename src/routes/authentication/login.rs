use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    auth::jwt::Tokenizer,
    db_interaction::get_user_from_email,
    domain::UserEmail,
    password::verify_password,
    utils::{error_fmt_chain, get_pooled_connection, json_error_response, DbPool}
};

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: String,
    pub password: SecretString
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse{
    pub token: String
}

#[derive(Error)]
pub enum LoginError{
    #[error("{0}")]
    ValidationError(String),
    #[error("Email or password is incorrect")]
    InvalidCredentials,
    #[error("Failed to login")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for LoginError{
    fn status_code(&self) -> StatusCode {
        match self {
            LoginError::ValidationError(_) => StatusCode::BAD_REQUEST,
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error_response(self)
    }
}

#[tracing::instrument(
    "Logging in user",
    skip(pool, tokenizer, form),
    fields(email = %form.email)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Form<LoginForm>
) -> Result<HttpResponse, LoginError>{
    let form = form.into_inner();
    let email = UserEmail::parse(form.email)
        .map_err(LoginError::ValidationError)?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let user = match get_user_from_email(conn, email)
        .await
        .context("Failed to look up user")? {
        Some(user) => user,
        None => {
            tracing::info!("No user registered with this email");
            return Err(LoginError::InvalidCredentials)
        }
    };

    if !verify_password(form.password, user.password.clone()).await? {
        tracing::info!("Passwords did not match");
        return Err(LoginError::InvalidCredentials)
    }

    let token = tokenizer.generate_key(&user)
        .context("Failed to generate token")?;

    Ok(HttpResponse::Ok().json(LoginResponse{ token }))
}
