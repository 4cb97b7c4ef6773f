use std::{error::Error, fmt::Debug};

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::UserEmail,
    models::User,
    password::compute_password_hash,
    schema::{orders, users},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

// Query user by email, None when nobody registered with it
#[tracing::instrument(
    "Getting user from email",
    skip(conn)
)]
pub async fn get_user_from_email(
    mut conn: DbConnection,
    email: UserEmail
) -> Result<Option<User>, UserQueryError> {
    let res = spawn_blocking_with_tracing(move || {
        users::table
            .filter(users::email.eq(email.inner()))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
    })
    .await??;

    Ok(res)
}

// Error associated with inserting user to users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("email field is not unique")]
    EmailNotUnique(#[source] DieselError),
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("unexpected database / hashing error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(conn, password)
)]
pub async fn insert_user_into_database(
    mut conn: DbConnection,
    email: UserEmail,
    password: SecretString
) -> Result<Uuid, UserInsertError> {
    let password_hash = compute_password_hash(password).await?;

    let user = User{
        user_id: Uuid::new_v4(),
        email: email.inner(),
        password: password_hash.expose_secret().to_string(),
        is_admin: false,
        created_at: Utc::now()
    };
    let user_id = user.user_id;

    spawn_blocking_with_tracing(move || {
        diesel::insert_into(users::table)
            .values(&user)
            .execute(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    UserInsertError::EmailNotUnique(e)
                },
                e => UserInsertError::UnexpectedError(
                    anyhow::Error::new(e).context("Unexpected diesel / database error")
                )
            })
    })
    .await??;

    Ok(user_id)
}

// Account information shown on the profile page
#[derive(Serialize, Deserialize, Debug)]
pub struct UserProfileInfo{
    pub user_id: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub order_count: i64
}

#[derive(Error)]
pub enum UserQueryError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed due to database error")]
    QueryError(#[from] DieselError),
    #[error("user_id: {0} doesn't exist")]
    NoUserError(Uuid)
}

impl Debug for UserQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Get profile data of logged in user",
    skip(conn)
)]
pub async fn get_user_profile_info(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<UserProfileInfo, UserQueryError>{
    let res = spawn_blocking_with_tracing(move || -> Result<Option<UserProfileInfo>, DieselError> {
        let user = users::table
            .find(user_id)
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()?;

        let Some(user) = user else {
            return Ok(None)
        };

        let order_count = orders::table
            .filter(orders::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(Some(UserProfileInfo{
            user_id: user.user_id,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
            order_count
        }))
    })
    .await??;

    res.ok_or(UserQueryError::NoUserError(user_id))
}
