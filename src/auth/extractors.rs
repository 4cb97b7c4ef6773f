use actix_web::{error::InternalError, http::{header, StatusCode}, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::utils::json_error;

use super::jwt::{Claims, Tokenizer, UserRole};

// Extractor for admin role
pub struct IsAdmin(pub Uuid);

// Extractor for any logged in user, the flag tells whether they are admin
pub struct IsUser(pub Uuid, pub bool);

fn reject(status: StatusCode, message: &'static str) -> actix_web::Error {
    InternalError::from_response(message, json_error(status, message)).into()
}

fn bearer_claims(req: &HttpRequest) -> Result<Claims, actix_web::Error> {
    let tokenizer = req.app_data::<web::Data<Tokenizer>>()
        .ok_or_else(|| {
            tracing::error!("Tokenizer missing from app data");
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Failed due to internal error")
        })?;

    let auth = req.headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Missing token"))?;

    let token = auth.to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid token"))?;

    tokenizer.decode_key(token)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid token"))
}

impl FromRequest for IsAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(bearer_claims(req).and_then(|claims| {
            match claims.role {
                UserRole::ADMIN => Ok(IsAdmin(claims.sub)),
                UserRole::USER => Err(reject(StatusCode::FORBIDDEN, "Unauthorized Role"))
            }
        }))
    }
}

impl FromRequest for IsUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(bearer_claims(req).map(|claims| {
            match claims.role {
                UserRole::USER => IsUser(claims.sub, false),
                UserRole::ADMIN => IsUser(claims.sub, true)
            }
        }))
    }
}
