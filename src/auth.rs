//! Session identity and password handling.
//!
//! The session cookie managed by `actix-identity` stores the user's UUID.
//! [`AuthenticatedUser`] turns that cookie back into an id for handlers and
//! rejects the request with `401` when it is absent or malformed.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use uuid::Uuid;

use crate::routes::ErrorBody;

/// Requester resolved from the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

impl AuthenticatedUser {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticated_user(req))
    }
}

fn authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let id = req
        .get_identity()
        .ok()
        .and_then(|identity| identity.id().ok())
        .and_then(|id| Uuid::parse_str(&id).ok());

    match id {
        Some(id) => Ok(AuthenticatedUser::new(id)),
        None => {
            let message = "authentication required";
            Err(InternalError::from_response(
                message,
                HttpResponse::Unauthorized().json(ErrorBody::new(message)),
            )
            .into())
        }
    }
}

/// Hash `password` into an Argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string. Unparseable hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            log::warn!("Stored password hash could not be parsed: {err}");
            false
        }
    }
}
