use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod products;
pub mod session;
pub mod users;

/// JSON body returned with every error status.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Translate a service failure into its HTTP status. `action` names what the
/// handler was doing and only shows up in the log.
pub fn service_error_response(err: ServiceError, action: &str) -> HttpResponse {
    let body = ErrorBody::new(err.to_string());
    match &err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::Forbidden => HttpResponse::Forbidden().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Form(_) => HttpResponse::UnprocessableEntity().json(body),
        ServiceError::Conflict => HttpResponse::Conflict().json(body),
        ServiceError::Internal(_) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("internal server error"))
        }
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

// A path segment that is not a UUID cannot name any record.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(ServiceError::NotFound.to_string());
        InternalError::from_response(err, HttpResponse::NotFound().json(body)).into()
    })
}

/// Register extractor settings and every `/v1` handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(products::list_products)
        .service(products::create_product)
        .service(products::show_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(users::register_user)
        .service(users::list_users)
        .service(users::show_current_user)
        .service(users::update_current_user)
        .service(users::delete_current_user)
        .service(session::login)
        .service(session::logout);
}
