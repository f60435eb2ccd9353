use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, delete, post, web};

use crate::forms::users::LoginForm;
use crate::repository::DieselRepository;
use crate::routes::{ErrorBody, service_error_response};
use crate::services::users as user_service;

#[post("/v1/session")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    let user = match user_service::authenticate(repo.get_ref(), form.into_inner()) {
        Ok(user) => user,
        Err(err) => return service_error_response(err, "log in"),
    };

    match Identity::login(&req.extensions(), user.id.to_string()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => {
            log::error!("Failed to start session for user {}: {err}", user.id);
            HttpResponse::InternalServerError().json(ErrorBody::new("internal server error"))
        }
    }
}

#[delete("/v1/session")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    HttpResponse::NoContent().finish()
}
