use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::users::{EditUserForm, RegisterUserForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::users::{self as user_service, UsersQuery};

#[post("/v1/users")]
pub async fn register_user(
    repo: web::Data<DieselRepository>,
    form: web::Json<RegisterUserForm>,
) -> impl Responder {
    match user_service::register_user(repo.get_ref(), form.into_inner()) {
        Ok(user) => HttpResponse::Created().json(user),
        Err(err) => service_error_response(err, "register user"),
    }
}

/// Active users, paginated. Requires a session since the listing exposes
/// email addresses.
#[get("/v1/users")]
pub async fn list_users(
    params: web::Query<UsersQuery>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match user_service::list_users(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list users"),
    }
}

#[get("/v1/users/me")]
pub async fn show_current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match user_service::current_user(repo.get_ref(), &user) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => service_error_response(err, "load current user"),
    }
}

#[put("/v1/users/me")]
pub async fn update_current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditUserForm>,
) -> impl Responder {
    match user_service::update_current_user(repo.get_ref(), &user, form.into_inner()) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => service_error_response(err, "update current user"),
    }
}

#[delete("/v1/users/me")]
pub async fn delete_current_user(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match user_service::delete_current_user(repo.get_ref(), &user) {
        Ok(()) => {
            identity.logout();
            HttpResponse::NoContent().finish()
        }
        Err(err) => service_error_response(err, "delete current user"),
    }
}
