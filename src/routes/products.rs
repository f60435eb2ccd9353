use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::products::{self as product_service, ProductsQuery};

#[get("/v1/products")]
pub async fn list_products(
    params: web::Query<ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::list_products(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list products"),
    }
}

#[get("/v1/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::get_product(repo.get_ref(), product_id.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => service_error_response(err, "load product"),
    }
}

#[post("/v1/products")]
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match product_service::create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => service_error_response(err, "create product"),
    }
}

#[put("/v1/products/{product_id}")]
pub async fn update_product(
    product_id: web::Path<Uuid>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    match product_service::update_product(
        repo.get_ref(),
        &user,
        product_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => service_error_response(err, "update product"),
    }
}

#[delete("/v1/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<Uuid>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::delete_product(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err, "delete product"),
    }
}
