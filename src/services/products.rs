use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::pagination::{Page, Pagination};
use crate::repository::{ProductReader, ProductWriter, UserReader};
use crate::services::users::require_active_user;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string matched against name and description.
    pub search: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
    /// Restrict the listing to one owner.
    pub owner_id: Option<Uuid>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Lists active products matching the query.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Page<Product>>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery {
        search,
        category,
        owner_id,
        page,
        per_page,
    } = query;

    let pagination = Pagination::new(page, per_page);
    let mut list_query = ProductListQuery::new().paginate(pagination);

    if let Some(term) = search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }

    if let Some(category) = category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
    {
        list_query = list_query.category(category);
    }

    if let Some(owner_id) = owner_id {
        list_query = list_query.owned_by(owner_id);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    Ok(Page::new(items, pagination, total))
}

/// Loads one active product with its characteristics and images.
pub fn get_product<R>(repo: &R, product_id: Uuid) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id, false)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product owned by the requester.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + UserReader + ?Sized,
{
    require_active_user(repo, user)?;

    let new_product = form
        .into_new_product(user.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;
    log::info!("User {} created product {}", user.id, created.id);

    Ok(created)
}

/// Applies a patch to a product the requester owns.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: Uuid,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + UserReader + ?Sized,
{
    require_active_user(repo, user)?;
    load_owned_product(repo, user, product_id)?;

    let update = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, &update)
        .map_err(ServiceError::from)
}

/// Soft-deletes a product the requester owns.
pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, product_id: Uuid) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + UserReader + ?Sized,
{
    require_active_user(repo, user)?;
    load_owned_product(repo, user, product_id)?;

    repo.soft_delete_product(product_id)
        .map_err(ServiceError::from)?;
    log::info!("User {} deleted product {product_id}", user.id);

    Ok(())
}

fn load_owned_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: Uuid,
) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product = get_product(repo, product_id)?;

    if !product.is_owned_by(user.id) {
        log::warn!(
            "User {} attempted to modify product {product_id} owned by {}",
            user.id,
            product.user_id
        );
        return Err(ServiceError::Forbidden);
    }

    Ok(product)
}
