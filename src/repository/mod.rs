use uuid::Uuid;

use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::user::{NewUser, UpdateUser, User, UserListQuery};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod product;
pub mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Substring pattern for a backslash-escaped `LIKE`. Wildcards in `term`
/// match themselves.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Read-only operations over product aggregates.
pub trait ProductReader {
    /// Fetch a product with its characteristics and images. Soft-deleted
    /// rows are only returned when `include_deleted` is set.
    fn get_product_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product aggregates.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: Uuid,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Mark the product deleted and drop its characteristics and images.
    fn soft_delete_product(&self, product_id: Uuid) -> RepositoryResult<()>;
}

/// Read-only operations over active users.
pub trait UserReader {
    fn get_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over users.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: Uuid, updates: &UpdateUser) -> RepositoryResult<User>;
    /// Mark the user deleted together with every product they still own.
    fn soft_delete_user(&self, user_id: Uuid) -> RepositoryResult<()>;
}
