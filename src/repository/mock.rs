use mockall::mock;
use uuid::Uuid;

use super::{ProductReader, ProductWriter, UserReader, UserWriter};
use crate::domain::{
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    user::{NewUser, UpdateUser, User, UserListQuery},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: Uuid, include_deleted: bool) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: Uuid, updates: &UpdateUser) -> RepositoryResult<User>;
        fn soft_delete_user(&self, user_id: Uuid) -> RepositoryResult<()>;
    }
}

mock! {
    /// Full repository surface for services that read and write several entities.
    pub Repository {}

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: Uuid, include_deleted: bool) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: Uuid, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn soft_delete_product(&self, product_id: Uuid) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: Uuid, updates: &UpdateUser) -> RepositoryResult<User>;
        fn soft_delete_user(&self, user_id: Uuid) -> RepositoryResult<()>;
    }
}
