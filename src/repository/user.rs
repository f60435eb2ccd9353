use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::{
    domain::user::{
        NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
        UserListQuery,
    },
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, UserReader, UserWriter, like_pattern},
    schema::{product_characteristics, product_images, products, users},
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<DomainUser>> {
        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id.to_string()))
            .filter(users::deleted_at.is_null())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(DomainUser::try_from).transpose()?)
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<DomainUser>> {
        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.to_lowercase()))
            .filter(users::deleted_at.is_null())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(DomainUser::try_from).transpose()?)
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<DomainUser>)> {
        let mut conn = self.conn()?;

        let total = filtered_users(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_users(&query).order((users::created_at.desc(), users::id.asc()));

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let users = items
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(DomainUser::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, users))
    }
}

fn filtered_users(query: &UserListQuery) -> users::BoxedQuery<'_, Sqlite> {
    let mut items = users::table
        .filter(users::deleted_at.is_null())
        .into_boxed::<Sqlite>();

    if let Some(term) = query.search.as_ref() {
        let pattern = like_pattern(term);
        items = items.filter(
            users::name
                .like(pattern.clone())
                .escape('\\')
                .or(users::email.like(pattern).escape('\\')),
        );
    }

    items
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        let mut conn = self.conn()?;
        let db_new = DbNewUser::new(new_user, Utc::now().naive_utc());

        let created = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(DomainUser::try_from(created)?)
    }

    fn update_user(
        &self,
        user_id: Uuid,
        updates: &DomainUpdateUser,
    ) -> RepositoryResult<DomainUser> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateUser::from(updates);

        let target = users::table
            .filter(users::id.eq(user_id.to_string()))
            .filter(users::deleted_at.is_null());

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbUser>(&mut conn)?;

        Ok(DomainUser::try_from(updated)?)
    }

    fn soft_delete_user(&self, user_id: Uuid) -> RepositoryResult<()> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let user_id = user_id.to_string();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let now = Utc::now().naive_utc();

            let target = users::table
                .filter(users::id.eq(&user_id))
                .filter(users::deleted_at.is_null());

            let deleted = diesel::update(target)
                .set((users::deleted_at.eq(Some(now)), users::updated_at.eq(now)))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            let owned_products = products::table
                .filter(products::user_id.eq(&user_id))
                .filter(products::deleted_at.is_null())
                .select(products::id)
                .load::<String>(conn)?;

            if owned_products.is_empty() {
                return Ok(());
            }

            diesel::delete(
                product_characteristics::table
                    .filter(product_characteristics::product_id.eq_any(&owned_products)),
            )
            .execute(conn)?;
            diesel::delete(
                product_images::table.filter(product_images::product_id.eq_any(&owned_products)),
            )
            .execute(conn)?;
            diesel::update(products::table.filter(products::id.eq_any(&owned_products)))
                .set((
                    products::deleted_at.eq(Some(now)),
                    products::updated_at.eq(now),
                ))
                .execute(conn)?;

            Ok(())
        })
    }
}
