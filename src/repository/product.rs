use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, NewProductCharacteristic as DomainNewProductCharacteristic,
        NewProductImage as DomainNewProductImage, Product as DomainProduct,
        ProductCharacteristic as DomainProductCharacteristic, ProductImage as DomainProductImage,
        ProductListQuery, UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct,
        ProductCharacteristic as DbProductCharacteristic, ProductImage as DbProductImage,
        UpdateProduct as DbUpdateProduct, characteristic_rows, image_rows,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductReader, ProductWriter, like_pattern},
    schema::{product_characteristics, product_images, products},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;

        let mut query = products::table
            .filter(products::id.eq(id.to_string()))
            .into_boxed::<Sqlite>();

        if !include_deleted {
            query = query.filter(products::deleted_at.is_null());
        }

        match query.first::<DbProduct>(&mut conn).optional()? {
            Some(db_product) => Ok(hydrate_products(&mut conn, vec![db_product])?.pop()),
            None => Ok(None),
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered_products(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items =
            filtered_products(&query).order((products::created_at.desc(), products::id.asc()));

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        Ok((total, hydrate_products(&mut conn, db_products)?))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let id = Uuid::new_v4().to_string();
            let db_new = DbNewProduct::new(&id, new_product, Utc::now().naive_utc());

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            insert_characteristics(conn, &id, &new_product.characteristics)?;
            insert_images(conn, &id, &new_product.images)?;

            hydrate_products(conn, vec![created])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(
        &self,
        product_id: Uuid,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let product_id = product_id.to_string();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateProduct::from(updates);

            let target = products::table
                .filter(products::id.eq(&product_id))
                .filter(products::deleted_at.is_null());

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            if let Some(characteristics) = &updates.characteristics {
                diesel::delete(
                    product_characteristics::table
                        .filter(product_characteristics::product_id.eq(&product_id)),
                )
                .execute(conn)?;
                insert_characteristics(conn, &product_id, characteristics)?;
            }

            if let Some(images) = &updates.images {
                diesel::delete(
                    product_images::table.filter(product_images::product_id.eq(&product_id)),
                )
                .execute(conn)?;
                insert_images(conn, &product_id, images)?;
            }

            hydrate_products(conn, vec![updated])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn soft_delete_product(&self, product_id: Uuid) -> RepositoryResult<()> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let product_id = product_id.to_string();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let now = Utc::now().naive_utc();

            let target = products::table
                .filter(products::id.eq(&product_id))
                .filter(products::deleted_at.is_null());

            let deleted = diesel::update(target)
                .set((
                    products::deleted_at.eq(Some(now)),
                    products::updated_at.eq(now),
                ))
                .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(
                product_characteristics::table
                    .filter(product_characteristics::product_id.eq(&product_id)),
            )
            .execute(conn)?;
            diesel::delete(product_images::table.filter(product_images::product_id.eq(&product_id)))
                .execute(conn)?;

            Ok(())
        })
    }
}

fn filtered_products(query: &ProductListQuery) -> products::BoxedQuery<'_, Sqlite> {
    let mut items = products::table.into_boxed::<Sqlite>();

    if !query.include_deleted {
        items = items.filter(products::deleted_at.is_null());
    }

    if let Some(user_id) = query.user_id {
        items = items.filter(products::user_id.eq(user_id.to_string()));
    }

    if let Some(category) = query.category.as_ref() {
        items = items.filter(products::category.eq(category));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = like_pattern(term);
        items = items.filter(
            products::name
                .like(pattern.clone())
                .escape('\\')
                .or(products::description.like(pattern).escape('\\')),
        );
    }

    items
}

fn insert_characteristics(
    conn: &mut SqliteConnection,
    product_id: &str,
    values: &[DomainNewProductCharacteristic],
) -> RepositoryResult<()> {
    if values.is_empty() {
        return Ok(());
    }

    diesel::insert_into(product_characteristics::table)
        .values(&characteristic_rows(product_id, values))
        .execute(conn)?;

    Ok(())
}

fn insert_images(
    conn: &mut SqliteConnection,
    product_id: &str,
    values: &[DomainNewProductImage],
) -> RepositoryResult<()> {
    if values.is_empty() {
        return Ok(());
    }

    diesel::insert_into(product_images::table)
        .values(&image_rows(product_id, values))
        .execute(conn)?;

    Ok(())
}

/// Convert product rows into aggregates, loading every child collection
/// with one query per child table.
fn hydrate_products(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    let product_ids: Vec<&str> = db_products.iter().map(|p| p.id.as_str()).collect();
    let mut characteristics = load_characteristics_for_products(conn, &product_ids)?;
    let mut images = load_images_for_products(conn, &product_ids)?;

    let mut domain_products = Vec::with_capacity(db_products.len());
    for db_product in db_products {
        let key = db_product.id.clone();
        let mut domain = DomainProduct::try_from(db_product)?;
        domain.characteristics = characteristics.remove(&key).unwrap_or_default();
        domain.images = images.remove(&key).unwrap_or_default();
        domain_products.push(domain);
    }

    Ok(domain_products)
}

fn load_characteristics_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[&str],
) -> RepositoryResult<HashMap<String, Vec<DomainProductCharacteristic>>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_characteristics::table
        .filter(product_characteristics::product_id.eq_any(product_ids.iter().copied()))
        .order((
            product_characteristics::product_id.asc(),
            product_characteristics::position.asc(),
        ))
        .load::<DbProductCharacteristic>(conn)?;

    let mut map: HashMap<String, Vec<DomainProductCharacteristic>> = HashMap::new();
    for row in rows {
        let key = row.product_id.clone();
        map.entry(key).or_default().push(row.try_into()?);
    }

    Ok(map)
}

fn load_images_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[&str],
) -> RepositoryResult<HashMap<String, Vec<DomainProductImage>>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_images::table
        .filter(product_images::product_id.eq_any(product_ids.iter().copied()))
        .order((product_images::product_id.asc(), product_images::position.asc()))
        .load::<DbProductImage>(conn)?;

    let mut map: HashMap<String, Vec<DomainProductImage>> = HashMap::new();
    for row in rows {
        let key = row.product_id.clone();
        map.entry(key).or_default().push(row.try_into()?);
    }

    Ok(map)
}
