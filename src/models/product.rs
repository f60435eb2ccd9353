use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::product::{
    NewProduct as DomainNewProduct, NewProductCharacteristic as DomainNewProductCharacteristic,
    NewProductImage as DomainNewProductImage, Product as DomainProduct,
    ProductCharacteristic as DomainProductCharacteristic, ProductImage as DomainProductImage,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub description: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub id: &'a str,
    pub user_id: String,
    pub name: &'a str,
    pub price: f64,
    pub quantity: i32,
    pub description: &'a str,
    pub category: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewProduct<'a> {
    pub fn new(id: &'a str, value: &'a DomainNewProduct, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id: value.user_id.to_string(),
            name: value.name.as_str(),
            price: value.price,
            quantity: value.quantity,
            description: value.description.as_str(),
            category: value.category.as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_characteristics)]
pub struct ProductCharacteristic {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_characteristics)]
pub struct NewProductCharacteristic<'a> {
    pub id: String,
    pub product_id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub position: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub url: String,
    pub description: String,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub id: String,
    pub product_id: &'a str,
    pub url: &'a str,
    pub description: &'a str,
    pub position: i32,
}

/// Number the payload rows by their index so reads can restore the order.
pub fn characteristic_rows<'a>(
    product_id: &'a str,
    values: &'a [DomainNewProductCharacteristic],
) -> Vec<NewProductCharacteristic<'a>> {
    values
        .iter()
        .zip(0..)
        .map(|(value, position)| NewProductCharacteristic {
            id: Uuid::new_v4().to_string(),
            product_id,
            name: value.name.as_str(),
            description: value.description.as_str(),
            position,
        })
        .collect()
}

/// Number the payload rows by their index so reads can restore the order.
pub fn image_rows<'a>(
    product_id: &'a str,
    values: &'a [DomainNewProductImage],
) -> Vec<NewProductImage<'a>> {
    values
        .iter()
        .zip(0..)
        .map(|(value, position)| NewProductImage {
            id: Uuid::new_v4().to_string(),
            product_id,
            url: value.url.as_str(),
            description: value.description.as_str(),
            position,
        })
        .collect()
}

impl TryFrom<Product> for DomainProduct {
    type Error = uuid::Error;

    fn try_from(value: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&value.id)?,
            user_id: Uuid::parse_str(&value.user_id)?,
            name: value.name,
            price: value.price,
            quantity: value.quantity,
            description: value.description,
            category: value.category,
            characteristics: Vec::new(),
            images: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
            deleted_at: value.deleted_at,
        })
    }
}

impl TryFrom<ProductCharacteristic> for DomainProductCharacteristic {
    type Error = uuid::Error;

    fn try_from(value: ProductCharacteristic) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&value.id)?,
            name: value.name,
            description: value.description,
        })
    }
}

impl TryFrom<ProductImage> for DomainProductImage {
    type Error = uuid::Error;

    fn try_from(value: ProductImage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&value.id)?,
            url: value.url,
            description: value.description,
        })
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            price: value.price,
            quantity: value.quantity,
            description: value.description.as_deref(),
            category: value.category.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
