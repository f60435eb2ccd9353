use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, NewProductCharacteristic, NewProductImage, UpdateProduct};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Column width of the short text fields on `produtos`.
const TEXT_MAX_LEN: u64 = 100;
/// Column width of URLs and characteristic descriptions.
const LONG_TEXT_MAX_LEN: u64 = 255;
/// Maximum number of characteristics or images attached to one product.
const MAX_CHILDREN: u64 = 50;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required text field is empty after sanitization.
    #[error("`{0}` cannot be empty")]
    EmptyField(&'static str),
}

/// Characteristic entry inside a product payload.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProductCharacteristicForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = LONG_TEXT_MAX_LEN))]
    pub description: String,
}

impl ProductCharacteristicForm {
    fn into_domain(self) -> ProductFormResult<NewProductCharacteristic> {
        Ok(NewProductCharacteristic::new(
            required_inline("characteristics.name", &self.name)?,
            required_inline("characteristics.description", &self.description)?,
        ))
    }
}

/// Image entry inside a product payload.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProductImageForm {
    #[validate(url, length(max = LONG_TEXT_MAX_LEN))]
    pub url: String,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub description: String,
}

impl ProductImageForm {
    fn into_domain(self) -> ProductFormResult<NewProductImage> {
        Ok(NewProductImage::new(
            self.url.trim(),
            required_inline("images.description", &self.description)?,
        ))
    }
}

/// Body of `POST /v1/products`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub description: String,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = MAX_CHILDREN))]
    #[validate(nested)]
    pub characteristics: Vec<ProductCharacteristicForm>,
    #[serde(default)]
    #[validate(length(max = MAX_CHILDREN))]
    #[validate(nested)]
    pub images: Vec<ProductImageForm>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a `NewProduct` owned by `user_id`.
    pub fn into_new_product(self, user_id: Uuid) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let mut new_product = NewProduct::new(
            user_id,
            required_inline("name", &self.name)?,
            self.price,
            self.quantity,
        )
        .with_description(required_multiline("description", &self.description)?)
        .with_category(required_inline("category", &self.category)?);

        for characteristic in self.characteristics {
            new_product = new_product.with_characteristic(characteristic.into_domain()?);
        }

        for image in self.images {
            new_product = new_product.with_image(image.into_domain()?);
        }

        Ok(new_product)
    }
}

/// Body of `PUT /v1/products/{id}`. Absent fields are left unchanged;
/// a present `characteristics` or `images` list replaces the stored one.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub category: Option<String>,
    #[validate(length(max = MAX_CHILDREN))]
    #[validate(nested)]
    pub characteristics: Option<Vec<ProductCharacteristicForm>>,
    #[validate(length(max = MAX_CHILDREN))]
    #[validate(nested)]
    pub images: Option<Vec<ProductImageForm>>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into an `UpdateProduct` patch.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut update = UpdateProduct::new();

        if let Some(name) = self.name {
            update = update.name(required_inline("name", &name)?);
        }
        if let Some(price) = self.price {
            update = update.price(price);
        }
        if let Some(quantity) = self.quantity {
            update = update.quantity(quantity);
        }
        if let Some(description) = self.description {
            update = update.description(required_multiline("description", &description)?);
        }
        if let Some(category) = self.category {
            update = update.category(required_inline("category", &category)?);
        }
        if let Some(characteristics) = self.characteristics {
            let characteristics = characteristics
                .into_iter()
                .map(ProductCharacteristicForm::into_domain)
                .collect::<ProductFormResult<Vec<_>>>()?;
            update = update.characteristics(characteristics);
        }
        if let Some(images) = self.images {
            let images = images
                .into_iter()
                .map(ProductImageForm::into_domain)
                .collect::<ProductFormResult<Vec<_>>>()?;
            update = update.images(images);
        }

        Ok(update)
    }
}

fn required_inline(field: &'static str, value: &str) -> ProductFormResult<String> {
    let sanitized = sanitize_inline_text(value);
    if sanitized.is_empty() {
        return Err(ProductFormError::EmptyField(field));
    }
    Ok(sanitized)
}

fn required_multiline(field: &'static str, value: &str) -> ProductFormResult<String> {
    let sanitized = sanitize_multiline_text(value);
    if sanitized.is_empty() {
        return Err(ProductFormError::EmptyField(field));
    }
    Ok(sanitized)
}
