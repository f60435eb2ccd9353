use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::pagination::Pagination;

/// Domain representation of a catalog product together with its owned
/// characteristics and images.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: Uuid,
    /// Identifier of the owning user.
    pub user_id: Uuid,
    /// Human-readable name of the product.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub quantity: i32,
    /// Free-form description shown to buyers.
    pub description: String,
    /// Category label used for filtering.
    pub category: String,
    /// Characteristics in display order.
    pub characteristics: Vec<ProductCharacteristic>,
    /// Images in display order.
    pub images: Vec<ProductImage>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
    /// Set once the product has been soft-deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Product {
    /// Whether the product is still visible to ordinary reads.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Whether `user_id` owns this product.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Named attribute of a product, such as "Material: cotton".
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ProductCharacteristic {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Picture of a product.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub id: Uuid,
    pub url: String,
    pub description: String,
}

/// Characteristic payload stored alongside a new or updated product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductCharacteristic {
    pub name: String,
    pub description: String,
}

impl NewProductCharacteristic {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Image payload stored alongside a new or updated product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductImage {
    pub url: String,
    pub description: String,
}

impl NewProductImage {
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
        }
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Owning user identifier.
    pub user_id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub description: String,
    pub category: String,
    pub characteristics: Vec<NewProductCharacteristic>,
    pub images: Vec<NewProductImage>,
}

impl NewProduct {
    /// Build a new product payload owned by `user_id`.
    pub fn new(user_id: Uuid, name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            user_id,
            name: name.into(),
            price,
            quantity,
            description: String::new(),
            category: String::new(),
            characteristics: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a category label to the product payload.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Append a characteristic after the ones already attached.
    pub fn with_characteristic(mut self, characteristic: NewProductCharacteristic) -> Self {
        self.characteristics.push(characteristic);
        self
    }

    /// Append an image after the ones already attached.
    pub fn with_image(mut self, image: NewProductImage) -> Self {
        self.images.push(image);
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// `characteristics` and `images` replace the whole collection when set.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub characteristics: Option<Vec<NewProductCharacteristic>>,
    pub images: Option<Vec<NewProductImage>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            price: None,
            quantity: None,
            description: None,
            category: None,
            characteristics: None,
            images: None,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace every characteristic of the product.
    pub fn characteristics(mut self, characteristics: Vec<NewProductCharacteristic>) -> Self {
        self.characteristics = Some(characteristics);
        self
    }

    /// Replace every image of the product.
    pub fn images(mut self, images: Vec<NewProductImage>) -> Self {
        self.images = Some(images);
        self
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict the listing to one owner.
    pub user_id: Option<Uuid>,
    /// Exact category match.
    pub category: Option<String>,
    /// Search term applied to the name or description.
    pub search: Option<String>,
    /// Whether soft-deleted products should be included in the results.
    pub include_deleted: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owned_by(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Include soft-deleted products in the results.
    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_keeps_children_in_insertion_order() {
        let owner = Uuid::new_v4();
        let product = NewProduct::new(owner, "Chair", 10.0, 2)
            .with_characteristic(NewProductCharacteristic::new("Color", "Blue"))
            .with_characteristic(NewProductCharacteristic::new("Legs", "4"))
            .with_image(NewProductImage::new("https://img/1.png", "front"));

        assert_eq!(product.user_id, owner);
        assert_eq!(product.characteristics[0].name, "Color");
        assert_eq!(product.characteristics[1].name, "Legs");
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn update_patch_starts_empty() {
        let patch = UpdateProduct::new().images(Vec::new());

        assert!(patch.name.is_none());
        assert!(patch.characteristics.is_none());
        assert_eq!(patch.images, Some(Vec::new()));
    }
}
