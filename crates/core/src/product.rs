//! Product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Errors raised when a product record breaks one of its field rules.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The slug is empty or contains characters outside `[a-z0-9-]`.
    #[error("product {id}: slug '{slug}' must be lowercase letters, digits and hyphens")]
    InvalidSlug { id: ProductId, slug: String },

    /// The id is empty.
    #[error("product id cannot be empty")]
    EmptyId,

    /// The name is shorter than 2 or longer than 255 characters.
    #[error("product {0}: name must be between 2 and 255 characters")]
    InvalidName(ProductId),

    /// The description is shorter than 10 characters.
    #[error("product {0}: description must be at least 10 characters")]
    DescriptionTooShort(ProductId),

    /// The category label is shorter than 2 characters.
    #[error("product {0}: category must be at least 2 characters")]
    InvalidCategory(ProductId),

    /// The primary image reference is empty.
    #[error("product {0}: image url cannot be empty")]
    MissingImage(ProductId),

    /// The weight/unit label is empty.
    #[error("product {0}: weight cannot be empty")]
    MissingWeight(ProductId),
}

/// A sellable item.
///
/// Products are never deleted; `is_active = false` hides them from every
/// catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// URL-safe secondary key used for lookups.
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Free-text category label, e.g. "Frutas Deshidratadas".
    pub category: String,
    pub image_url: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Units available.
    pub stock: u32,
    /// Weight/unit label, e.g. "100g".
    pub weight: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl Product {
    /// Check the field rules that the type system does not already enforce.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProductError`] found.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.as_str().is_empty() {
            return Err(ProductError::EmptyId);
        }

        if !is_url_safe_slug(&self.slug) {
            return Err(ProductError::InvalidSlug {
                id: self.id.clone(),
                slug: self.slug.clone(),
            });
        }

        let name_len = self.name.trim().chars().count();
        if !(2..=255).contains(&name_len) {
            return Err(ProductError::InvalidName(self.id.clone()));
        }

        if self.description.trim().chars().count() < 10 {
            return Err(ProductError::DescriptionTooShort(self.id.clone()));
        }

        if self.category.trim().chars().count() < 2 {
            return Err(ProductError::InvalidCategory(self.id.clone()));
        }

        if self.image_url.trim().is_empty() {
            return Err(ProductError::MissingImage(self.id.clone()));
        }

        if self.weight.trim().is_empty() {
            return Err(ProductError::MissingWeight(self.id.clone()));
        }

        Ok(())
    }
}

fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::TimeZone;

    use super::*;

    /// Build a valid active product for tests.
    #[allow(clippy::unwrap_used)]
    pub fn product(id: &str, slug: &str, price: u32, stock: u32) -> Product {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Product {
            id: ProductId::new(id),
            slug: slug.to_string(),
            name: format!("Producto {id}"),
            description: "Producto deshidratado de prueba.".to_string(),
            price: Price::from_units(price).unwrap(),
            category: "Frutas Deshidratadas".to_string(),
            image_url: format!("/assets/{slug}.jpg"),
            images: Vec::new(),
            stock,
            weight: "100g".to_string(),
            benefits: Vec::new(),
            is_active: true,
            created_at: date,
            updated_at: date,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn test_valid_product() {
        assert_eq!(product("1", "naranja-deshidratada-100g", 170, 50).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_unsafe_slug() {
        for slug in ["", "Naranja", "naranja deshidratada", "-naranja", "naranja/100g"] {
            let p = product("1", slug, 170, 50);
            assert!(
                matches!(p.validate(), Err(ProductError::InvalidSlug { .. })),
                "slug {slug:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_short_fields() {
        let mut p = product("1", "naranja", 170, 50);
        p.name = "N".to_string();
        assert_eq!(p.validate(), Err(ProductError::InvalidName(ProductId::new("1"))));

        let mut p = product("1", "naranja", 170, 50);
        p.description = "corta".to_string();
        assert_eq!(
            p.validate(),
            Err(ProductError::DescriptionTooShort(ProductId::new("1")))
        );

        let mut p = product("1", "naranja", 170, 50);
        p.weight = "  ".to_string();
        assert_eq!(p.validate(), Err(ProductError::MissingWeight(ProductId::new("1"))));
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let p = product("2", "manzana-deshidratada-100g", 160, 45);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], "2");
        assert_eq!(json["imageUrl"], "/assets/manzana-deshidratada-100g.jpg");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["price"], 160.0);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let json = serde_json::json!({
            "id": "9",
            "slug": "zanahoria-100g",
            "name": "Zanahoria Deshidratada",
            "description": "Zanahorias deshidratadas para sopas.",
            "price": 140,
            "category": "Verduras Deshidratadas",
            "imageUrl": "/assets/zanahoria.jpg",
            "stock": 0,
            "weight": "100g",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let p: Product = serde_json::from_value(json).unwrap();
        assert!(p.is_active);
        assert!(p.images.is_empty());
        assert!(p.benefits.is_empty());
        assert_eq!(p.stock, 0);
    }

    #[test]
    fn test_deserialize_rejects_negative_stock() {
        let json = serde_json::json!({
            "id": "9",
            "slug": "zanahoria-100g",
            "name": "Zanahoria",
            "description": "Zanahorias deshidratadas para sopas.",
            "price": 140,
            "category": "Verduras Deshidratadas",
            "imageUrl": "/assets/zanahoria.jpg",
            "stock": -1,
            "weight": "100g",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        assert!(serde_json::from_value::<Product>(json).is_err());
    }
}
