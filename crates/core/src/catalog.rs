//! Read-only product catalog.
//!
//! The catalog is built once from a list of products and never mutated.
//! Every query only sees active products and preserves insertion order.
//! Products are held behind `Arc` so carts can reference the same record
//! the catalog serves instead of copying it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::product::{Product, ProductError};
use crate::types::ProductId;

/// Errors raised while building a [`Catalog`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product failed field validation.
    #[error(transparent)]
    InvalidProduct(#[from] ProductError),

    /// Two products share a slug.
    #[error("duplicate product slug: {0}")]
    DuplicateSlug(String),

    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// Immutable set of products with lookup indexes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    by_slug: HashMap<String, usize>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// Slugs and ids must be unique across all products, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on the first invalid or duplicate product.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_slug = HashMap::with_capacity(products.len());
        let mut by_id = HashMap::with_capacity(products.len());

        for (index, product) in products.iter().enumerate() {
            product.validate()?;

            if by_slug.insert(product.slug.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSlug(product.slug.clone()));
            }
            if by_id.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            by_slug,
            by_id,
        })
    }

    /// All active products in insertion order.
    #[must_use]
    pub fn list_active(&self) -> Vec<Arc<Product>> {
        self.active().cloned().collect()
    }

    /// The active product with exactly this slug (case-sensitive).
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Arc<Product>> {
        self.by_slug
            .get(slug)
            .and_then(|&index| self.products.get(index))
            .filter(|product| product.is_active)
    }

    /// The active product with this id.
    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.by_id
            .get(id)
            .and_then(|&index| self.products.get(index))
            .filter(|product| product.is_active)
    }

    /// Active products whose category equals `category`, in insertion order.
    ///
    /// Returns an empty list when nothing matches.
    #[must_use]
    pub fn list_by_category(&self, category: &str) -> Vec<Arc<Product>> {
        self.active()
            .filter(|product| product.category == category)
            .cloned()
            .collect()
    }

    /// Distinct categories of active products, in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.active()
            .map(|product| product.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Number of products, including inactive ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn active(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter().filter(|product| product.is_active)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::product::fixtures::product;

    fn sample() -> Catalog {
        let mut mix = product("3", "mix-variado-100g", 150, 30);
        mix.category = "Mix Variado".to_string();
        let mut retired = product("5", "pera-deshidratada-100g", 180, 10);
        retired.is_active = false;

        Catalog::new(vec![
            product("1", "naranja-deshidratada-100g", 170, 50),
            product("2", "manzana-deshidratada-100g", 160, 45),
            mix,
            product("4", "limon-deshidratado-100g", 175, 40),
            retired,
        ])
        .unwrap()
    }

    fn ids(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_list_active_preserves_order_and_hides_inactive() {
        let catalog = sample();
        assert_eq!(ids(&catalog.list_active()), ["1", "2", "3", "4"]);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_find_by_slug() {
        let catalog = sample();
        let manzana = catalog.find_by_slug("manzana-deshidratada-100g").unwrap();
        assert_eq!(manzana.id.as_str(), "2");
    }

    #[test]
    fn test_find_by_slug_is_exact_and_case_sensitive() {
        let catalog = sample();
        assert!(catalog.find_by_slug("Manzana-Deshidratada-100g").is_none());
        assert!(catalog.find_by_slug("manzana").is_none());
        assert!(catalog.find_by_slug("no-existe").is_none());
    }

    #[test]
    fn test_find_by_slug_hides_inactive() {
        let catalog = sample();
        assert!(catalog.find_by_slug("pera-deshidratada-100g").is_none());
        assert!(catalog.find_by_id(&ProductId::new("5")).is_none());
    }

    #[test]
    fn test_list_by_category() {
        let catalog = sample();
        assert_eq!(
            ids(&catalog.list_by_category("Frutas Deshidratadas")),
            ["1", "2", "4"]
        );
        assert_eq!(ids(&catalog.list_by_category("Mix Variado")), ["3"]);
        assert!(catalog.list_by_category("Verduras Deshidratadas").is_empty());
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let catalog = sample();
        assert_eq!(
            catalog.categories(),
            ["Frutas Deshidratadas", "Mix Variado"]
        );
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let result = Catalog::new(vec![
            product("1", "naranja", 170, 50),
            product("2", "naranja", 160, 45),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateSlug("naranja".to_string())
        );
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let result = Catalog::new(vec![
            product("1", "naranja", 170, 50),
            product("1", "manzana", 160, 45),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateId(ProductId::new("1"))
        );
    }

    #[test]
    fn test_rejects_invalid_product() {
        let result = Catalog::new(vec![product("1", "Naranja", 170, 50)]);
        assert!(matches!(
            result.unwrap_err(),
            CatalogError::InvalidProduct(ProductError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.list_active().is_empty());
    }
}
