//! Catalog loading.
//!
//! The storefront serves the built-in Seko product list unless
//! `SEKO_CATALOG_PATH` points at a JSON array of products in the API's wire
//! format. Either way the catalog is built once at startup.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use seko_core::{Catalog, CatalogError, Price, PriceError, Product, ProductId};
use thiserror::Error;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The catalog file is not a valid product list.
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// A built-in price is invalid.
    #[error("invalid built-in price: {0}")]
    Price(#[from] PriceError),

    /// The products break a catalog invariant.
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Load the catalog from `path`, or the built-in products when `None`.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or parsed, or if
/// the products are invalid.
pub fn load(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let products = match path {
        Some(path) => read_products(path)?,
        None => builtin_products()?,
    };

    let catalog = Catalog::new(products)?;
    tracing::info!(
        products = catalog.len(),
        source = path.map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
        "Catalog loaded"
    );
    Ok(catalog)
}

fn read_products(path: &Path) -> Result<Vec<Product>, CatalogLoadError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogLoadError::Parse {
        path: display,
        source,
    })
}

/// Launch date shared by the built-in products.
fn launch_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

struct Seed {
    id: &'static str,
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    price: u32,
    category: &'static str,
    image: &'static str,
    stock: u32,
    benefits: [&'static str; 4],
}

const SEEDS: [Seed; 4] = [
    Seed {
        id: "1",
        slug: "naranja-deshidratada-100g",
        name: "Naranja Deshidratada",
        description: "Naranjas deshidratadas 100% naturales. Perfectas para snacks, té o decoración. Rico en vitamina C y antioxidantes.",
        price: 170,
        category: "Frutas Deshidratadas",
        image: "/assets/naranja_deshidratada.jpg",
        stock: 50,
        benefits: [
            "Rica en vitamina C",
            "Antioxidantes naturales",
            "Sin azúcar añadido",
            "Perfecta para té e infusiones",
        ],
    },
    Seed {
        id: "2",
        slug: "manzana-deshidratada-100g",
        name: "Manzana Deshidratada",
        description: "Manzanas deshidratadas naturales. Snack saludable y delicioso, rico en fibra y nutrientes esenciales.",
        price: 160,
        category: "Frutas Deshidratadas",
        image: "/assets/manzana_deshidratada.jpg",
        stock: 45,
        benefits: [
            "Alta en fibra",
            "Snack saludable",
            "Sin conservantes",
            "Energía natural",
        ],
    },
    Seed {
        id: "3",
        slug: "mix-variado-100g",
        name: "Mix Variado",
        description: "Una selección de frutas deshidratadas variadas. Incluye naranjas, limones, manzanas y más. Perfecto para probar diferentes sabores.",
        price: 150,
        category: "Mix Variado",
        image: "/assets/pomelo_deshidratado.jpg",
        stock: 30,
        benefits: [
            "Variedad de sabores",
            "Todos los nutrientes",
            "Perfecto para regalar",
            "Gran valor",
        ],
    },
    Seed {
        id: "4",
        slug: "limon-deshidratado-100g",
        name: "Limón Deshidratado",
        description: "Limones deshidratados con su sabor cítrico intenso. Ideal para bebidas, coctelería y decoración culinaria.",
        price: 175,
        category: "Frutas Deshidratadas",
        image: "/assets/limon_deshidratado.jpg",
        stock: 40,
        benefits: [
            "Sabor cítrico intenso",
            "Perfecto para bebidas",
            "Propiedades antioxidantes",
            "Vitamina C",
        ],
    },
];

/// The products Seko sells today.
///
/// # Errors
///
/// Returns `CatalogLoadError::Price` if a seed has a zero price.
pub fn builtin_products() -> Result<Vec<Product>, CatalogLoadError> {
    let date = launch_date();
    SEEDS
        .iter()
        .map(|seed| {
            Ok(Product {
                id: ProductId::new(seed.id),
                slug: seed.slug.to_string(),
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                price: Price::from_units(seed.price)?,
                category: seed.category.to_string(),
                image_url: seed.image.to_string(),
                images: vec![seed.image.to_string()],
                stock: seed.stock,
                weight: "100g".to_string(),
                benefits: seed.benefits.iter().map(ToString::to_string).collect(),
                is_active: true,
                created_at: date,
                updated_at: date,
            })
        })
        .collect()
}
