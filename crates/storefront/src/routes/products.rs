//! Catalog route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use seko_core::Product;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Message returned when a slug or id matches no active product.
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";

/// Query parameters for product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Exact category name; blank means every category.
    pub category: Option<String>,
}

/// List active products, optionally filtered by category.
///
/// GET /api/productos
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Arc<Product>>> {
    let catalog = state.catalog();
    // Blank means unfiltered; anything else must match the label exactly
    let products = match query.category.as_deref() {
        Some(category) if !category.trim().is_empty() => catalog.list_by_category(category),
        _ => catalog.list_active(),
    };
    Json(products)
}

/// Show one product.
///
/// GET /api/productos/{slug}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Arc<Product>>> {
    state
        .catalog()
        .find_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

/// List the categories that have active products.
///
/// GET /api/categorias
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog()
            .categories()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    )
}
