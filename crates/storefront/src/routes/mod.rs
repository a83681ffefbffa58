//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! # Catalog
//! GET    /api/productos                     - Active products (?category= filters)
//! GET    /api/productos/{slug}              - Product detail
//! GET    /api/categorias                    - Category names
//!
//! # Contact
//! POST   /api/contacto                      - Submit the contact form
//!
//! # Cart (session backed)
//! GET    /api/carrito                       - Cart view
//! DELETE /api/carrito                       - Empty the cart
//! POST   /api/carrito/items                 - Add a product
//! PATCH  /api/carrito/items/{productId}     - Set a quantity (<= 0 removes)
//! DELETE /api/carrito/items/{productId}     - Remove a product
//! GET    /api/carrito/count                 - Header badge count
//! ```

pub mod cart;
pub mod contact;
pub mod products;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route(
            "/items/{product_id}",
            patch(cart::update).delete(cart::remove),
        )
        .route("/count", get(cart::count))
}

/// Create the contact routes router.
///
/// Kept separate so the binary can wrap it in the rate limiter.
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/api/contacto", post(contact::submit))
}

/// Create all routes for the storefront except contact.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/productos", product_routes())
        .route("/api/categorias", get(products::categories))
        .nest("/api/carrito", cart_routes())
}
