//! Cart route handlers.
//!
//! The cart lives in the shopper's session as a list of `CartLine`s. Every
//! handler rebuilds the cart against the live catalog, applies one change
//! and writes the lines back, so prices and stock are always current.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use rust_decimal::Decimal;
use seko_core::{Cart, CartItem, CartLine, Product, ProductId};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::products::PRODUCT_NOT_FOUND;
use crate::state::AppState;

/// Session key holding the cart lines.
pub const CART_SESSION_KEY: &str = "cart";

/// One cart row as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product: Arc<Product>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product: Arc::clone(item.product()),
            quantity: item.quantity(),
            line_total: item.line_total(),
        }
    }
}

/// Cart page data: rows plus derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_for_free_shipping: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let summary = cart.summary();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: summary.item_count,
            subtotal: summary.subtotal,
            shipping: summary.shipping,
            total: summary.total,
            remaining_for_free_shipping: summary.remaining_for_free_shipping,
        }
    }
}

/// Header badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Rebuild the shopper's cart from the session.
async fn load_cart(session: &Session, state: &AppState) -> Result<Cart> {
    let lines: Vec<CartLine> = session
        .get(CART_SESSION_KEY)
        .await?
        .unwrap_or_default();
    Ok(Cart::from_lines(&lines, state.catalog()))
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(CART_SESSION_KEY, cart.lines()).await?;
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
///
/// GET /api/carrito
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session, &state).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add a product to the cart.
///
/// POST /api/carrito/items
///
/// Quantity defaults to 1 and is clamped to the product's stock.
#[instrument(skip(state, session, payload))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(request) = payload?;
    let product = state
        .catalog()
        .find_by_id(&request.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

    let mut cart = load_cart(&session, &state).await?;
    let quantity = cart.add_item(product, request.quantity.unwrap_or(1));
    save_cart(&session, &cart).await?;

    tracing::debug!(product_id = %request.product_id, quantity, "Cart item added");
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", request.product_id.as_str())]),
    );

    Ok(Json(CartView::from(&cart)))
}

/// Set the quantity of a cart row.
///
/// PATCH /api/carrito/items/{productId}
///
/// A quantity of zero or less removes the row.
#[instrument(skip(state, session, payload))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
    payload: std::result::Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(request) = payload?;

    let mut cart = load_cart(&session, &state).await?;
    cart.update_quantity(&product_id, request.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove a product from the cart.
///
/// DELETE /api/carrito/items/{productId}
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await?;
    cart.remove_item(&product_id);
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Removed item",
        Some(&[("product_id", product_id.as_str())]),
    );

    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
///
/// DELETE /api/carrito
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Total units in the cart, for the header badge.
///
/// GET /api/carrito/count
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session, &state).await?;
    Ok(Json(CartCount {
        count: cart.total_items(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::test_support::{json_body, test_app};

    /// Drives one app instance, carrying the session cookie between calls.
    struct Shopper {
        app: Router,
        cookie: Option<String>,
    }

    impl Shopper {
        fn new() -> Self {
            Self {
                app: test_app(),
                cookie: None,
            }
        }

        async fn send(
            &mut self,
            method: &str,
            uri: &str,
            body: Option<serde_json::Value>,
        ) -> (StatusCode, serde_json::Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(cookie) = &self.cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            let request = match body {
                Some(json) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.app.clone().oneshot(request).await.unwrap();
            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_string());
            }
            let status = response.status();
            (status, json_body(response).await)
        }
    }

    #[tokio::test]
    async fn test_new_shopper_has_empty_cart() {
        let mut shopper = Shopper::new();
        let (status, body) = shopper.send("GET", "/api/carrito", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["items"].as_array().unwrap().is_empty());
        assert_eq!(body["itemCount"], 0);
        assert_eq!(body["subtotal"], 0.0);
        assert_eq!(body["shipping"], 0.0);
        assert_eq!(body["total"], 0.0);
    }

    #[tokio::test]
    async fn test_cart_persists_across_requests() {
        let mut shopper = Shopper::new();
        shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "2", "quantity": 2 })),
            )
            .await;
        let (status, body) = shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "2", "quantity": 1 })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        let item = items.first().unwrap();
        assert_eq!(item["product"]["slug"], "manzana-deshidratada-100g");
        assert_eq!(item["quantity"], 3);
        assert_eq!(item["lineTotal"], 480.0);
        assert_eq!(body["itemCount"], 3);
        assert_eq!(body["subtotal"], 480.0);
        assert_eq!(body["shipping"], 300.0);
        assert_eq!(body["total"], 780.0);
        assert_eq!(body["remainingForFreeShipping"], 1520.0);

        let (_, body) = shopper.send("GET", "/api/carrito/count", None).await;
        assert_eq!(body, serde_json::json!({ "count": 3 }));
    }

    #[tokio::test]
    async fn test_add_defaults_to_one_and_clamps_to_stock() {
        let mut shopper = Shopper::new();
        let (_, body) = shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "3" })),
            )
            .await;
        assert_eq!(body["itemCount"], 1);

        let (_, body) = shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "3", "quantity": 500 })),
            )
            .await;
        assert_eq!(body["itemCount"], 30);
        assert_eq!(body["shipping"], 0.0);
        assert_eq!(body["remainingForFreeShipping"], 0.0);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_404() {
        let mut shopper = Shopper::new();
        let (status, body) = shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "99" })),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Producto no encontrado");
    }

    #[tokio::test]
    async fn test_add_with_malformed_body_is_400() {
        let mut shopper = Shopper::new();
        let (status, body) = shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "quantity": 1 })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Datos inválidos");
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let mut shopper = Shopper::new();
        for id in ["1", "4"] {
            shopper
                .send(
                    "POST",
                    "/api/carrito/items",
                    Some(serde_json::json!({ "productId": id })),
                )
                .await;
        }

        let (status, body) = shopper
            .send(
                "PATCH",
                "/api/carrito/items/1",
                Some(serde_json::json!({ "quantity": 5 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["itemCount"], 6);

        let (_, body) = shopper
            .send(
                "PATCH",
                "/api/carrito/items/1",
                Some(serde_json::json!({ "quantity": 0 })),
            )
            .await;
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap()["product"]["id"], "4");

        let (_, body) = shopper.send("DELETE", "/api/carrito/items/4", None).await;
        assert!(body["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let mut shopper = Shopper::new();
        shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "1", "quantity": 4 })),
            )
            .await;

        let (status, body) = shopper.send("DELETE", "/api/carrito", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["itemCount"], 0);

        let (_, body) = shopper.send("GET", "/api/carrito/count", None).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_adds_from_one_session_all_count() {
        let mut shopper = Shopper::new();
        shopper
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "1" })),
            )
            .await;
        let cookie = shopper.cookie.clone().unwrap();

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let app = shopper.app.clone();
            let cookie = cookie.clone();
            tasks.push(tokio::spawn(async move {
                let request = Request::builder()
                    .method("POST")
                    .uri("/api/carrito/items")
                    .header(header::COOKIE, cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"productId":"1","quantity":1}"#))
                    .unwrap();
                app.oneshot(request).await.unwrap().status()
            }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap(), StatusCode::OK);
        }

        let (_, body) = shopper.send("GET", "/api/carrito/count", None).await;
        assert_eq!(body["count"], 21);
    }

    #[tokio::test]
    async fn test_carts_are_per_session() {
        let mut alice = Shopper::new();
        alice
            .send(
                "POST",
                "/api/carrito/items",
                Some(serde_json::json!({ "productId": "1" })),
            )
            .await;

        let mut bob = Shopper {
            app: alice.app.clone(),
            cookie: None,
        };
        let (_, body) = bob.send("GET", "/api/carrito/count", None).await;
        assert_eq!(body["count"], 0);
    }
}
